// Error types for f1telemetry

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum F1TelemetryError {
    // Errors while loading exported OpenF1 data
    #[snafu(display("Invalid input file: {path}"))]
    InvalidInputFile { path: String },
    #[snafu(display("Error reading input file {path}"))]
    InputReadError { path: String, source: io::Error },
    #[snafu(display("Error decoding records in {path}"))]
    RecordDecodeError {
        path: String,
        source: serde_json::Error,
    },

    // Errors for the series writer
    #[snafu(display("Error writing output file"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing output"))]
    OutputSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error accessing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error parsing config file"))]
    ConfigParseError { source: serde_json::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Selection errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
    #[snafu(display("Driver #{driver_number} is not part of this session"))]
    UnknownDriver { driver_number: u32 },
}
