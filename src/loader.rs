use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::{
    F1TelemetryError,
    openf1::{
        self, DriverInfo, DriverRecord, MeetingInfo, MeetingRecord, SessionInfo, SessionRecord,
        SessionResultRecord,
    },
    telemetry::{LapRecord, TelemetrySample},
};

/// Loads an OpenF1 export, either the raw JSON array returned by the API or one record
/// per line.
pub fn load_records<T: DeserializeOwned>(
    source_file: &Path,
) -> Result<Vec<T>, F1TelemetryError> {
    if !source_file.is_file() {
        return Err(F1TelemetryError::InvalidInputFile {
            path: format!("{:?}", source_file),
        });
    }

    let records = if is_json_array(source_file)? {
        debug!("Reading {:?} as a JSON array", source_file);
        let file = File::open(source_file).map_err(|e| F1TelemetryError::InputReadError {
            path: format!("{:?}", source_file),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            F1TelemetryError::RecordDecodeError {
                path: format!("{:?}", source_file),
                source: e,
            }
        })?
    } else {
        debug!("Reading {:?} as JSON lines", source_file);
        serde_jsonlines::json_lines(source_file)
            .and_then(|lines| lines.collect::<Result<Vec<T>, std::io::Error>>())
            .map_err(|e| F1TelemetryError::InputReadError {
                path: format!("{:?}", source_file),
                source: e,
            })?
    };

    info!("Loaded {} records from {:?}", records.len(), source_file);
    Ok(records)
}

/// An export is a JSON array when its first non-whitespace byte is `[`.
fn is_json_array(source_file: &Path) -> Result<bool, F1TelemetryError> {
    let file = File::open(source_file).map_err(|e| F1TelemetryError::InputReadError {
        path: format!("{:?}", source_file),
        source: e,
    })?;

    for byte in BufReader::new(file).bytes() {
        let byte = byte.map_err(|e| F1TelemetryError::InputReadError {
            path: format!("{:?}", source_file),
            source: e,
        })?;
        if !byte.is_ascii_whitespace() {
            return Ok(byte == b'[');
        }
    }
    Ok(false)
}

pub fn load_laps(source_file: &Path) -> Result<Vec<LapRecord>, F1TelemetryError> {
    load_records(source_file)
}

pub fn load_car_data(source_file: &Path) -> Result<Vec<TelemetrySample>, F1TelemetryError> {
    load_records(source_file)
}

pub fn load_meetings(
    source_file: &Path,
    season: Option<u16>,
) -> Result<Vec<MeetingInfo>, F1TelemetryError> {
    Ok(openf1::meetings(
        load_records::<MeetingRecord>(source_file)?,
        season,
    ))
}

pub fn load_sessions(source_file: &Path) -> Result<Vec<SessionInfo>, F1TelemetryError> {
    Ok(openf1::sessions(load_records::<SessionRecord>(source_file)?))
}

pub fn load_drivers(source_file: &Path) -> Result<Vec<DriverInfo>, F1TelemetryError> {
    Ok(openf1::drivers(load_records::<DriverRecord>(source_file)?))
}

pub fn load_session_results(
    source_file: &Path,
) -> Result<Vec<SessionResultRecord>, F1TelemetryError> {
    load_records(source_file)
}
