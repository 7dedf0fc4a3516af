use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;
use serde::Serialize;
use serde_jsonlines::JsonLinesWriter;

use crate::F1TelemetryError;

/// Writes chart points (raw or binned) to `file`, one JSON object per line.
pub fn write_series<T: Serialize>(file: &Path, points: &[T]) -> Result<(), F1TelemetryError> {
    let series_file =
        File::create(file).map_err(|e| F1TelemetryError::WriterError { source: e })?;
    write_series_to(BufWriter::new(series_file), points)?;
    info!("Wrote {} points to {:?}", points.len(), file);
    Ok(())
}

pub fn write_series_to<W: Write, T: Serialize>(
    writer: W,
    points: &[T],
) -> Result<(), F1TelemetryError> {
    let mut series_writer = JsonLinesWriter::new(writer);
    for point in points {
        series_writer
            .write(point)
            .map_err(|e| F1TelemetryError::WriterError { source: e })?;
    }
    series_writer
        .flush()
        .map_err(|e| F1TelemetryError::WriterError { source: e })
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), F1TelemetryError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| F1TelemetryError::OutputSerializeError { source: e })?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{ChartPoint, LapAverage};
    use tempfile::TempDir;

    #[test]
    fn test_write_series_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speed.jsonl");
        let points = vec![ChartPoint::from((0, 350.)), ChartPoint::from((3, 0.))];

        write_series(&path, &points).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: ChartPoint = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, points[0]);
    }

    #[test]
    fn test_write_binned_to_buffer() {
        let mut buffer = Vec::new();
        let averages = vec![LapAverage {
            lap: 1,
            average: 175.,
        }];

        write_series_to(&mut buffer, &averages).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim(), r#"{"lap":1,"average":175.0}"#);
    }
}
