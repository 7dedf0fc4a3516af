use std::{collections::HashMap, fmt};

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};

use super::DriverInfo;
use crate::telemetry::{lenient_f64, lenient_i64, lenient_u32};

/// Raw `session_result` record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SessionResultRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub driver_number: Option<u32>,
    /// Race time in seconds. Qualifying sessions publish one time per part, which is
    /// not a single duration and reads as absent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gap_to_leader: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub number_of_laps: Option<i64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub dnf: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub dns: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub dsq: bool,
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<serde_json::Value>::deserialize(deserializer)?
        .and_then(|v| v.as_bool())
        .unwrap_or(false))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Finished,
    Dnf,
    Dns,
    Dsq,
}

impl ResultStatus {
    /// A disqualification outranks a non-start, which outranks a retirement.
    fn from_flags(record: &SessionResultRecord) -> Self {
        if record.dsq {
            Self::Dsq
        } else if record.dns {
            Self::Dns
        } else if record.dnf {
            Self::Dnf
        } else {
            Self::Finished
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finished => "Finished",
            Self::Dnf => "DNF",
            Self::Dns => "DNS",
            Self::Dsq => "DSQ",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResultItem {
    /// Classified position, 0 when unclassified
    pub position: u32,
    pub driver_number: u32,
    pub name: String,
    pub team: Option<String>,
    pub duration: Option<f64>,
    pub gap: Option<f64>,
    pub laps: u32,
    pub status: ResultStatus,
    pub headshot_url: Option<String>,
}

/// Joins a session's results with its drivers.
///
/// Rows for drivers missing from `drivers` are dropped. Classified positions come first
/// in ascending order, unclassified rows keep their feed order at the end.
pub fn build_session_results(
    results: &[SessionResultRecord],
    drivers: &[DriverInfo],
) -> Vec<SessionResultItem> {
    let drivers_by_number: HashMap<u32, &DriverInfo> =
        drivers.iter().map(|d| (d.driver_number, d)).collect();

    results
        .iter()
        .filter_map(|record| {
            let driver = drivers_by_number.get(&record.driver_number?)?;
            Some(SessionResultItem {
                position: record
                    .position
                    .and_then(|p| u32::try_from(p).ok())
                    .unwrap_or(0),
                driver_number: driver.driver_number,
                name: driver.name.clone(),
                team: driver.team.clone(),
                duration: record.duration,
                gap: record.gap_to_leader,
                laps: record
                    .number_of_laps
                    .and_then(|l| u32::try_from(l).ok())
                    .unwrap_or(0),
                status: ResultStatus::from_flags(record),
                headshot_url: driver.headshot_url.clone(),
            })
        })
        .sorted_by_key(|item| match item.position {
            0 => u32::MAX,
            p => p,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn driver(number: u32, name: &str) -> DriverInfo {
        DriverInfo {
            driver_number: number,
            name: name.to_string(),
            code: None,
            team: Some("Team".to_string()),
            headshot_url: None,
        }
    }

    #[test]
    fn test_join_sort_and_status() {
        let results: Vec<SessionResultRecord> = serde_json::from_value(json!([
            {"position": null, "driver_number": 2, "dnf": true, "number_of_laps": 12},
            {"position": 2, "driver_number": 44, "duration": 5412.3, "gap_to_leader": 3.2, "number_of_laps": 57},
            {"position": 1, "driver_number": 1, "duration": 5409.1, "gap_to_leader": 0, "number_of_laps": 57},
            {"position": 3, "driver_number": 99, "number_of_laps": 57},
            {"position": null, "driver_number": 16, "dns": true, "dsq": true}
        ]))
        .unwrap();
        let drivers = vec![
            driver(1, "Max VERSTAPPEN"),
            driver(2, "Logan SARGEANT"),
            driver(16, "Charles LECLERC"),
            driver(44, "Lewis HAMILTON"),
        ];

        let items = build_session_results(&results, &drivers);

        let order: Vec<(u32, u32, ResultStatus)> = items
            .iter()
            .map(|i| (i.position, i.driver_number, i.status))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, 1, ResultStatus::Finished),
                (2, 44, ResultStatus::Finished),
                (0, 2, ResultStatus::Dnf),
                (0, 16, ResultStatus::Dsq),
            ]
        );
        assert_eq!(items[1].gap, Some(3.2));
        assert_eq!(items[1].laps, 57);
        assert_eq!(items[2].laps, 12);
        assert_eq!(items[3].duration, None);
    }

    #[test]
    fn test_qualifying_durations_read_as_absent() {
        let record: SessionResultRecord = serde_json::from_value(json!({
            "position": 1,
            "driver_number": 4,
            "duration": [90.1, 89.7, 89.2],
            "gap_to_leader": [0, 0, 0],
            "dnf": null
        }))
        .unwrap();

        assert_eq!(record.duration, None);
        assert_eq!(record.gap_to_leader, None);
        assert!(!record.dnf);
    }
}
