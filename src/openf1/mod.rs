// Records of the OpenF1 REST API and the display rules applied to them

pub mod results;

pub use results::{ResultStatus, SessionResultItem, SessionResultRecord, build_session_results};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::telemetry::lenient_i64;

/// Raw `meetings` record. Only the fields the app uses are decoded.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MeetingRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub meeting_key: Option<i64>,
    #[serde(default)]
    pub meeting_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub year: Option<i64>,
}

/// Raw `sessions` record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SessionRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub session_key: Option<i64>,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
}

/// Raw `drivers` record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DriverRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub driver_number: Option<i64>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub broadcast_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name_acronym: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub headshot_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingInfo {
    pub meeting_key: u32,
    pub name: String,
    pub location: Option<String>,
    pub country: Option<String>,
}

impl MeetingInfo {
    /// `"Singapore Grand Prix (Marina Bay)"`, falling back to the country when the
    /// location is unknown.
    pub fn display_name(&self) -> String {
        match self.location.as_ref().or(self.country.as_ref()) {
            Some(extra) => format!("{} ({})", self.name, extra),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_key: u32,
    pub raw_name: String,
    pub session_type: Option<String>,
}

impl SessionInfo {
    /// Short name used in selectors: FP1, FP2, FP3, Qualifying, Sprint or Race.
    pub fn display_name(&self) -> String {
        let name = self.raw_name.to_lowercase();
        let short = if name.contains("practice 1") {
            "FP1"
        } else if name.contains("practice 2") {
            "FP2"
        } else if name.contains("practice 3") {
            "FP3"
        } else if name.contains("qualifying") {
            "Qualifying"
        } else if name.contains("sprint") {
            "Sprint"
        } else if name.contains("race") {
            "Race"
        } else {
            return self.raw_name.clone();
        };
        short.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub driver_number: u32,
    pub name: String,
    pub code: Option<String>,
    pub team: Option<String>,
    pub headshot_url: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn positive_key(key: Option<i64>) -> Option<u32> {
    key.filter(|k| *k > 0).and_then(|k| u32::try_from(k).ok())
}

impl MeetingRecord {
    pub fn into_info(self) -> Option<MeetingInfo> {
        Some(MeetingInfo {
            meeting_key: positive_key(self.meeting_key)?,
            name: non_blank(&self.meeting_name).unwrap_or_default(),
            location: non_blank(&self.location),
            country: non_blank(&self.country_name),
        })
    }
}

impl SessionRecord {
    pub fn into_info(self) -> Option<SessionInfo> {
        Some(SessionInfo {
            session_key: positive_key(self.session_key)?,
            raw_name: non_blank(&self.session_name).unwrap_or_default(),
            session_type: non_blank(&self.session_type),
        })
    }
}

impl DriverRecord {
    pub fn into_info(self) -> Option<DriverInfo> {
        let driver_number = positive_key(self.driver_number)?;
        let name = non_blank(&self.full_name)
            .or_else(|| non_blank(&self.broadcast_name))
            .unwrap_or_else(|| {
                [&self.first_name, &self.last_name]
                    .into_iter()
                    .filter_map(non_blank)
                    .join(" ")
            });
        Some(DriverInfo {
            driver_number,
            name,
            code: non_blank(&self.name_acronym),
            team: non_blank(&self.team_name),
            headshot_url: non_blank(&self.headshot_url),
        })
    }
}

/// Meetings with a valid key, optionally restricted to one season, sorted by name.
pub fn meetings(records: Vec<MeetingRecord>, season: Option<u16>) -> Vec<MeetingInfo> {
    records
        .into_iter()
        .filter(|r| season.is_none_or(|s| r.year.is_none_or(|y| y == i64::from(s))))
        .filter_map(MeetingRecord::into_info)
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect()
}

/// Sessions with a valid key, in API order.
pub fn sessions(records: Vec<SessionRecord>) -> Vec<SessionInfo> {
    records
        .into_iter()
        .filter_map(SessionRecord::into_info)
        .collect()
}

/// Drivers with a valid number, sorted by name.
pub fn drivers(records: Vec<DriverRecord>) -> Vec<DriverInfo> {
    records
        .into_iter()
        .filter_map(DriverRecord::into_info)
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect()
}
