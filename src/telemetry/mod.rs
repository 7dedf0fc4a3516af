pub mod binning;
pub mod channel;
pub mod chart_series;
pub mod lap_stats;

pub use binning::{
    BinnedLapAverages, DEFAULT_WINDOW_SIZE, LapAverage, compute_binned_lap_averages,
};
pub use channel::Channel;
pub use chart_series::{ChartPoint, ChartSeries, compute_chart_series};
pub use lap_stats::{LapStatistics, compute_lap_statistics};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One lap of one driver in one session, as published by the OpenF1 `laps` endpoint.
///
/// Every timing field is optional and validated on its own: an out lap without a lap
/// time can still carry a valid sector or speed trap reading.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub driver_number: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub session_key: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub lap_number: Option<u32>,
    /// Lap time in seconds
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lap_duration: Option<f64>,
    #[serde(rename = "duration_sector_1", default, deserialize_with = "lenient_f64")]
    pub sector_1_duration: Option<f64>,
    #[serde(rename = "duration_sector_2", default, deserialize_with = "lenient_f64")]
    pub sector_2_duration: Option<f64>,
    #[serde(rename = "duration_sector_3", default, deserialize_with = "lenient_f64")]
    pub sector_3_duration: Option<f64>,
    /// Speed trap reading in km/h
    #[serde(rename = "st_speed", default, deserialize_with = "lenient_i64")]
    pub speed_trap_speed: Option<i64>,
}

impl LapRecord {
    pub fn new(
        lap_duration: Option<f64>,
        sectors: [Option<f64>; 3],
        speed_trap_speed: Option<i64>,
    ) -> Self {
        let [sector_1_duration, sector_2_duration, sector_3_duration] = sectors;
        Self {
            lap_duration,
            sector_1_duration,
            sector_2_duration,
            sector_3_duration,
            speed_trap_speed,
            ..Default::default()
        }
    }
}

/// One `car_data` reading. Kept as an open map because the set of channels differs
/// between seasons and a missing or non-numeric channel is a normal condition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelemetrySample(Map<String, Value>);

impl TelemetrySample {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Finite numeric value stored under `key`, if any.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(number_from_value)
            .filter(|v| v.is_finite())
    }

    pub fn metric(&self, channel: &Channel) -> Option<f64> {
        self.value(channel.key())
    }

    pub fn driver_number(&self) -> Option<u32> {
        self.value("driver_number")
            .filter(|n| *n > 0. && n.fract() == 0.)
            .map(|n| n as u32)
    }
}

/// A duration is usable when it is a finite number of seconds greater than zero.
pub fn is_valid_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.
}

/// A speed trap reading is usable when it is strictly positive.
pub fn is_valid_speed_trap(speed: i64) -> bool {
    speed > 0
}

/// Reads a JSON number, or a string holding one, the way the API's loosely typed
/// payloads need.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        other => number_from_value(other)
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
    }))
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_i64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lap_record_from_openf1_json() {
        let lap: LapRecord = serde_json::from_value(json!({
            "meeting_key": 1219,
            "session_key": 9161,
            "driver_number": 63,
            "lap_number": 8,
            "date_start": "2023-09-16T13:59:07.606000+00:00",
            "duration_sector_1": 26.966,
            "duration_sector_2": 38.657,
            "duration_sector_3": 26.12,
            "i1_speed": 307,
            "i2_speed": 277,
            "is_pit_out_lap": false,
            "lap_duration": 91.743,
            "segments_sector_1": [2049, 2049, 2049],
            "st_speed": 298
        }))
        .unwrap();

        assert_eq!(lap.driver_number, Some(63));
        assert_eq!(lap.session_key, Some(9161));
        assert_eq!(lap.lap_number, Some(8));
        assert_eq!(lap.lap_duration, Some(91.743));
        assert_eq!(lap.sector_1_duration, Some(26.966));
        assert_eq!(lap.sector_3_duration, Some(26.12));
        assert_eq!(lap.speed_trap_speed, Some(298));
    }

    #[test]
    fn test_lap_record_tolerates_nulls_and_odd_types() {
        let lap: LapRecord = serde_json::from_value(json!({
            "driver_number": 1,
            "lap_duration": null,
            "duration_sector_1": "29.5",
            "duration_sector_2": true,
            "st_speed": 311.7
        }))
        .unwrap();

        assert_eq!(lap.lap_duration, None);
        assert_eq!(lap.sector_1_duration, Some(29.5));
        assert_eq!(lap.sector_2_duration, None);
        assert_eq!(lap.sector_3_duration, None);
        assert_eq!(lap.speed_trap_speed, Some(311));
    }

    #[test]
    fn test_sample_values() {
        let sample: TelemetrySample = serde_json::from_value(json!({
            "driver_number": 55,
            "speed": 312,
            "rpm": "11000",
            "n_gear": null,
            "drs": "open",
            "throttle": "NaN"
        }))
        .unwrap();

        assert_eq!(sample.metric(&Channel::Speed), Some(312.));
        assert_eq!(sample.metric(&Channel::Rpm), Some(11000.));
        assert_eq!(sample.metric(&Channel::Gear), None);
        assert_eq!(sample.metric(&Channel::Drs), None);
        assert_eq!(sample.metric(&Channel::Throttle), None);
        assert_eq!(sample.metric(&Channel::Brake), None);
        assert_eq!(sample.driver_number(), Some(55));
    }

    #[test]
    fn test_validity_predicates() {
        assert!(is_valid_duration(91.2));
        assert!(!is_valid_duration(0.));
        assert!(!is_valid_duration(-1.));
        assert!(!is_valid_duration(f64::NAN));
        assert!(!is_valid_duration(f64::INFINITY));

        assert!(is_valid_speed_trap(1));
        assert!(!is_valid_speed_trap(0));
        assert!(!is_valid_speed_trap(-4));
    }
}
