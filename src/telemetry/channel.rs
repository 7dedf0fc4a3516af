use std::{convert::Infallible, fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

/// A named telemetry measurement stream as published in OpenF1 `car_data` records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Channel {
    Speed,
    Throttle,
    Brake,
    Rpm,
    Gear,
    Drs,
    /// Any key the API may add later. Read as-is, never range checked.
    Other(String),
}

impl Channel {
    /// The channels offered for charting, in menu order.
    pub const KNOWN: [Channel; 6] = [
        Channel::Speed,
        Channel::Throttle,
        Channel::Brake,
        Channel::Rpm,
        Channel::Gear,
        Channel::Drs,
    ];

    /// Key of this channel inside a telemetry sample.
    pub fn key(&self) -> &str {
        match self {
            Channel::Speed => "speed",
            Channel::Throttle => "throttle",
            Channel::Brake => "brake",
            Channel::Rpm => "rpm",
            Channel::Gear => "n_gear",
            Channel::Drs => "drs",
            Channel::Other(key) => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Channel::Speed => "Speed (km/h)",
            Channel::Throttle => "Throttle (%)",
            Channel::Brake => "Brake",
            Channel::Rpm => "RPM",
            Channel::Gear => "Gear",
            Channel::Drs => "DRS State",
            Channel::Other(key) => key,
        }
    }

    /// Physically plausible values for this channel. Values outside the range are
    /// dropped before binning. `None` accepts every finite value.
    pub fn valid_range(&self) -> Option<RangeInclusive<f64>> {
        match self {
            Channel::Speed => Some(0.0..=400.0),
            Channel::Rpm => Some(0.0..=13000.0),
            Channel::Throttle | Channel::Brake => Some(0.0..=100.0),
            Channel::Gear => Some(0.0..=9.0),
            Channel::Drs | Channel::Other(_) => None,
        }
    }

    pub fn accepts(&self, value: f64) -> bool {
        match self.valid_range() {
            Some(range) => range.contains(&value),
            None => value.is_finite(),
        }
    }

    /// Fixed y axis bounds for charting this channel, `None` lets the chart auto-scale.
    /// Always the same as the binning range so plotted averages never leave the axis.
    pub fn axis_bounds(&self) -> Option<(f64, f64)> {
        self.valid_range()
            .map(|range| (*range.start(), *range.end()))
    }
}

impl FromStr for Channel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "speed" => Channel::Speed,
            "throttle" => Channel::Throttle,
            "brake" => Channel::Brake,
            "rpm" => Channel::Rpm,
            "n_gear" | "gear" => Channel::Gear,
            "drs" => Channel::Drs,
            _ => Channel::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for Channel {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(channel) => channel,
            Err(never) => match never {},
        }
    }
}

impl From<Channel> for String {
    fn from(value: Channel) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
