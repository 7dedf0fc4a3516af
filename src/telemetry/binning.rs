use std::num::NonZeroUsize;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Channel, ChartPoint};

/// Samples per window. Roughly one lap of `car_data` at the feed's sample rate.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = NonZeroUsize::new(400).unwrap();

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LapAverage {
    /// 1-based window number
    pub lap: usize,
    pub average: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BinnedLapAverages {
    /// Nothing survived the range check, the chart has nothing to draw.
    NoValidData,
    Averages(Vec<LapAverage>),
}

impl BinnedLapAverages {
    pub fn averages(&self) -> &[LapAverage] {
        match self {
            Self::NoValidData => &[],
            Self::Averages(averages) => averages,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoValidData)
    }
}

/// Averages a channel series over fixed windows of sample positions.
///
/// Values outside the channel's valid range are dropped first. Windows are keyed by
/// `index / window_size` and emitted in ascending order, labeled from 1.
pub fn compute_binned_lap_averages(
    points: impl IntoIterator<Item = ChartPoint>,
    channel: &Channel,
    window_size: NonZeroUsize,
) -> BinnedLapAverages {
    let mut dropped = 0usize;
    let windows = points
        .into_iter()
        .filter(|point| {
            let accepted = channel.accepts(point.value);
            if !accepted {
                dropped += 1;
            }
            accepted
        })
        .into_group_map_by(|point| point.index / window_size.get());

    if dropped > 0 {
        debug!("Dropped {dropped} out of range {channel} samples before binning");
    }
    if windows.is_empty() {
        return BinnedLapAverages::NoValidData;
    }

    let averages = windows
        .into_iter()
        .sorted_by_key(|(window, _)| *window)
        .map(|(window, points)| LapAverage {
            lap: window + 1,
            average: points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64,
        })
        .collect();
    BinnedLapAverages::Averages(averages)
}
