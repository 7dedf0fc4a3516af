use serde::{Deserialize, Serialize};

use super::{Channel, TelemetrySample};

/// A single plotted value. `index` is the sample's position in the session feed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub index: usize,
    pub value: f64,
}

impl From<(usize, f64)> for ChartPoint {
    fn from((index, value): (usize, f64)) -> Self {
        Self { index, value }
    }
}

/// Lazy series of one channel over a slice of samples.
///
/// Samples without a usable value for the channel are skipped; the remaining points
/// keep their original position as index, so gaps stay visible on the x axis. Clone
/// the series to walk it again from the start.
#[derive(Clone, Debug)]
pub struct ChartSeries<'a> {
    samples: std::iter::Enumerate<std::slice::Iter<'a, TelemetrySample>>,
    channel: &'a Channel,
}

impl Iterator for ChartSeries<'_> {
    type Item = ChartPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let channel = self.channel;
        self.samples.by_ref().find_map(|(index, sample)| {
            sample
                .metric(channel)
                .map(|value| ChartPoint { index, value })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.samples.size_hint().1)
    }
}

pub fn compute_chart_series<'a>(
    samples: &'a [TelemetrySample],
    channel: &'a Channel,
) -> ChartSeries<'a> {
    ChartSeries {
        samples: samples.iter().enumerate(),
        channel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use serde_json::Value;

    fn speed_samples() -> Vec<TelemetrySample> {
        vec![
            TelemetrySample::from_pairs([("speed", Value::from(350))]),
            TelemetrySample::from_pairs([("speed", Value::from("NaN"))]),
            TelemetrySample::from_pairs([("speed", Value::from(410))]),
            TelemetrySample::from_pairs([("speed", Value::from(0))]),
        ]
    }

    #[test]
    fn test_keeps_original_positions() {
        let samples = speed_samples();
        let series = compute_chart_series(&samples, &Channel::Speed).collect_vec();

        assert_eq!(
            series,
            vec![
                ChartPoint::from((0, 350.)),
                ChartPoint::from((2, 410.)),
                ChartPoint::from((3, 0.)),
            ]
        );
    }

    #[test]
    fn test_unknown_channel_is_empty() {
        let samples = speed_samples();
        let channel = Channel::Other("tyre_pressure".to_string());
        assert_eq!(compute_chart_series(&samples, &channel).count(), 0);
    }

    #[test]
    fn test_missing_keys_are_skipped() {
        let samples = vec![
            TelemetrySample::from_pairs([("rpm", 10500)]),
            TelemetrySample::from_pairs([("speed", 120)]),
            TelemetrySample::default(),
            TelemetrySample::from_pairs([("rpm", 11200)]),
        ];
        let indices = compute_chart_series(&samples, &Channel::Rpm)
            .map(|p| p.index)
            .collect_vec();
        assert_eq!(indices, vec![0, 3]);
    }

    #[test]
    fn test_series_is_restartable() {
        let samples = speed_samples();
        let series = compute_chart_series(&samples, &Channel::Speed);
        let first = series.clone().collect_vec();
        let second = series.collect_vec();
        assert_eq!(first, second);
    }
}
