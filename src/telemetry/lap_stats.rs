use serde::{Deserialize, Serialize};

use super::{LapRecord, is_valid_duration, is_valid_speed_trap};

/// Summary of one driver's laps in one session, as shown on a comparison card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LapStatistics {
    /// Number of laps with a valid lap time, not the number of records
    pub lap_count: usize,
    pub best_lap_time: Option<f64>,
    pub best_sector_1: Option<f64>,
    pub best_sector_2: Option<f64>,
    pub best_sector_3: Option<f64>,
    pub average_lap_time: Option<f64>,
    /// Highest speed trap reading in km/h
    pub best_speed_trap: Option<i64>,
}

impl LapStatistics {
    /// True when no record contributed anything, so there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lap_count == 0
            && self.best_sector_1.is_none()
            && self.best_sector_2.is_none()
            && self.best_sector_3.is_none()
            && self.best_speed_trap.is_none()
    }
}

#[derive(Default)]
struct RunningMin(Option<f64>);

impl RunningMin {
    fn add(&mut self, candidate: Option<f64>) {
        if let Some(value) = candidate.filter(|v| is_valid_duration(*v)) {
            match self.0 {
                Some(cur) if cur <= value => {}
                _ => self.0 = Some(value),
            }
        }
    }
}

/// Reduces a driver's laps to best times, average lap time and best speed trap.
///
/// Each field of each record is checked on its own, so a record can count towards a
/// sector best without counting towards the lap average. Invalid values are skipped.
pub fn compute_lap_statistics<'a>(
    records: impl IntoIterator<Item = &'a LapRecord>,
) -> LapStatistics {
    let mut lap_count: usize = 0;
    let mut lap_sum = 0.;
    let mut best_lap = RunningMin::default();
    let mut best_sectors: [RunningMin; 3] = Default::default();
    let mut best_speed_trap: Option<i64> = None;

    for record in records {
        if let Some(lap) = record.lap_duration.filter(|d| is_valid_duration(*d)) {
            lap_count += 1;
            lap_sum += lap;
            best_lap.add(Some(lap));
        }

        let sectors = [
            record.sector_1_duration,
            record.sector_2_duration,
            record.sector_3_duration,
        ];
        for (best, sector) in best_sectors.iter_mut().zip(sectors) {
            best.add(sector);
        }

        if let Some(speed) = record.speed_trap_speed.filter(|s| is_valid_speed_trap(*s)) {
            // strict comparison keeps the first of equal readings
            if best_speed_trap.is_none_or(|best| speed > best) {
                best_speed_trap = Some(speed);
            }
        }
    }

    let [s1, s2, s3] = best_sectors;
    LapStatistics {
        lap_count,
        best_lap_time: best_lap.0,
        best_sector_1: s1.0,
        best_sector_2: s2.0,
        best_sector_3: s3.0,
        average_lap_time: (lap_count > 0).then(|| lap_sum / lap_count as f64),
        best_speed_trap,
    }
}
