// Plain text rendering of the app's screens for the terminal

use std::fmt::Write;

use crate::{
    comparison::DriverCard,
    openf1::{DriverInfo, SessionResultItem},
    telemetry::{BinnedLapAverages, Channel, ChartPoint, LapStatistics},
};

pub const NO_DATA_MESSAGE: &str = "No data for this selection.";

pub fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(seconds) => format!("{seconds:.3} s"),
        None => "N/A".to_string(),
    }
}

/// Race times above a minute read as `m:ss.sss`.
pub fn format_time(value: Option<f64>) -> String {
    match value.filter(|s| s.is_finite() && *s > 0.) {
        None => "—".to_string(),
        Some(seconds) => {
            let mins = (seconds / 60.).floor();
            let secs = seconds - mins * 60.;
            if mins > 0. {
                format!("{}:{:06.3}", mins as u64, secs)
            } else {
                format!("{seconds:.3} s")
            }
        }
    }
}

pub fn format_speed_trap(value: Option<i64>) -> String {
    match value {
        Some(speed) => format!("{speed} km/h"),
        None => "N/A".to_string(),
    }
}

fn stats_row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<18}{value:>14}");
}

pub fn render_driver_header(driver: &DriverInfo) -> String {
    let mut header = format!("{} No. {}", driver.name, driver.driver_number);
    if let Some(code) = &driver.code {
        let _ = write!(header, " • {code}");
    }
    let _ = write!(
        header,
        " | {}",
        driver.team.as_deref().unwrap_or("Unknown Team")
    );
    header
}

pub fn render_stats(stats: &LapStatistics) -> String {
    let mut out = String::new();
    if stats.is_empty() {
        let _ = writeln!(out, "  {NO_DATA_MESSAGE}");
        return out;
    }
    stats_row(&mut out, "Laps completed", &stats.lap_count.to_string());
    stats_row(&mut out, "Best lap", &format_seconds(stats.best_lap_time));
    stats_row(&mut out, "Average lap", &format_seconds(stats.average_lap_time));
    stats_row(&mut out, "Best Sector 1", &format_seconds(stats.best_sector_1));
    stats_row(&mut out, "Best Sector 2", &format_seconds(stats.best_sector_2));
    stats_row(&mut out, "Best Sector 3", &format_seconds(stats.best_sector_3));
    stats_row(
        &mut out,
        "Best speed trap",
        &format_speed_trap(stats.best_speed_trap),
    );
    out
}

pub fn render_card(title: &str, card: &DriverCard) -> String {
    format!(
        "{title}\n  {}\n{}",
        render_driver_header(&card.driver),
        render_stats(&card.stats)
    )
}

pub fn render_result_row(item: &SessionResultItem) -> String {
    let position = match item.position {
        0 => "NC".to_string(),
        p => format!("P{p}"),
    };
    format!(
        "{position:<4}{:<24}{:<20}laps {:>3}  time {:>12}  gap {:>10}  {}",
        item.name,
        item.team.as_deref().unwrap_or("N/A"),
        item.laps,
        format_time(item.duration),
        format_time(item.gap),
        item.status
    )
}

pub fn render_series(channel: &Channel, points: &[ChartPoint]) -> String {
    let mut out = format!("{}\n", channel.label());
    if points.is_empty() {
        let _ = writeln!(out, "  {NO_DATA_MESSAGE}");
        return out;
    }
    for point in points {
        let _ = writeln!(out, "  {:>7}  {:.1}", point.index, point.value);
    }
    out
}

pub fn render_binned(channel: &Channel, binned: &BinnedLapAverages) -> String {
    let mut out = format!("{} per lap\n", channel.label());
    match binned {
        BinnedLapAverages::NoValidData => {
            let _ = writeln!(out, "  {NO_DATA_MESSAGE}");
        }
        BinnedLapAverages::Averages(averages) => {
            for average in averages {
                let _ = writeln!(out, "  Lap {:>3}  {:.2}", average.lap, average.average);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openf1::ResultStatus;
    use crate::telemetry::LapAverage;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Some(91.2344)), "91.234 s");
        assert_eq!(format_seconds(None), "N/A");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(None), "—");
        assert_eq!(format_time(Some(0.)), "—");
        assert_eq!(format_time(Some(-1.)), "—");
        assert_eq!(format_time(Some(3.2)), "3.200 s");
        assert_eq!(format_time(Some(91.5)), "1:31.500");
        assert_eq!(format_time(Some(5409.125)), "90:09.125");
    }

    #[test]
    fn test_render_stats() {
        let stats = LapStatistics {
            lap_count: 12,
            best_lap_time: Some(91.234),
            best_sector_1: Some(29.5),
            best_sector_2: None,
            best_sector_3: Some(31.),
            average_lap_time: Some(93.1),
            best_speed_trap: Some(340),
        };

        let text = render_stats(&stats);

        assert!(text.contains("Laps completed"));
        assert!(text.contains("91.234 s"));
        assert!(text.contains("340 km/h"));
        assert!(text.contains("N/A"));
        assert!(render_stats(&LapStatistics::default()).contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_render_result_row() {
        let item = SessionResultItem {
            position: 0,
            driver_number: 2,
            name: "Logan SARGEANT".to_string(),
            team: None,
            duration: None,
            gap: None,
            laps: 12,
            status: ResultStatus::Dnf,
            headshot_url: None,
        };

        let row = render_result_row(&item);

        assert!(row.starts_with("NC"));
        assert!(row.ends_with("DNF"));
        assert!(row.contains("laps  12"));
    }

    #[test]
    fn test_render_binned_no_data() {
        let text = render_binned(&Channel::Speed, &BinnedLapAverages::NoValidData);
        assert!(text.contains(NO_DATA_MESSAGE));

        let text = render_binned(
            &Channel::Speed,
            &BinnedLapAverages::Averages(vec![LapAverage {
                lap: 1,
                average: 175.,
            }]),
        );
        assert!(text.contains("Lap   1  175.00"));
    }
}
