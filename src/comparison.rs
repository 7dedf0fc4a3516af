use serde::Serialize;

use crate::{
    errors::F1TelemetryError,
    openf1::DriverInfo,
    telemetry::{LapRecord, LapStatistics, compute_lap_statistics},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriverCard {
    pub driver: DriverInfo,
    pub stats: LapStatistics,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriverComparison {
    pub driver_a: DriverCard,
    pub driver_b: DriverCard,
}

/// Laps of one driver out of a session-wide `laps` export.
pub fn driver_laps(laps: &[LapRecord], driver_number: u32) -> impl Iterator<Item = &LapRecord> {
    laps.iter()
        .filter(move |lap| lap.driver_number == Some(driver_number))
}

pub fn find_driver(
    drivers: &[DriverInfo],
    driver_number: u32,
) -> Result<&DriverInfo, F1TelemetryError> {
    drivers
        .iter()
        .find(|d| d.driver_number == driver_number)
        .ok_or(F1TelemetryError::UnknownDriver { driver_number })
}

pub fn driver_card(
    drivers: &[DriverInfo],
    laps: &[LapRecord],
    driver_number: u32,
) -> Result<DriverCard, F1TelemetryError> {
    let driver = find_driver(drivers, driver_number)?;
    Ok(DriverCard {
        driver: driver.clone(),
        stats: compute_lap_statistics(driver_laps(laps, driver_number)),
    })
}

/// Builds side by side lap statistics for two different drivers of the same session.
pub fn compare_drivers(
    drivers: &[DriverInfo],
    laps: &[LapRecord],
    driver_a: u32,
    driver_b: u32,
) -> Result<DriverComparison, F1TelemetryError> {
    if driver_a == driver_b {
        return Err(F1TelemetryError::InvalidUserInput {
            field: "driver".to_string(),
            reason: "select two different drivers".to_string(),
        });
    }

    Ok(DriverComparison {
        driver_a: driver_card(drivers, laps, driver_a)?,
        driver_b: driver_card(drivers, laps, driver_b)?,
    })
}
