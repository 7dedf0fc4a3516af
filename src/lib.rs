// Library interface for f1telemetry
// This allows integration tests and benches to access internal modules

pub mod comparison;
pub mod config;
pub mod errors;
pub mod loader;
pub mod openf1;
pub mod report;
pub mod telemetry;
pub mod writer;

// Re-export commonly used types
pub use comparison::{DriverCard, DriverComparison, compare_drivers};
pub use config::AppConfig;
pub use errors::F1TelemetryError;
pub use openf1::{DriverInfo, MeetingInfo, SessionInfo, SessionResultItem};
pub use telemetry::{
    BinnedLapAverages, Channel, ChartPoint, LapRecord, LapStatistics, TelemetrySample,
    compute_binned_lap_averages, compute_chart_series, compute_lap_statistics,
};
