use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::F1TelemetryError;
use crate::telemetry::{Channel, DEFAULT_WINDOW_SIZE};

const CONFIG_DIR_NAME: &str = "f1telemetry";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Samples averaged into one point of a per-lap chart
    pub window_size: NonZeroUsize,
    pub default_season: u16,
    pub seasons: Vec<u16>,
    pub default_channel: Channel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            default_season: 2025,
            seasons: vec![2023, 2024, 2025],
            default_channel: Channel::Speed,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, F1TelemetryError> {
        Ok(dirs::config_dir()
            .ok_or(F1TelemetryError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Reads the config at `path`, or at the default location when `None`. A missing
    /// file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, F1TelemetryError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Ok(p) => p,
                Err(F1TelemetryError::NoConfigDir) => {
                    debug!("No config directory on this platform, using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e),
            },
        };

        if !config_path.exists() {
            debug!("No config file at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        let file = std::fs::File::open(&config_path)
            .map_err(|e| F1TelemetryError::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| F1TelemetryError::ConfigParseError { source: e })?;
        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, F1TelemetryError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| F1TelemetryError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(&config_path)
            .map_err(|e| F1TelemetryError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| F1TelemetryError::ConfigSerializeError { source: e })?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(dir.path().join("config.json").as_path())).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window_size.get(), 400);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            window_size: NonZeroUsize::new(250).unwrap(),
            default_channel: Channel::Rpm,
            ..Default::default()
        };

        let saved_to = config.save(Some(path.as_path())).unwrap();

        assert_eq!(saved_to, path);
        assert_eq!(AppConfig::load(Some(path.as_path())).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_channel": "n_gear"}"#).unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();

        assert_eq!(config.default_channel, Channel::Gear);
        assert_eq!(config.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(config.default_season, 2025);
    }

    #[test]
    fn test_zero_window_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"window_size": 0}"#).unwrap();

        match AppConfig::load(Some(path.as_path())) {
            Err(F1TelemetryError::ConfigParseError { .. }) => {}
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }
}
