use std::env;
use std::path::PathBuf;

use crate::data::model::TimeBase;

/// Data file used when `WEATHER_DATA_PATH` is not set.
pub const DEFAULT_DATA_PATH: &str = "bme280_data.parquet";

#[derive(Debug, Clone)]
pub struct Config {
    /// Sensor data file opened at startup.
    pub data_path: PathBuf,
    /// Zone used to turn epoch seconds into calendar time.
    pub time_base: TimeBase,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            time_base: TimeBase::Local,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `WEATHER_TIME_BASE` is not `local` or `utc`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("WEATHER_DATA_PATH").ok(),
            env::var("WEATHER_TIME_BASE").ok(),
        )
    }

    fn from_vars(
        data_path: Option<String>,
        time_base: Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_path = data_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let time_base = match time_base {
            Some(raw) => TimeBase::parse(&raw)
                .ok_or_else(|| ConfigError::Invalid("WEATHER_TIME_BASE", raw))?,
            None => defaults.time_base,
        };

        Ok(Self {
            data_path,
            time_base,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_vars(None, None).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.time_base, TimeBase::Local);
    }

    #[test]
    fn blank_path_falls_back_to_default() {
        let cfg = Config::from_vars(Some("  ".into()), Some("UTC".into())).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.time_base, TimeBase::Utc);
    }

    #[test]
    fn unknown_time_base_is_rejected() {
        let err = Config::from_vars(Some("/data/x.parquet".into()), Some("mars".into()))
            .unwrap_err();
        assert!(err.to_string().contains("WEATHER_TIME_BASE"));
    }
}
