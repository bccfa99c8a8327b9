//! Runtime configuration resolved from the process environment.
//!
//! - `SERENE_DB_PATH`: SQLite file backing the stores
//!   (default `<temp dir>/serene.sqlite3`).
//! - `SERENE_TZ`: `local`, `utc` or an IANA zone name (default `local`).
//! - `SERENE_LOG_LEVEL`: trace, debug, info, warn or error (default by build mode).
//! - `SERENE_LOG_DIR`: absolute directory for rolling logs
//!   (default `<temp dir>/serene-logs`).
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, init_logging, normalize_level};
use crate::model::day_key::TimeZoneSource;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SERENE_DB_PATH";
pub const TIME_ZONE_ENV: &str = "SERENE_TZ";
pub const LOG_LEVEL_ENV: &str = "SERENE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SERENE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "serene.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "serene-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTimeZone(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeZone(value) => write!(
                f,
                "invalid {TIME_ZONE_ENV} `{value}`; expected local|utc|<IANA zone>"
            ),
            Self::InvalidLogLevel(message) => write!(f, "invalid {LOG_LEVEL_ENV}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub time_zone: TimeZoneSource,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            time_zone: TimeZoneSource::Local,
            log_level: default_log_level(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(zone) = read(TIME_ZONE_ENV) {
            config.time_zone = TimeZoneSource::parse(&zone)
                .ok_or_else(|| ConfigError::InvalidTimeZone(zone.clone()))?;
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Starts rolling logs at the configured level and directory.
    pub fn start_logging(&self) -> Result<(), String> {
        init_logging(self.log_level, &self.log_dir.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV, TIME_ZONE_ENV,
    };
    use crate::model::day_key::TimeZoneSource;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.time_zone, TimeZoneSource::Local);
    }

    #[test]
    fn reads_all_variables() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, " /var/lib/serene/data.sqlite3 "),
            (TIME_ZONE_ENV, "Asia/Tokyo"),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, "/var/log/serene"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/serene/data.sqlite3"));
        assert_eq!(config.time_zone.label(), "Asia/Tokyo");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/serene"));
    }

    #[test]
    fn rejects_unknown_zone_and_level() {
        let zone_err = CoreConfig::from_lookup(lookup(&[(TIME_ZONE_ENV, "Nowhere/City")]))
            .unwrap_err();
        assert_eq!(
            zone_err,
            ConfigError::InvalidTimeZone("Nowhere/City".to_string())
        );

        let level_err =
            CoreConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "verbose")])).unwrap_err();
        assert!(matches!(level_err, ConfigError::InvalidLogLevel(_)));
    }
}
