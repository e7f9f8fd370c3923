//! Runtime configuration read from environment variables.
//!
//! # Invariants
//! - Missing variables fall back to defaults; malformed ones are rejected.
//! - Configuration loading has no side effects.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, normalize_level};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "QUILL_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "QUILL_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "QUILL_LOG_DIR";

/// Where the application database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbLocation,
    pub log_level: &'static str,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db: DbLocation::Memory,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db = if path == ":memory:" {
                DbLocation::Memory
            } else {
                DbLocation::File(PathBuf::from(path))
            };
        }

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }

        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(path);
        }

        Ok(config)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db {
            DbLocation::Memory => open_db_in_memory(),
            DbLocation::File(path) => open_db(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DbLocation, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db, DbLocation::Memory);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let dir = std::env::temp_dir().join("quill-logs");
        let dir_str = dir.to_str().expect("utf-8 temp dir");
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/var/lib/quill/quill.db"),
            (ENV_LOG_LEVEL, " WARNING "),
            (ENV_LOG_DIR, dir_str),
        ]))
        .expect("config");

        assert_eq!(
            config.db,
            DbLocation::File(PathBuf::from("/var/lib/quill/quill.db"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(dir));
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "  "), (ENV_LOG_DIR, "")]))
            .expect("config");
        assert_eq!(config.db, DbLocation::Memory);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn rejects_unknown_level_and_relative_dir() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")]))
            .expect_err("unknown level must fail");
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));

        let err = AppConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs")]))
            .expect_err("relative dir must fail");
        assert_eq!(err, ConfigError::RelativeLogDir("logs".to_string()));
    }

    #[test]
    fn opens_in_memory_database() {
        let conn = AppConfig::default().open_db().expect("in-memory db");
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .expect("user_version");
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
