//! Process configuration for catalog front ends.
//!
//! Values come from the environment and may be overridden by the caller
//! (the CLI overrides them from flags).

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use rusqlite::Connection;
use std::path::PathBuf;

/// Database file path; unset means an in-memory store.
pub const DB_PATH_ENV: &str = "CINECAT_DB";
/// Log level (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_ENV: &str = "CINECAT_LOG_LEVEL";
/// Absolute log directory; unset disables file logging.
pub const LOG_DIR_ENV: &str = "CINECAT_LOG_DIR";

/// Resolved catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Reads the `CINECAT_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            db_path: non_blank(DB_PATH_ENV).map(PathBuf::from),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Checks the log level before anything is started.
    pub fn validate(&self) -> Result<(), LoggingError> {
        normalize_level(&self.log_level).map(|_| ())
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is disabled by configuration.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }

    /// Opens the configured store with migrations applied.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> CatalogConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(config_from(&[]), CatalogConfig::default());
    }

    #[test]
    fn environment_values_override_defaults() {
        let config = config_from(&[
            (DB_PATH_ENV, "/var/lib/cinecat/catalog.db"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/cinecat"),
        ]);
        assert_eq!(
            config.db_path,
            Some(PathBuf::from("/var/lib/cinecat/catalog.db"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/cinecat")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_values_are_ignored_and_bad_levels_fail_validation() {
        let config = config_from(&[(DB_PATH_ENV, "  "), (LOG_LEVEL_ENV, "chatty")]);
        assert_eq!(config.db_path, None);
        assert!(config.validate().is_err());
    }

    #[test]
    fn logging_is_skipped_without_directory() {
        assert!(!CatalogConfig::default().init_logging().unwrap());
    }

    #[test]
    fn default_config_opens_an_in_memory_store() {
        let conn = CatalogConfig::default().open_connection().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
