//! Environment-driven settings for opening the store and its logs.
//!
//! # Invariants
//! - Parsing never panics; bad values surface as `ConfigError`.
//! - Unset variables fall back to documented defaults.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "MEALSTORE_DB_PATH";
pub const ENV_BUSY_TIMEOUT_MS: &str = "MEALSTORE_BUSY_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "MEALSTORE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MEALSTORE_LOG_DIR";

/// Busy timeout applied when no override is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Private in-memory database, discarded with its connection.
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Short label used in log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
        }
    }
}

/// Settings needed to open a store connection and start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database: DatabaseLocation,
    pub busy_timeout: Duration,
    /// Normalized level, one of `trace|debug|info|warn|error`.
    pub log_level: &'static str,
    /// Absolute log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Reads settings through `lookup`, which maps a variable name to its raw value.
    ///
    /// Blank values are treated as unset. The database path may be any OS
    /// string; every other value must be valid UTF-8.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DB_PATH) {
            let text = raw.to_str().map(|text| text.trim().to_string());
            let path = match text {
                Some(text) if text.is_empty() => None,
                Some(text) => Some(PathBuf::from(text)),
                None => Some(PathBuf::from(raw)),
            };
            if let Some(path) = path {
                config.database = DatabaseLocation::File(path);
            }
        }

        if let Some(raw) = read_text(&lookup, ENV_BUSY_TIMEOUT_MS)? {
            let millis = raw
                .parse::<u64>()
                .map_err(|err| ConfigError::invalid(ENV_BUSY_TIMEOUT_MS, &raw, err.to_string()))?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = read_text(&lookup, ENV_LOG_LEVEL)? {
            config.log_level = normalize_level(&raw)
                .map_err(|message| ConfigError::invalid(ENV_LOG_LEVEL, &raw, message))?;
        }

        if let Some(raw) = read_text(&lookup, ENV_LOG_DIR)? {
            let dir = normalize_log_dir(&raw)
                .map_err(|message| ConfigError::invalid(ENV_LOG_DIR, &raw, message))?;
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

/// Returns the trimmed UTF-8 value of `key`, `None` when unset or blank.
fn read_text<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let text = raw
        .into_string()
        .map_err(|raw| ConfigError::invalid(key, &raw.to_string_lossy(), "value is not valid UTF-8"))?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                message,
            } => write!(f, "invalid {key} value `{value}`: {message}"),
        }
    }
}

impl Error for ConfigError {}
