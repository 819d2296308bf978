//! Configuration module for vdrive.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VdriveError};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/vdrive.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Drive behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
    /// Quota assumed when no external estimate is available, in megabytes.
    #[serde(default = "default_quota")]
    pub default_quota_mb: u64,
}

fn default_max_upload_size() -> u64 {
    10
}

fn default_quota() -> u64 {
    1024
}

impl DriveConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }

    /// Fallback quota in bytes.
    pub fn default_quota_bytes(&self) -> u64 {
        self.default_quota_mb * 1024 * 1024
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            max_upload_size_mb: default_max_upload_size(),
            default_quota_mb: default_quota(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Console-only logging when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Drive behavior configuration.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VdriveError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VdriveError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VDRIVE_DB_PATH`: Override the database file path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(db_path) = std::env::var("VDRIVE_DB_PATH") {
            if !db_path.is_empty() {
                self.database.path = db_path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The upload size limit is zero
    /// - The fallback quota is zero
    pub fn validate(&self) -> Result<()> {
        if self.drive.max_upload_size_mb == 0 {
            return Err(VdriveError::Config(
                "max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.drive.default_quota_mb == 0 {
            return Err(VdriveError::Config(
                "default_quota_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
