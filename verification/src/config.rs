//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use vouch_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("verified_threshold_percent must lie in 0..=100, got {0}")]
    ThresholdOutOfRange(f64),
}

/// Configuration for the reconciliation engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty document is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Share of verified claims (percent) at which a resume is `VERIFIED`.
    #[serde(default = "default_threshold")]
    pub verified_threshold_percent: f64,

    /// Upper bound on any single ledger call.
    #[serde(default = "default_timeout_ms")]
    pub ledger_timeout_ms: u64,

    /// Upper bound on any single directory lookup.
    #[serde(default = "default_timeout_ms")]
    pub directory_timeout_ms: u64,

    /// Upper bound on any single store read or write.
    #[serde(default = "default_timeout_ms")]
    pub store_timeout_ms: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_threshold() -> f64 {
    75.0
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.verified_threshold_percent;
        if !(0.0..=100.0).contains(&t) {
            return Err(ConfigError::ThresholdOutOfRange(t));
        }
        Ok(())
    }

    pub fn ledger_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger_timeout_ms)
    }

    pub fn directory_timeout(&self) -> Duration {
        Duration::from_millis(self.directory_timeout_ms)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verified_threshold_percent: default_threshold(),
            ledger_timeout_ms: default_timeout_ms(),
            directory_timeout_ms: default_timeout_ms(),
            store_timeout_ms: default_timeout_ms(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
