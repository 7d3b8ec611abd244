//! Configuration
//!
//! Settings are read from TOML. Every field has a default, so an empty file (or no
//! file at all, via [`Config::load_or_default`]) is valid.
//!
//! ```toml
//! [alerts]
//! title = "Need Charging"
//! identifier = "batterywatch.low-battery"
//! cooldown_secs = 900   # omit to alert on every poll
//!
//! [logging]
//! filter = "batterywatch=debug"
//! ```
//!
//! The polling interval is fixed by the host and is not configurable here.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Low-battery alert settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "AlertConfig::default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Fixed notification identifier; stores that dedupe by id replace pending alerts.
    #[serde(default = "AlertConfig::default_identifier")]
    pub identifier: String,
    /// Minimum time between two alerts for the same device. `None` alerts every cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_secs: Option<u64>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            subtitle: None,
            identifier: Self::default_identifier(),
            cooldown_secs: None,
        }
    }
}

impl AlertConfig {
    fn default_title() -> String {
        "Need Charging".to_string()
    }

    fn default_identifier() -> String {
        "batterywatch.low-battery".to_string()
    }

    pub fn cooldown(&self) -> Option<Duration> {
        self.cooldown_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "LoggingConfig::default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
        }
    }
}

impl LoggingConfig {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// `<config dir>/batterywatch/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("batterywatch").join("config.toml"))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.alerts.identifier.trim().is_empty() {
            return Err(Error::Config("alerts.identifier must not be empty".into()));
        }
        if self.alerts.title.trim().is_empty() {
            return Err(Error::Config("alerts.title must not be empty".into()));
        }
        Ok(())
    }
}
