//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Fatigue baseline
//! - Health data provider selection
//! - Notification switches
//! - Estimator tuning (sedentary threshold, overnight window)
//!
//! Configuration is stored at `~/.config/recharge/config.toml`. Every
//! field has a serde default, so a partial or missing file always loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::estimator::{SedentaryConfig, SleepEstimatorConfig};
use crate::fatigue::DEFAULT_BASELINE;
use crate::health::HealthProvider;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Starting fatigue score for a fresh day (0-100)
    #[serde(default = "default_baseline")]
    pub baseline: u8,
    /// Health data source
    #[serde(default)]
    pub health_provider: HealthProvider,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub sedentary: SedentaryConfig,
    #[serde(default)]
    pub sleep_estimator: SleepEstimatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            health_provider: HealthProvider::default(),
            notifications: NotificationsConfig::default(),
            sedentary: SedentaryConfig::default(),
            sleep_estimator: SleepEstimatorConfig::default(),
        }
    }
}

fn default_baseline() -> u8 {
    DEFAULT_BASELINE
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Path of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/recharge"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing. A file that exists but fails to parse is an error -- the
    /// user should hear about a broken config rather than silently losing
    /// their settings.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let mut config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        if config.baseline > 100 {
            return Err(ConfigError::InvalidValue {
                key: "baseline".to_string(),
                message: format!("{} is outside 0..=100", config.baseline),
            });
        }
        // Degenerate estimator settings would disable detection entirely.
        if config.sedentary.threshold_minutes == 0 {
            config.sedentary.threshold_minutes = SedentaryConfig::default().threshold_minutes;
        }
        Ok(config)
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}
