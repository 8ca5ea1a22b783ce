//! File-backed configuration for the profile shell.

use crate::error::config::ConfigError;
use crate::surface::notice::DEFAULT_NOTICE_LIMIT;
use crate::{DEFAULT_COMMAND_TIMEOUT, DISCOVERY_MAX_ATTEMPTS, DISCOVERY_RETRY_INTERVAL};

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

/// Transport tuning: discovery bounds and the per-command timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_discovery_attempts")]
    pub discovery_attempts: u32,

    #[serde(default = "default_discovery_interval_ms")]
    pub discovery_interval_ms: u64,

    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            discovery_attempts: default_discovery_attempts(),
            discovery_interval_ms: default_discovery_interval_ms(),
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

impl TransportConfig {
    pub fn discovery_interval(&self) -> Duration {
        Duration::from_millis(self.discovery_interval_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default = "default_notice_limit")]
    pub notice_limit: usize,

    #[serde(default = "default_show_tooltips")]
    pub show_tooltips: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            notice_limit: default_notice_limit(),
            show_tooltips: default_show_tooltips(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            transport: TransportConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_discovery_attempts() -> u32 {
    DISCOVERY_MAX_ATTEMPTS
}
fn default_discovery_interval_ms() -> u64 {
    DISCOVERY_RETRY_INTERVAL.as_millis() as u64
}
fn default_command_timeout_ms() -> u64 {
    DEFAULT_COMMAND_TIMEOUT.as_millis() as u64
}
fn default_notice_limit() -> usize {
    DEFAULT_NOTICE_LIMIT
}
fn default_show_tooltips() -> bool {
    true
}

impl AppConfig {
    /// Load config from `{config_dir}/config.json`.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error - silently replacing a corrupt config
    /// would lose whatever the user had set.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to `{config_dir}/config.json` using atomic write
    /// (temp file + rename).
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if self.transport.discovery_attempts == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("discovery_attempts must be at least 1"),
            });
        }

        if self.transport.command_timeout_ms == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("command_timeout_ms must be non-zero"),
            });
        }

        if self.ui.notice_limit == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("notice_limit must be at least 1"),
            });
        }

        Ok(())
    }
}
