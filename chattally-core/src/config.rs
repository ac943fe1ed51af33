//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/chattally/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/chattally/` (~/.config/chattally/)
//! - Data: `$XDG_DATA_HOME/chattally/` (~/.local/share/chattally/)
//! - State/Logs: `$XDG_STATE_HOME/chattally/` (~/.local/state/chattally/)

use crate::error::{Error, Result};
use crate::host::Settings;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Tracking toggles
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which activity gets counted, and how command responses are delivered.
#[derive(Debug, Deserialize, Clone)]
pub struct TrackingConfig {
    /// Count message-created and message-edited events
    #[serde(default = "default_true")]
    pub track_messages: bool,

    /// Count reaction-added events
    #[serde(default = "default_true")]
    pub track_reactions: bool,

    /// Send command responses as the user's own message instead of an
    /// ephemeral system-style message
    #[serde(default)]
    pub send_as_user: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            track_messages: true,
            track_reactions: true,
            send_as_user: false,
        }
    }
}

impl Settings for TrackingConfig {
    fn track_messages(&self) -> bool {
        self.track_messages
    }

    fn track_reactions(&self) -> bool {
        self.track_reactions
    }

    fn send_as_user(&self) -> bool {
        self.send_as_user
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/chattally/config.toml`
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("chattally").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite store)
    ///
    /// `$XDG_DATA_HOME/chattally/`
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("chattally")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/chattally/`
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("chattally")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/chattally/stats.db`
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("stats.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/chattally/chattally.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("chattally.log")
    }
}
