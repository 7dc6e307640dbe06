//! Configuration module for davdrive.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation and defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for davdrive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub transfers: TransfersConfig,
    pub auto_upload: AutoUploadConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the sync server, e.g. `https://cloud.example.org`.
    pub base_url: String,
}

/// Transfer runner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransfersConfig {
    /// Maximum retry attempts for a connectivity-failed transfer.
    pub max_retries: u32,
    /// Base delay between retry attempts, in seconds (doubled per attempt).
    pub retry_backoff_secs: u64,
}

/// Folder auto-upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoUploadConfig {
    /// Whether folder auto-upload is active.
    pub enabled: bool,
    /// Local folder to watch for new content.
    pub source_dir: PathBuf,
    /// Remote folder receiving the uploads.
    pub target_dir: String,
    /// On-completion behavior: `MOVE`, `COPY` or `FORGET`.
    pub behavior: String,
    /// Only upload on unmetered connections.
    pub wifi_only: bool,
}

/// App-lock settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Number of passcode digits. Values below 4 are clamped to 4 at use.
    pub passcode_digits: u32,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Path to the log file.
    pub file: PathBuf,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/davdrive/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("davdrive")
            .join("config.yaml")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
        }
    }
}

impl Default for TransfersConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff_secs: 10,
        }
    }
}

impl Default for AutoUploadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            source_dir: dirs::picture_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("~")),
            target_dir: "/CameraUpload".to_string(),
            behavior: "FORGET".to_string(),
            wifi_only: true,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { passcode_digits: 4 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: dirs::state_dir()
                .unwrap_or_else(|| PathBuf::from("~/.local/state"))
                .join("davdrive")
                .join("davdrive.log"),
        }
    }
}
