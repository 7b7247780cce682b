//! Configuration file support for cropband.
//!
//! This module provides serialization and deserialization of application settings,
//! allowing the demo shell to persist its preferences between runs.

use cropband_core::{DisplayMode, HitZones};
use serde::{Deserialize, Serialize};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration that is loaded on startup and saved on exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// How the image is fitted into the window
    #[serde(default)]
    pub display_mode: DisplayMode,

    /// Hit-test margins for the selection handles
    #[serde(default)]
    pub hit_zones: HitZones,

    /// Folder that cropped images are written to.
    /// Empty means "next to the source image".
    #[serde(default)]
    pub export_folder: String,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            display_mode: DisplayMode::default(),
            hit_zones: HitZones::default(),
            export_folder: String::new(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "cropband-config.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("cropband").join(Self::default_filename()))
        } else if let Some(home_dir) = dirs::home_dir() {
            Some(
                home_dir
                    .join(".config")
                    .join("cropband")
                    .join(Self::default_filename()),
            )
        } else {
            None
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = AppConfig::new();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.display_mode, DisplayMode::Fit);
        assert!(config.export_folder.is_empty());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let mut config = AppConfig::new();
        config.log_level = LogLevel::Trace;
        config.display_mode = DisplayMode::Native;
        config.hit_zones.edge_margin = 4;
        config.export_folder = "/tmp/crops".to_string();

        let json = config.to_json().unwrap();
        let loaded = AppConfig::from_json(&json).unwrap();

        assert_eq!(loaded.version, config.version);
        assert_eq!(loaded.log_level, LogLevel::Trace);
        assert_eq!(loaded.display_mode, DisplayMode::Native);
        assert_eq!(loaded.hit_zones.edge_margin, 4);
        assert_eq!(loaded.export_folder, "/tmp/crops");
    }

    #[test]
    fn test_config_rejects_newer_version() {
        let json = format!("{{\"version\": {}}}", CONFIG_VERSION + 1);
        match AppConfig::from_json(&json) {
            Err(ConfigError::VersionTooNew {
                file_version,
                supported_version,
            }) => {
                assert_eq!(file_version, CONFIG_VERSION + 1);
                assert_eq!(supported_version, CONFIG_VERSION);
            }
            other => panic!("Expected VersionTooNew, got {:?}", other),
        }
    }

    #[test]
    fn test_config_fills_missing_fields_with_defaults() {
        let json = format!("{{\"version\": {}}}", CONFIG_VERSION);
        let config = AppConfig::from_json(&json).unwrap();

        assert_eq!(config.log_level, LogLevel::default());
        assert_eq!(config.display_mode, DisplayMode::default());
        assert_eq!(config.hit_zones, HitZones::default());
        assert!(config.export_folder.is_empty());
    }
}
