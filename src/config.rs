//! Application configuration module
//!
//! Compare settings are persisted with `confy` in the OS-specific config
//! directory.

use crate::constant::{APP_NAME, DEFAULT_LOG_LEVEL};
use crate::render::SummaryMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Load from an explicit file instead of the platform location
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = confy::load_path(path)?;
        info!("Load config from {:?}", path);
        Ok(Self { settings })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, &self.settings)?;
        info!("Save config to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Re-compare automatically whenever either document changes
    #[serde(default = "default_true")]
    pub live_compare: bool,

    /// Attach character-level diffs to modified lines
    #[serde(default = "default_true")]
    pub char_level: bool,

    /// Strip `\n` / `\r\n` from line contents
    #[serde(default = "default_true")]
    pub trim_line_endings: bool,

    /// Report modified lines on their own or folded into -/+
    #[serde(default)]
    pub summary_mode: SummaryMode,

    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_compare: true,
            char_level: true,
            trim_line_endings: true,
            summary_mode: SummaryMode::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    fn temp_config_path() -> (PathBuf, PathBuf) {
        let test_dir = std::env::temp_dir().join(format!("test_config_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        let path = test_dir.join("config.toml");
        (test_dir, path)
    }

    #[test]
    fn test_save_and_load_settings() {
        let (test_dir, path) = temp_config_path();

        let config = Config {
            settings: Settings {
                live_compare: false,
                summary_mode: SummaryMode::Merged,
                log_level: "debug".to_string(),
                ..Settings::default()
            },
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.settings.live_compare);
        assert!(loaded.settings.char_level);
        assert_eq!(loaded.settings.summary_mode, SummaryMode::Merged);
        assert_eq!(loaded.settings.log_level, "debug");

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let (test_dir, path) = temp_config_path();
        fs::write(&path, "char_level = false\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.settings.char_level);
        assert!(loaded.settings.live_compare);
        assert!(loaded.settings.trim_line_endings);
        assert_eq!(loaded.settings.summary_mode, SummaryMode::Separate);
        assert_eq!(loaded.settings.log_level, DEFAULT_LOG_LEVEL);

        let _ = fs::remove_dir_all(&test_dir);
    }
}
