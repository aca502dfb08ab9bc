//! Config manager for loading and validating the settings file.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::settings::Settings;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid config value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_default()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consume the manager, keeping the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = parse_and_validate(&content)?;
        tracing::debug!("Loaded config from {}", self.config_path.display());
        Ok(())
    }

    /// Load config from file, keeping defaults if it doesn't exist.
    ///
    /// Unlike `load()`, a missing file is not an error. The file is never
    /// created: the tools only read configuration.
    pub fn load_or_default(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            self.settings = Settings::default();
            Ok(())
        }
    }
}

/// Parse and validate config content.
fn parse_and_validate(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = toml::from_str(content)?;

    let ratio = settings.mkv.min_size_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(ConfigError::Invalid {
            key: "mkv.min_size_ratio".to_string(),
            message: format!("{} is outside (0, 1]", ratio),
        });
    }

    Ok(settings)
}
