//! Configuration management for reelkit.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Defaults for every missing section or key
//! - Validation on load
//!
//! # Example
//!
//! ```no_run
//! use reel_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/reelkit.toml");
//! config.load_or_default().unwrap();
//!
//! println!("Encoder: {}", config.settings().stitch.video_codec);
//! ```

mod manager;
mod settings;

use std::path::PathBuf;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{LoggingSettings, MkvSettings, Settings, StitchSettings, ToolSettings};

/// Default config path: .config/reelkit.toml (relative to current working directory)
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("reelkit.toml")
}
