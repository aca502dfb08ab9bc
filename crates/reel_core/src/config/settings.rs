//! Settings struct with TOML-based sections.
//!
//! Every section and key is optional in the file; anything missing takes the
//! default below.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::{ColorMode, LogLevel};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Encoder parameters for the stitcher.
    #[serde(default)]
    pub stitch: StitchSettings,

    /// MKV processing safety settings.
    #[serde(default)]
    pub mkv: MkvSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Optional absolute paths that take precedence over `PATH` lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffprobe: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkvinfo: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkvmerge: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkvpropedit: Option<PathBuf>,
}

impl ToolSettings {
    /// Configured overrides keyed by tool name.
    pub fn overrides(&self) -> BTreeMap<String, PathBuf> {
        [
            ("ffmpeg", &self.ffmpeg),
            ("ffprobe", &self.ffprobe),
            ("mkvinfo", &self.mkvinfo),
            ("mkvmerge", &self.mkvmerge),
            ("mkvpropedit", &self.mkvpropedit),
        ]
        .into_iter()
        .filter_map(|(tool, path)| path.clone().map(|p| (tool.to_string(), p)))
        .collect()
    }
}

/// Encoder parameters used when building the ffmpeg command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchSettings {
    /// Video encoder passed to `-c:v`.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Encoder preset passed to `-preset`.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Target bitrate (`-b:v`).
    #[serde(default = "default_bitrate")]
    pub bitrate: String,

    /// Peak bitrate (`-maxrate`).
    #[serde(default = "default_maxrate")]
    pub maxrate: String,

    /// Rate control buffer size (`-bufsize`).
    #[serde(default = "default_bufsize")]
    pub bufsize: String,
}

fn default_video_codec() -> String {
    "hevc_videotoolbox".to_string()
}

fn default_preset() -> String {
    "slow".to_string()
}

fn default_bitrate() -> String {
    "75M".to_string()
}

fn default_maxrate() -> String {
    "100M".to_string()
}

fn default_bufsize() -> String {
    "150M".to_string()
}

impl Default for StitchSettings {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            preset: default_preset(),
            bitrate: default_bitrate(),
            maxrate: default_maxrate(),
            bufsize: default_bufsize(),
        }
    }
}

/// Safety settings for in-place MKV rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MkvSettings {
    /// A remux output must be strictly larger than this fraction of the
    /// original file to replace it.
    #[serde(default = "default_min_size_ratio")]
    pub min_size_ratio: f64,

    /// Also apply the size check when stripping subtitles.
    #[serde(default)]
    pub guard_subtitle_removal: bool,
}

fn default_min_size_ratio() -> f64 {
    0.5
}

impl Default for MkvSettings {
    fn default() -> Self {
        Self {
            min_size_ratio: default_min_size_ratio(),
            guard_subtitle_removal: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Diagnostic level when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// Colored terminal output.
    #[serde(default)]
    pub color: ColorMode,

    /// Number of tool output lines to show on error (tail).
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,
}

fn default_level() -> LogLevel {
    LogLevel::Warn
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            color: ColorMode::default(),
            error_tail: default_error_tail(),
        }
    }
}
