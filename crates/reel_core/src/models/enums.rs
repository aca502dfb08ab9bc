//! Core enums used by both pipelines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of a track inside a Matroska container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Subtitles,
    /// Buttons, complex tracks, or anything `mkvinfo` labels differently.
    #[default]
    Other,
}

impl TrackKind {
    /// Map the `Track type:` value printed by mkvinfo.
    pub fn from_mkvinfo(value: &str) -> Self {
        match value.trim() {
            "video" => TrackKind::Video,
            "audio" => TrackKind::Audio,
            "subtitles" => TrackKind::Subtitles,
            _ => TrackKind::Other,
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Video => write!(f, "video"),
            TrackKind::Audio => write!(f, "audio"),
            TrackKind::Subtitles => write!(f, "subtitles"),
            TrackKind::Other => write!(f, "other"),
        }
    }
}

/// Named output resolution presets for the stitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[default]
    #[serde(rename = "4K")]
    Uhd4K,
}

impl Resolution {
    /// Pixel dimensions `(width, height)` of the preset.
    ///
    /// Note that `480p` maps to 640x360, matching the dimensions the
    /// encoder has always been given for that preset.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::P480 => (640, 360),
            Resolution::P720 => (1280, 720),
            Resolution::P1080 => (1920, 1080),
            Resolution::Uhd4K => (3840, 2160),
        }
    }

    /// Preset name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Resolution::P480 => "480p",
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
            Resolution::Uhd4K => "4K",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Processing order for stitched input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Lexicographic by file name.
    #[default]
    Filename,
    /// Chronological by filesystem modification time.
    CreationDate,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Filename => write!(f, "filename"),
            SortOrder::CreationDate => write!(f, "creation_date"),
        }
    }
}
