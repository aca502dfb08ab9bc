//! Media-related data structures (tracks, video stream details, input files).

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::enums::TrackKind;

/// Language recorded when mkvinfo prints no `Language:` line for a track.
pub const UNDEFINED_LANGUAGE: &str = "undefined";

/// Color transfer characteristics that mark a stream as HDR.
const HDR_TRANSFERS: [&str; 2] = ["smpte2084", "arib-std-b67"];

/// A single track within a Matroska container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track ID as understood by mkvmerge/mkvextract (not the track number).
    pub id: String,
    /// Type of track.
    pub kind: TrackKind,
    /// Language code (ISO 639-2, e.g. "eng", "jpn").
    pub language: String,
    /// Codec identifier (e.g. "A_AAC", "V_MPEGH/ISO/HEVC").
    pub codec: String,
}

impl Track {
    /// Create a new track.
    pub fn new(
        id: impl Into<String>,
        kind: TrackKind,
        language: impl Into<String>,
        codec: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            language: language.into(),
            codec: codec.into(),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Track ID {}: {} ({}) [{}]",
            self.id, self.kind, self.language, self.codec
        )
    }
}

/// Details of the first video stream of a file, as reported by ffprobe.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDetails {
    pub width: u32,
    pub height: u32,
    /// Frames per second, rounded to three decimals.
    pub fps: f64,
    pub pixel_format: String,
    pub color_space: String,
    pub color_transfer: String,
    pub color_primaries: String,
    /// Stream duration in seconds.
    pub duration: f64,
    /// Filesystem modification time.
    pub modified: DateTime<Local>,
}

impl VideoDetails {
    /// Whether the stream's color metadata marks it as HDR.
    ///
    /// Diagnostic only; it never affects validation.
    pub fn is_hdr(&self) -> bool {
        HDR_TRANSFERS.contains(&self.color_transfer.as_str()) || self.color_primaries == "bt2020"
    }

    /// Whether the stream has exactly the given dimensions.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// A candidate input file for the stitcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// File name within the input directory.
    pub name: String,
    /// Full path (input directory joined with the name).
    pub path: PathBuf,
    /// Filesystem modification time.
    pub modified: DateTime<Local>,
}
