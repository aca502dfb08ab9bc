//! Data models for reelkit.
//!
//! - Enums for track kinds, resolution presets and sort order
//! - Media structures (tracks, video stream details, input files)

mod enums;
mod media;

// Re-export all public types
pub use enums::{Resolution, SortOrder, TrackKind};
pub use media::{Track, VideoDetails, VideoFile, UNDEFINED_LANGUAGE};
