//! Matroska file processing built on mkvtoolnix.
//!
//! A file goes through up to three steps, in order:
//! 1. Audio filter: keep only the audio tracks in one language (`mkvmerge`)
//! 2. Subtitle strip: drop every subtitle track (`mkvmerge`)
//! 3. Title normalization: set the segment title to the file stem
//!    (`mkvpropedit`)
//!
//! Remuxes write to a temp file beside the input and only replace the
//! original once the output passed its checks.

mod audio;
mod errors;
pub mod mkvinfo;
mod processor;
mod remux;
mod subtitles;
mod title;

pub use audio::{filter_audio, AudioDecision, AudioPlan};
pub use errors::{MkvError, MkvResult};
pub use mkvinfo::{parse_title, parse_tracks, read_mkvinfo, MkvInfo};
pub use processor::{process_mkv_file, validate_input, MkvOptions, MkvReport};
pub use subtitles::{strip_subtitles, SubtitleDecision};
pub use title::{expected_title, normalize_title, TitleDecision};

use crate::config::MkvSettings;
use crate::logging::Reporter;
use crate::tools::{CommandRunner, Toolbox};

/// Everything an MKV step needs besides the file itself.
pub struct MkvContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub toolbox: &'a Toolbox,
    pub reporter: &'a Reporter,
    pub settings: &'a MkvSettings,
    /// Report decisions and commands without running anything that writes.
    pub dry_run: bool,
}
