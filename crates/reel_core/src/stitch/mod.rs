//! Concatenate `.mov`/`.mp4` clips and encode them to HEVC with ffmpeg.
//!
//! The pipeline probes every input with ffprobe, refuses to encode when any
//! input differs from the target resolution, orders the inputs, writes a
//! concat demuxer manifest and hands everything to a single ffmpeg run.

mod encode;
mod errors;
mod files;
mod manifest;
mod probe;
mod stitcher;
mod validate;

pub use encode::{encode_command, EncodeTarget};
pub use errors::{Mismatch, StitchError, StitchResult};
pub use files::{is_video_file, list_video_files, sort_video_files, sorted_video_files};
pub use manifest::{manifest_line, render_manifest, write_manifest};
pub use probe::{format_duration, modified_time, parse_frame_rate, parse_probe_json, probe_video};
pub use stitcher::{report_error, stitch, StitchContext, StitchOptions, StitchOutcome};
pub use validate::{find_mismatches, print_details};
