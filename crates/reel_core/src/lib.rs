//! reelkit core - orchestration logic for the media command-line tools.
//!
//! This crate contains everything except argument parsing: tool discovery,
//! process invocation, `mkvinfo`/`ffprobe` output parsing, and the decision
//! logic behind `process-mkv` and `hevc-stitcher`. The heavy lifting is
//! always delegated to the external binaries.

pub mod config;
pub mod fsutil;
pub mod logging;
pub mod mkv;
pub mod models;
pub mod stitch;
pub mod tools;
