//! External tool plumbing.
//!
//! - **Discovery**: resolve `ffmpeg`, `mkvmerge` and friends against an
//!   explicit search path before any work starts
//! - **Invocation**: build command lines and run them through a
//!   [`CommandRunner`], capturing diagnostics on failure
//!
//! # Usage
//!
//! ```ignore
//! use reel_core::tools::{SystemRunner, ToolEnvironment, Toolbox};
//!
//! let toolbox = Toolbox::locate(&ToolEnvironment::from_env(), &["mkvinfo"], &overrides)?;
//! let output = SystemRunner.capture(&toolbox.command("mkvinfo").arg("movie.mkv"))?;
//! ```

mod locate;
mod runner;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use locate::{ToolEnvironment, Toolbox};
pub use runner::{CommandRunner, Invocation, SystemRunner};
pub use types::{CommandOutput, ToolError, ToolResult};

/// Tools required by `process-mkv`.
pub const MKV_TOOLS: [&str; 3] = ["mkvmerge", "mkvpropedit", "mkvinfo"];

/// Tools required by `hevc-stitcher`.
pub const STITCH_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];
