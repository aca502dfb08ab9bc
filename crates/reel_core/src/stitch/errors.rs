//! Error types for the stitcher.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Resolution;
use crate::tools::ToolError;

/// An input whose dimensions differ from the target preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Error raised while validating, ordering or encoding inputs.
#[derive(Error, Debug)]
pub enum StitchError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// ffprobe could not describe a file.
    #[error("Could not check details of {}: {message}", .path.display())]
    Probe { path: PathBuf, message: String },

    /// One or more inputs do not match the target resolution.
    #[error(
        "{} file(s) don't match the target resolution ({})",
        .files.len(),
        size_label(.target)
    )]
    ResolutionMismatch {
        target: Resolution,
        files: Vec<Mismatch>,
    },

    /// The input directory holds no `.mov` or `.mp4` files.
    #[error("No .mov or .mp4 files found in {}", .0.display())]
    NoInputFiles(PathBuf),

    /// ffmpeg ran and exited unsuccessfully.
    #[error("Error during ffmpeg execution: exit code {0}")]
    EncodeFailed(i32),

    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

fn size_label(resolution: &Resolution) -> String {
    let (width, height) = resolution.dimensions();
    format!("{}x{}", width, height)
}

impl StitchError {
    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for stitch operations.
pub type StitchResult<T> = Result<T, StitchError>;
