//! Error types for MKV processing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tools::ToolError;

/// Error raised while processing a Matroska file.
#[derive(Error, Debug)]
pub enum MkvError {
    /// The input file does not exist.
    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    /// The input file does not carry the `.mkv` extension.
    #[error("'{}' is not an MKV file.", .0.display())]
    NotMatroska(PathBuf),

    /// An mkvtoolnix command failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A remux produced an output too small to trust.
    #[error(
        "Output file is suspiciously small ({output_bytes} of {original_bytes} bytes). Operation aborted."
    )]
    SuspiciousOutput {
        original_bytes: u64,
        output_bytes: u64,
    },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl MkvError {
    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for MKV operations.
pub type MkvResult<T> = Result<T, MkvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = MkvError::NotMatroska(PathBuf::from("clip.mp4"));
        assert_eq!(err.to_string(), "'clip.mp4' is not an MKV file.");

        let err = MkvError::FileNotFound(PathBuf::from("gone.mkv"));
        assert_eq!(err.to_string(), "File 'gone.mkv' not found.");
    }

    #[test]
    fn tool_errors_pass_through() {
        let err: MkvError = ToolError::command_failed("mkvinfo", 2, "not a Matroska file").into();
        assert!(err.to_string().contains("mkvinfo failed with exit code 2"));
    }
}
