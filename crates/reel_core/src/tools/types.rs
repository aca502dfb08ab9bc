//! Error and output types for external tool execution.

use std::io;

use thiserror::Error;

/// Errors raised while locating or running an external tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool is not on the search path and has no configured override.
    #[error("{tool} is not found")]
    Missing { tool: String },

    /// The process could not be started at all.
    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },
}

impl ToolError {
    /// Create a missing tool error.
    pub fn missing(tool: impl Into<String>) -> Self {
        Self::Missing { tool: tool.into() }
    }

    /// Create a spawn error.
    pub fn spawn(tool: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            tool: tool.into(),
            source,
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Diagnostic output captured from the tool, if any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            ToolError::CommandFailed { message, .. } if !message.trim().is_empty() => {
                Some(message)
            }
            _ => None,
        }
    }
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code (-1 when terminated by a signal).
    pub exit_code: i32,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Turn an exit code above `max_ok_code` into a [`ToolError::CommandFailed`].
    ///
    /// The error message prefers stderr and falls back to stdout, since some
    /// tools (mkvmerge) report errors on stdout.
    pub fn check(self, tool: &str, max_ok_code: i32) -> ToolResult<Self> {
        if (0..=max_ok_code).contains(&self.exit_code) {
            return Ok(self);
        }
        let message = if self.stderr.trim().is_empty() {
            self.stdout.trim().to_string()
        } else {
            self.stderr.trim().to_string()
        };
        Err(ToolError::command_failed(tool, self.exit_code, message))
    }
}
