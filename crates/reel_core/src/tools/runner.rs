//! Command runner for external process execution.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::types::{CommandOutput, ToolError, ToolResult};

/// A fully built command line for one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Logical tool name (used in errors and logs).
    tool: String,
    /// Resolved executable.
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(tool: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as lossy UTF-8 strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Whether any argument equals `value`.
    pub fn has_arg(&self, value: &str) -> bool {
        self.args.iter().any(|a| a == value)
    }

    /// Single-line rendering: tool name followed by the arguments.
    pub fn display(&self) -> String {
        let mut line = self.tool.clone();
        for arg in self.args_lossy() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }

    /// Multi-line rendering with every flag starting an indented line.
    pub fn display_pretty(&self) -> String {
        let mut line = self.tool.clone();
        for arg in self.args_lossy() {
            if arg.starts_with('-') {
                line.push_str("\n    ");
                line.push_str(&arg);
            } else {
                line.push(' ');
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Executes invocations.
///
/// Pipelines only talk to external tools through this trait, which keeps
/// every decision testable without the real binaries installed.
pub trait CommandRunner {
    /// Run to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit code is reported in the output, not as an error; use
    /// [`CommandOutput::check`] to enforce success.
    fn capture(&self, invocation: &Invocation) -> ToolResult<CommandOutput>;

    /// Run with inherited stdio (long-running encoders that print progress).
    ///
    /// Returns the exit code.
    fn stream(&self, invocation: &Invocation) -> ToolResult<i32>;
}

/// Runs real processes via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, invocation: &Invocation) -> ToolResult<CommandOutput> {
        tracing::debug!("Running: {}", invocation.display());

        let output = Command::new(invocation.program())
            .args(invocation.arguments())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ToolError::spawn(invocation.tool(), e))?;

        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!("{} exited with code {}", invocation.tool(), exit_code);

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code,
        })
    }

    fn stream(&self, invocation: &Invocation) -> ToolResult<i32> {
        tracing::debug!("Running (streaming): {}", invocation.display());

        let status = Command::new(invocation.program())
            .args(invocation.arguments())
            .status()
            .map_err(|e| ToolError::spawn(invocation.tool(), e))?;

        Ok(status.code().unwrap_or(-1))
    }
}
