//! Logging types and configuration.

use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

/// Log level for filtering diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information.
    Debug,
    /// General information.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

impl LogLevel {
    /// Raise verbosity by `steps` levels (saturating at trace).
    pub fn more_verbose(self, steps: u8) -> Self {
        let order = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = order.iter().position(|l| *l == self).unwrap_or(0);
        order[(current + steps as usize).min(order.len() - 1)]
    }
}

/// When to emit ANSI colors on user-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Decide whether to color stdout output.
    pub fn enabled(&self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// ANSI styles used by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Blue,
    Green,
    Yellow,
    Red,
    Bold,
    Plain,
}

impl Style {
    fn code(&self) -> &'static str {
        match self {
            Style::Blue => "\x1b[94m",
            Style::Green => "\x1b[92m",
            Style::Yellow => "\x1b[93m",
            Style::Red => "\x1b[91m",
            Style::Bold => "\x1b[1m",
            Style::Plain => "",
        }
    }

    /// Wrap `text` in this style when `enabled`.
    pub fn paint(&self, text: &str, enabled: bool) -> String {
        if !enabled || *self == Style::Plain {
            return text.to_string();
        }
        format!("{}{}\x1b[0m", self.code(), text)
    }
}

/// Message prefix types for consistent formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
    /// Shell command: `$ command`
    Command,
    /// Success: `[SUCCESS]`
    Success,
    /// Warning: `[WARNING]`
    Warning,
    /// Error: `[ERROR]`
    Error,
    /// Suppressed mutation: `[DRY RUN]`
    DryRun,
    /// No prefix
    None,
}

impl MessagePrefix {
    /// Format a message with this prefix.
    pub fn format(&self, message: &str) -> String {
        match self {
            MessagePrefix::Command => format!("$ {}", message),
            MessagePrefix::Success => format!("[SUCCESS] {}", message),
            MessagePrefix::Warning => format!("[WARNING] {}", message),
            MessagePrefix::Error => format!("[ERROR] {}", message),
            MessagePrefix::DryRun => format!("[DRY RUN] {}", message),
            MessagePrefix::None => message.to_string(),
        }
    }

    /// Style applied to messages with this prefix.
    pub fn style(&self) -> Style {
        match self {
            MessagePrefix::Command => Style::Blue,
            MessagePrefix::Success => Style::Green,
            MessagePrefix::Warning | MessagePrefix::DryRun => Style::Yellow,
            MessagePrefix::Error => Style::Red,
            MessagePrefix::None => Style::Plain,
        }
    }
}
