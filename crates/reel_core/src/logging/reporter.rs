//! User-facing console output.
//!
//! The reporter:
//! - Prints prefixed, optionally colored messages to stdout (or a sink)
//! - Mirrors every message to `tracing` at debug level
//! - Keeps a tail buffer of external tool output for error diagnosis

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::types::{ColorMode, MessagePrefix, Style};

/// Callback receiving each formatted output line.
pub type LogSink = Box<dyn Fn(&str) + Send + Sync>;

/// Console reporter shared by both pipelines.
pub struct Reporter {
    /// Output callback; `None` prints to stdout.
    sink: Option<LogSink>,
    /// Emit ANSI colors.
    color: bool,
    /// Tail buffer for recent tool output lines.
    tail_buffer: Arc<Mutex<VecDeque<String>>>,
    /// Maximum lines kept in the tail buffer.
    error_tail: usize,
}

impl Reporter {
    /// Reporter printing to stdout.
    pub fn stdout(color: ColorMode, error_tail: usize) -> Self {
        Self {
            sink: None,
            color: color.enabled(),
            tail_buffer: Arc::new(Mutex::new(VecDeque::with_capacity(error_tail))),
            error_tail,
        }
    }

    /// Reporter sending uncolored lines to `sink`.
    pub fn with_sink(sink: LogSink, error_tail: usize) -> Self {
        Self {
            sink: Some(sink),
            color: false,
            tail_buffer: Arc::new(Mutex::new(VecDeque::with_capacity(error_tail))),
            error_tail,
        }
    }

    /// Reporter that collects lines into the returned buffer.
    pub fn capturing() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let target = lines.clone();
        let sink: LogSink = Box::new(move |line| target.lock().push(line.to_string()));
        (Self::with_sink(sink, 20), lines)
    }

    /// Print a plain message.
    pub fn info(&self, message: &str) {
        self.emit(MessagePrefix::None, message);
    }

    /// Print a bold heading.
    pub fn heading(&self, message: &str) {
        self.output(&Style::Bold.paint(message, self.color));
    }

    /// Print a horizontal rule.
    pub fn rule(&self) {
        self.output(&"-".repeat(40));
    }

    /// Print one entry of a detail tree: `├─ label: value` (`└─` when last).
    pub fn field(&self, label: &str, value: &str, last: bool) {
        let branch = if last { "└─" } else { "├─" };
        let label = Style::Green.paint(&format!("{}:", label), self.color);
        self.output(&format!("{} {} {}", branch, label, value));
    }

    /// Print a warning.
    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        self.emit(MessagePrefix::Warning, message);
    }

    /// Print an error.
    pub fn error(&self, message: &str) {
        self.emit(MessagePrefix::Error, message);
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        self.emit(MessagePrefix::Success, message);
    }

    /// Print an action that a dry run suppressed.
    pub fn dry_run(&self, message: &str) {
        self.emit(MessagePrefix::DryRun, message);
    }

    /// Print a command about to be executed.
    pub fn command(&self, command: &str) {
        self.emit(MessagePrefix::Command, command);
    }

    /// Record tool output (stdout/stderr) in the tail buffer.
    ///
    /// Lines are not printed; they are shown by [`Reporter::show_tail`]
    /// when a tool fails.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        if self.error_tail == 0 {
            return;
        }
        let mut buffer = self.tail_buffer.lock();
        if buffer.len() >= self.error_tail {
            buffer.pop_front();
        }
        let prefix = if is_stderr { "[stderr] " } else { "" };
        buffer.push_back(format!("{}{}", prefix, line));
    }

    /// Record every line of a tool's captured output.
    pub fn record_output(&self, stdout: &str, stderr: &str) {
        for line in stdout.lines() {
            self.output_line(line, false);
        }
        for line in stderr.lines() {
            self.output_line(line, true);
        }
    }

    /// Show the tail buffer (typically after an error).
    pub fn show_tail(&self, header: &str) {
        let lines = self.get_tail();
        if lines.is_empty() {
            return;
        }

        self.output(&format!("[{}/tail]", header));
        for line in &lines {
            self.output(line);
        }
    }

    /// Get the current tail buffer contents.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    fn emit(&self, prefix: MessagePrefix, message: &str) {
        let formatted = prefix.format(message);
        self.output(&prefix.style().paint(&formatted, self.color));
    }

    fn output(&self, formatted: &str) {
        tracing::trace!(target: "reel_core::report", "{}", formatted);
        match self.sink {
            Some(ref sink) => sink(formatted),
            None => println!("{}", formatted),
        }
    }
}
