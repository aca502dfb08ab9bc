//! Logging infrastructure for reelkit.
//!
//! Two channels:
//! - **Diagnostics** go through `tracing` to stderr, filtered by `RUST_LOG`
//!   or the configured level
//! - **User output** goes through [`Reporter`]: prefixed, optionally colored
//!   lines on stdout plus a tail buffer of tool output shown on failure
//!
//! # Example
//!
//! ```no_run
//! use reel_core::logging::{init_tracing, ColorMode, LogLevel, Reporter};
//!
//! init_tracing(LogLevel::Warn);
//! let reporter = Reporter::stdout(ColorMode::Auto, 20);
//! reporter.heading("Target Settings:");
//! reporter.command("ffprobe -v error clip.mov");
//! reporter.success("Done");
//! ```

mod reporter;
mod types;

pub use reporter::{LogSink, Reporter};
pub use types::{ColorMode, LogLevel, MessagePrefix, Style};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for diagnostics.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr so it never mixes with reporter output
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }
}
