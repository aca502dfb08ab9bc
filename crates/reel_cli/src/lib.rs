//! Startup shared by the reelkit binaries: common flags, configuration,
//! logging and tool discovery.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use reel_core::config::{default_config_path, ConfigManager, Settings};
use reel_core::logging::{init_tracing, ColorMode, Reporter};
use reel_core::tools::{ToolEnvironment, ToolError, Toolbox};

/// Flags accepted by every binary.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Configuration file (default: .config/reelkit.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Colored output: auto (when stdout is a terminal), always, never
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorArg>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(value: ColorArg) -> Self {
        match value {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

/// Loaded settings plus the console reporter built from them.
pub struct Session {
    pub settings: Settings,
    pub reporter: Reporter,
}

impl Session {
    /// Load configuration, install the tracing subscriber and build the
    /// reporter. Command-line flags win over the file.
    pub fn start(args: &CommonArgs) -> Result<Self> {
        let settings = load_settings(args.config.as_ref())?;

        init_tracing(settings.logging.level.more_verbose(args.verbose));

        let color = args
            .color
            .map(ColorMode::from)
            .unwrap_or(settings.logging.color);
        let reporter = Reporter::stdout(color, settings.logging.error_tail);

        Ok(Self { settings, reporter })
    }

    /// Resolve `tools` from configured overrides and `PATH`.
    pub fn locate_tools(&self, tools: &[&str]) -> Result<Toolbox, ToolError> {
        Toolbox::locate(
            &ToolEnvironment::from_env(),
            tools,
            &self.settings.tools.overrides(),
        )
    }
}

/// An explicit path must exist; the default path is optional.
fn load_settings(explicit: Option<&PathBuf>) -> Result<Settings> {
    let path = explicit.cloned().unwrap_or_else(default_config_path);
    let mut manager = ConfigManager::new(&path);
    let loaded = if explicit.is_some() {
        manager.load()
    } else {
        manager.load_or_default()
    };
    loaded.with_context(|| format!("loading config {}", path.display()))?;

    tracing::debug!("Using config {}", path.display());
    Ok(manager.into_settings())
}
