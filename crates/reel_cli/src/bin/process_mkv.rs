//! `process-mkv`: trim audio languages, strip subtitles and fix the title of
//! a Matroska file in place.

use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use reel_cli::{CommonArgs, Session};
use reel_core::mkv::{process_mkv_file, MkvContext, MkvOptions};
use reel_core::tools::{SystemRunner, MKV_TOOLS};

#[derive(Parser)]
#[command(name = "process-mkv", version, about = "Process MKV files.")]
struct Cli {
    /// MKV file to process
    file: Option<PathBuf>,

    /// Keep only audio tracks in specified language (ISO 639-2 code, e.g. eng)
    #[arg(long, value_name = "CODE")]
    keep_language: Option<String>,

    /// Remove subtitle tracks
    #[arg(long)]
    delete_subtitles: bool,

    /// Simulate actions without making changes
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();

    let Some(file) = cli.file else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        println!();
        return;
    };

    let session = match Session::start(&cli.common) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };
    let reporter = &session.reporter;

    let toolbox = match session.locate_tools(&MKV_TOOLS) {
        Ok(toolbox) => toolbox,
        Err(e) => {
            reporter.error(&format!("{}. Please install mkvtoolnix first.", e));
            process::exit(1);
        }
    };

    let runner = SystemRunner::new();
    let ctx = MkvContext {
        runner: &runner,
        toolbox: &toolbox,
        reporter,
        settings: &session.settings.mkv,
        dry_run: cli.dry_run,
    };
    let options = MkvOptions {
        keep_language: cli.keep_language,
        delete_subtitles: cli.delete_subtitles,
    };

    if let Err(e) = process_mkv_file(&ctx, &file, &options) {
        reporter.error(&e.to_string());
        process::exit(1);
    }
}
