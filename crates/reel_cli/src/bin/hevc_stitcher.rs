//! `hevc-stitcher`: concatenate MOV/MP4 clips and encode them to HEVC.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use reel_cli::{CommonArgs, Session};
use reel_core::models::{Resolution, SortOrder};
use reel_core::stitch::{report_error, stitch, EncodeTarget, StitchContext, StitchOptions};
use reel_core::tools::{SystemRunner, STITCH_TOOLS};

#[derive(Parser)]
#[command(
    name = "hevc-stitcher",
    version,
    about = "Concatenate and encode video files (MOV/MP4) to HEVC."
)]
struct Cli {
    /// Path to the directory containing video files
    input_dir: PathBuf,

    /// Path to the output HEVC file
    output_file: PathBuf,

    /// Enable HDR encoding
    #[arg(long)]
    hdr: bool,

    /// Output resolution
    #[arg(long, value_enum, default_value_t = ResolutionArg::Uhd4K)]
    resolution: ResolutionArg,

    /// Output frame rate
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Sort input files by filename or creation date
    #[arg(long = "sort_by", value_enum, default_value_t = SortArg::Filename)]
    sort_by: SortArg,

    /// Preview operations without executing the ffmpeg command
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResolutionArg {
    #[value(name = "480p")]
    P480,
    #[value(name = "720p")]
    P720,
    #[value(name = "1080p")]
    P1080,
    #[value(name = "4K")]
    Uhd4K,
}

impl From<ResolutionArg> for Resolution {
    fn from(value: ResolutionArg) -> Self {
        match value {
            ResolutionArg::P480 => Resolution::P480,
            ResolutionArg::P720 => Resolution::P720,
            ResolutionArg::P1080 => Resolution::P1080,
            ResolutionArg::Uhd4K => Resolution::Uhd4K,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    #[value(name = "filename")]
    Filename,
    #[value(name = "creation_date")]
    CreationDate,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Filename => SortOrder::Filename,
            SortArg::CreationDate => SortOrder::CreationDate,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let session = match Session::start(&cli.common) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };
    let reporter = &session.reporter;

    let toolbox = match session.locate_tools(&STITCH_TOOLS) {
        Ok(toolbox) => toolbox,
        Err(e) => {
            reporter.error(&format!(
                "{}. Please install the required tools and ensure they're in your system's PATH.",
                e
            ));
            process::exit(1);
        }
    };

    let runner = SystemRunner::new();
    let ctx = StitchContext {
        runner: &runner,
        toolbox: &toolbox,
        reporter,
        settings: &session.settings.stitch,
    };
    let options = StitchOptions {
        input_dir: cli.input_dir,
        output: cli.output_file,
        target: EncodeTarget {
            resolution: cli.resolution.into(),
            fps: cli.fps,
            hdr: cli.hdr,
        },
        sort_by: cli.sort_by.into(),
        dry_run: cli.dry_run,
    };

    if let Err(e) = stitch(&ctx, &options) {
        report_error(reporter, &e);
        process::exit(1);
    }
}
