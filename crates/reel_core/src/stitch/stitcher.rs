//! Stitch pipeline: validate, order, write manifest, encode.

use std::path::PathBuf;

use crate::config::StitchSettings;
use crate::logging::Reporter;
use crate::models::SortOrder;
use crate::tools::{CommandRunner, Invocation, Toolbox};

use super::encode::{encode_command, EncodeTarget};
use super::errors::{StitchError, StitchResult};
use super::files::sorted_video_files;
use super::manifest::write_manifest;
use super::validate::find_mismatches;

/// External collaborators of a stitch run.
pub struct StitchContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub toolbox: &'a Toolbox,
    pub reporter: &'a Reporter,
    pub settings: &'a StitchSettings,
}

/// One stitch request.
#[derive(Debug, Clone)]
pub struct StitchOptions {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub target: EncodeTarget,
    pub sort_by: SortOrder,
    /// Stop after printing the encoder command.
    pub dry_run: bool,
}

/// How a successful run ended.
#[derive(Debug, Clone)]
pub enum StitchOutcome {
    /// The command that would have run.
    DryRun(Invocation),
    Encoded(Invocation),
}

/// Run the whole pipeline.
///
/// Nothing is encoded unless every probed input matches the target
/// resolution.
pub fn stitch(ctx: &StitchContext<'_>, options: &StitchOptions) -> StitchResult<StitchOutcome> {
    let reporter = ctx.reporter;
    let target = &options.target;
    let (width, height) = target.resolution.dimensions();

    reporter.info("");
    reporter.heading("Target Settings:");
    reporter.field("Resolution", &format!("{}x{}", width, height), false);
    reporter.field("FPS", &target.fps.to_string(), false);
    reporter.field("HDR", if target.hdr { "Yes" } else { "No" }, false);
    reporter.field("Sort by", &options.sort_by.to_string(), true);

    let mismatches = find_mismatches(
        ctx.runner,
        ctx.toolbox,
        reporter,
        &options.input_dir,
        target.resolution,
    )?;
    if !mismatches.is_empty() {
        return Err(StitchError::ResolutionMismatch {
            target: target.resolution,
            files: mismatches,
        });
    }

    let files = sorted_video_files(&options.input_dir, options.sort_by)?;
    if files.is_empty() {
        return Err(StitchError::NoInputFiles(options.input_dir.clone()));
    }

    reporter.info("");
    reporter.heading(&format!(
        "Files to be merged (in order of {}):",
        options.sort_by
    ));
    for (idx, file) in files.iter().enumerate() {
        reporter.info(&format!(
            "{}. {} (Created: {})",
            idx + 1,
            file.name,
            file.modified.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    // Must outlive the encoder.
    let manifest = write_manifest(&files)?;
    let invocation = encode_command(
        ctx.toolbox,
        ctx.settings,
        target,
        manifest.path(),
        &options.output,
    );

    reporter.info("");
    reporter.info("Running ffmpeg command:");
    reporter.command(&invocation.display_pretty());
    reporter.info("");

    if options.dry_run {
        reporter.dry_run("ffmpeg command will not be executed.");
        return Ok(StitchOutcome::DryRun(invocation));
    }

    tracing::info!("Encoding {} files to {}", files.len(), options.output.display());
    let exit_code = ctx.runner.stream(&invocation)?;
    if exit_code != 0 {
        return Err(StitchError::EncodeFailed(exit_code));
    }

    reporter.success(&format!(
        "Successfully concatenated and encoded to {}",
        options.output.display()
    ));
    Ok(StitchOutcome::Encoded(invocation))
}

/// Print a stitch failure, including the offending files of a mismatch.
pub fn report_error(reporter: &Reporter, error: &StitchError) {
    reporter.info("");
    reporter.error(&error.to_string());
    if let StitchError::ResolutionMismatch { files, .. } = error {
        for file in files {
            reporter.info(&format!("  - {}: {}x{}", file.name, file.width, file.height));
        }
    }
}
