//! Resolution check of every input before encoding.

use std::path::Path;

use crate::logging::Reporter;
use crate::models::{Resolution, SortOrder, VideoDetails};
use crate::tools::{CommandRunner, Toolbox};

use super::errors::{Mismatch, StitchError, StitchResult};
use super::files::{list_video_files, sort_video_files};
use super::probe::{format_duration, probe_video};

/// Probe every video file in `dir` (name order), print its details and
/// collect the files whose dimensions differ from `target`.
///
/// A file that cannot be probed is reported as a warning and skipped.
pub fn find_mismatches(
    runner: &dyn CommandRunner,
    toolbox: &Toolbox,
    reporter: &Reporter,
    dir: &Path,
    target: Resolution,
) -> StitchResult<Vec<Mismatch>> {
    let (target_width, target_height) = target.dimensions();
    let mut files = list_video_files(dir)?;
    sort_video_files(&mut files, SortOrder::Filename);

    reporter.info("");
    reporter.heading("Analyzing input files:");

    let mut mismatches = Vec::new();
    for file in &files {
        let details = match probe_video(runner, toolbox, &file.path) {
            Ok(details) => details,
            Err(e) => {
                let message = match e {
                    StitchError::Probe { message, .. } => message,
                    other => other.to_string(),
                };
                reporter.warn(&format!(
                    "Could not check details of {}: {}",
                    file.name, message
                ));
                continue;
            }
        };

        print_details(reporter, &file.name, &details);

        if !details.matches(target_width, target_height) {
            mismatches.push(Mismatch {
                name: file.name.clone(),
                width: details.width,
                height: details.height,
            });
        }
    }

    Ok(mismatches)
}

/// Detail tree for one probed file.
pub fn print_details(reporter: &Reporter, name: &str, details: &VideoDetails) {
    reporter.info("");
    reporter.heading(name);
    reporter.field(
        "Resolution",
        &format!("{}x{}", details.width, details.height),
        false,
    );
    reporter.field("FPS", &details.fps.to_string(), false);
    reporter.field("Duration", &format_duration(details.duration), false);
    reporter.field(
        "Creation Date",
        &details.modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        false,
    );
    reporter.field("Pixel Format", &details.pixel_format, false);
    reporter.field("Color Space", &details.color_space, false);
    reporter.field("Color Transfer", &details.color_transfer, false);
    reporter.field("Color Primaries", &details.color_primaries, false);
    reporter.field("HDR", if details.is_hdr() { "Yes" } else { "No" }, true);
}
