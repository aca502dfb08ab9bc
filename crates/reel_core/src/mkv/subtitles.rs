//! Subtitle stripping.

use std::path::Path;

use crate::fsutil::SizeGuard;
use crate::models::{Track, TrackKind};

use super::errors::MkvResult;
use super::remux::Remux;
use super::MkvContext;

/// What the subtitle step decided for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleDecision {
    NoneFound,
    /// Remux without the given number of subtitle tracks.
    Strip { count: usize },
}

impl SubtitleDecision {
    pub fn for_tracks(tracks: &[Track]) -> Self {
        match tracks.iter().filter(|t| t.kind == TrackKind::Subtitles).count() {
            0 => SubtitleDecision::NoneFound,
            count => SubtitleDecision::Strip { count },
        }
    }
}

/// Remove every subtitle track from `file` unless this is a dry run.
///
/// The size check only applies when `guard_subtitle_removal` is set.
pub fn strip_subtitles(
    ctx: &MkvContext<'_>,
    file: &Path,
    tracks: &[Track],
) -> MkvResult<SubtitleDecision> {
    let decision = SubtitleDecision::for_tracks(tracks);

    match decision {
        SubtitleDecision::NoneFound => {
            ctx.reporter
                .info(&format!("No subtitles found in '{}'.", file.display()));
        }
        SubtitleDecision::Strip { count } => {
            ctx.reporter.info(&format!(
                "Subtitles found in '{}' ({} track(s)).",
                file.display(),
                count
            ));
            let remux = Remux::new(file, "no_subtitles", &["--no-subtitles"]);

            if ctx.dry_run {
                ctx.reporter.command(&remux.preview(ctx).display());
                ctx.reporter.dry_run(&format!(
                    "Would remove all subtitles from '{}'.",
                    file.display()
                ));
            } else {
                let guard = ctx
                    .settings
                    .guard_subtitle_removal
                    .then(|| SizeGuard::new(ctx.settings.min_size_ratio));
                remux.run(ctx, guard)?;
                ctx.reporter.success(&format!(
                    "All subtitles removed from '{}'.",
                    file.display()
                ));
            }
        }
    }

    Ok(decision)
}
