//! Audio language filter: keep only the audio tracks in one language.

use std::path::Path;

use crate::fsutil::SizeGuard;
use crate::models::{Track, TrackKind};

use super::errors::MkvResult;
use super::remux::Remux;
use super::MkvContext;

/// What the audio filter decided for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioDecision {
    /// No audio track in another language; nothing to do.
    AlreadyCompliant,
    /// Every audio track would be removed; the file is left alone.
    RefuseNoTarget,
    /// Remux keeping video track 0 and these audio track ids.
    Filter { keep_ids: String },
}

/// Partition of a file's audio tracks by language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPlan {
    pub language: String,
    /// Audio tracks in the requested language.
    pub keep: Vec<Track>,
    /// Audio tracks in any other language.
    pub drop: Vec<Track>,
}

impl AudioPlan {
    pub fn new(tracks: &[Track], language: &str) -> Self {
        let (keep, drop) = tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Audio)
            .cloned()
            .partition(|t| t.language == language);

        Self {
            language: language.to_string(),
            keep,
            drop,
        }
    }

    /// Comma-joined ids of the kept tracks, as passed to `--audio-tracks`.
    pub fn keep_ids(&self) -> String {
        self.keep
            .iter()
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn decision(&self) -> AudioDecision {
        if self.drop.is_empty() {
            AudioDecision::AlreadyCompliant
        } else if self.keep.is_empty() {
            AudioDecision::RefuseNoTarget
        } else {
            AudioDecision::Filter {
                keep_ids: self.keep_ids(),
            }
        }
    }
}

/// Report the plan and apply it to `file` unless this is a dry run.
pub fn filter_audio(
    ctx: &MkvContext<'_>,
    file: &Path,
    tracks: &[Track],
    language: &str,
) -> MkvResult<AudioDecision> {
    ctx.reporter
        .info(&format!("Analyzing audio tracks in '{}'...", file.display()));

    let plan = AudioPlan::new(tracks, language);
    for track in &plan.keep {
        ctx.reporter.info(&format!(
            "Found {} audio track (ID: {}) - will keep",
            language, track.id
        ));
    }
    for track in &plan.drop {
        ctx.reporter.info(&format!(
            "Found non-{} audio track (ID: {}) - will be removed",
            language, track.id
        ));
    }

    let decision = plan.decision();
    match decision {
        AudioDecision::AlreadyCompliant => {
            ctx.reporter.info("No audio track changes needed.");
        }
        AudioDecision::RefuseNoTarget => {
            ctx.reporter.warn(&format!(
                "No {} audio tracks found. Keeping all audio tracks.",
                language
            ));
        }
        AudioDecision::Filter { ref keep_ids } => {
            let remux = Remux::new(
                file,
                language,
                &["--video-tracks", "0", "--audio-tracks", keep_ids.as_str()],
            );

            if ctx.dry_run {
                ctx.reporter.command(&remux.preview(ctx).display());
                ctx.reporter.dry_run(&format!(
                    "Would keep only {} audio tracks in '{}'.",
                    language,
                    file.display()
                ));
            } else {
                remux.run(ctx, Some(SizeGuard::new(ctx.settings.min_size_ratio)))?;
                ctx.reporter.success(&format!(
                    "Kept only {} audio tracks in '{}'.",
                    language,
                    file.display()
                ));
            }
        }
    }

    Ok(decision)
}
