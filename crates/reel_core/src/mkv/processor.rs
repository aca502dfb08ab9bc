//! Per-file MKV pipeline.

use std::path::Path;

use crate::models::Track;

use super::audio::{filter_audio, AudioDecision};
use super::errors::{MkvError, MkvResult};
use super::mkvinfo::read_mkvinfo;
use super::subtitles::{strip_subtitles, SubtitleDecision};
use super::title::{normalize_title, TitleDecision};
use super::MkvContext;

/// Which steps to run on a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MkvOptions {
    /// Keep only audio tracks in this language (ISO 639-2 code).
    pub keep_language: Option<String>,
    pub delete_subtitles: bool,
}

/// Decisions taken for one file.
///
/// A dry run produces the same report as a real run on the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MkvReport {
    pub tracks: Vec<Track>,
    /// `None` when no language was requested.
    pub audio: Option<AudioDecision>,
    /// `None` when subtitle removal was not requested.
    pub subtitles: Option<SubtitleDecision>,
    pub title: TitleDecision,
}

/// Check that `path` names an existing `.mkv` file.
pub fn validate_input(path: &Path) -> MkvResult<()> {
    let is_mkv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mkv"));
    if !is_mkv {
        return Err(MkvError::NotMatroska(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(MkvError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Run the requested steps on one file.
///
/// Order is fixed: list tracks, filter audio, strip subtitles, normalize
/// the title. The first failing step aborts the rest.
pub fn process_mkv_file(
    ctx: &MkvContext<'_>,
    file: &Path,
    options: &MkvOptions,
) -> MkvResult<MkvReport> {
    validate_input(file)?;
    tracing::info!("Processing {} ({:?})", file.display(), options);

    let tracks = read_mkvinfo(ctx.runner, ctx.toolbox, file)?.tracks;

    ctx.reporter
        .heading(&format!("Tracks in '{}':", file.display()));
    ctx.reporter.rule();
    for track in &tracks {
        ctx.reporter.info(&track.to_string());
    }
    ctx.reporter.rule();

    let audio = match options.keep_language.as_deref() {
        Some(language) => Some(filter_audio(ctx, file, &tracks, language)?),
        None => None,
    };

    let subtitles = if options.delete_subtitles {
        Some(strip_subtitles(ctx, file, &tracks)?)
    } else {
        None
    };

    let title = normalize_title(ctx, file)?;
    ctx.reporter.info("");

    Ok(MkvReport {
        tracks,
        audio,
        subtitles,
        title,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::MkvSettings;
    use crate::logging::Reporter;
    use crate::mkv::mkvinfo::tests::SAMPLE;
    use crate::mkv::testing::{remux_writing, snapshot};
    use crate::tools::testing::FakeRunner;
    use crate::tools::Toolbox;

    /// Video, Japanese and English audio, one subtitle track.
    const DUAL_AUDIO: &str = "\
| + Title: Episode One
|  + Track number: 1 (track ID for mkvmerge & mkvextract: 0)
|  + Track type: video
|  + Codec ID: V_MPEGH/ISO/HEVC
|  + Track number: 2 (track ID for mkvmerge & mkvextract: 1)
|  + Track type: audio
|  + Codec ID: A_OPUS
|  + Language: jpn
|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)
|  + Track type: audio
|  + Codec ID: A_AAC
|  + Language: eng
|  + Track number: 4 (track ID for mkvmerge & mkvextract: 3)
|  + Track type: subtitles
|  + Codec ID: S_TEXT/ASS
|  + Language: eng
";

    type Files = Vec<(String, Vec<u8>)>;

    /// Process `Pilot.mkv` next to files sharing its stem. Returns the
    /// directory before and after.
    fn run(dry_run: bool) -> (MkvReport, Vec<String>, usize, Files, Files) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Pilot.mkv");
        fs::write(&file, vec![7u8; 1000]).unwrap();
        fs::write(dir.path().join("Pilot_eng.mkv"), b"dub").unwrap();
        fs::write(dir.path().join("Pilot_no_subtitles.mkv"), b"clean").unwrap();
        let before = snapshot(dir.path());

        let runner = FakeRunner::new(remux_writing(800, DUAL_AUDIO));
        let toolbox = Toolbox::default();
        let (reporter, lines) = Reporter::capturing();
        let settings = MkvSettings::default();
        let ctx = MkvContext {
            runner: &runner,
            toolbox: &toolbox,
            reporter: &reporter,
            settings: &settings,
            dry_run,
        };
        let options = MkvOptions {
            keep_language: Some("eng".to_string()),
            delete_subtitles: true,
        };

        let report = process_mkv_file(&ctx, &file, &options).unwrap();
        let mutations = runner.calls_to("mkvmerge") + runner.calls_to("mkvpropedit");
        let lines = lines.lock().clone();
        (report, lines, mutations, before, snapshot(dir.path()))
    }

    #[test]
    fn rejects_wrong_extension_before_existence() {
        assert!(matches!(
            validate_input(Path::new("missing.mp4")),
            Err(MkvError::NotMatroska(_))
        ));
        assert!(matches!(
            validate_input(Path::new("missing.mkv")),
            Err(MkvError::FileNotFound(_))
        ));
    }

    #[test]
    fn extension_check_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("LOUD.MKV");
        fs::write(&file, b"x").unwrap();
        assert!(validate_input(&file).is_ok());
    }

    #[test]
    fn full_run_applies_every_step() {
        let (report, lines, mutations, before, after) = run(false);

        assert_eq!(report.tracks.len(), 4);
        assert_eq!(
            report.audio,
            Some(AudioDecision::Filter {
                keep_ids: "2".to_string()
            })
        );
        assert_eq!(report.subtitles, Some(SubtitleDecision::Strip { count: 1 }));
        assert!(matches!(report.title, TitleDecision::Set { .. }));
        assert_eq!(mutations, 3);
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], ("Pilot.mkv".to_string(), vec![0u8; 800]));
        assert_eq!(after[1..], before[1..]);
        assert!(lines.iter().any(|l| l.starts_with("Tracks in '")));
        assert!(lines.contains(&"Track ID 1: audio (jpn) [A_OPUS]".to_string()));
    }

    #[test]
    fn dry_run_reports_the_same_decisions_without_mutating() {
        let (real, _, _, _, _) = run(false);
        let (dry, lines, mutations, before, after) = run(true);

        assert_eq!(dry, real);
        assert_eq!(mutations, 0);
        assert_eq!(after, before);
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("[DRY RUN] Would")).count(),
            3
        );
    }

    #[test]
    fn title_only_when_nothing_requested() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Episode One.mkv");
        fs::write(&file, b"data").unwrap();

        let runner = FakeRunner::new(remux_writing(0, SAMPLE));
        let toolbox = Toolbox::default();
        let (reporter, _lines) = Reporter::capturing();
        let settings = MkvSettings::default();
        let ctx = MkvContext {
            runner: &runner,
            toolbox: &toolbox,
            reporter: &reporter,
            settings: &settings,
            dry_run: false,
        };

        let report = process_mkv_file(&ctx, &file, &MkvOptions::default()).unwrap();
        assert_eq!(report.audio, None);
        assert_eq!(report.subtitles, None);
        assert_eq!(report.title, TitleDecision::AlreadyMatches);
        assert_eq!(runner.calls_to("mkvinfo"), 2);
        assert_eq!(runner.calls_to("mkvmerge"), 0);
    }
}
