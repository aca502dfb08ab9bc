//! Track and title parsing from `mkvinfo` output.
//!
//! mkvinfo prints a human-oriented tree, not a stable machine format. All
//! knowledge of that format lives here: raw text goes in, [`Track`] records
//! and the segment title come out.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Track, TrackKind, UNDEFINED_LANGUAGE};
use crate::tools::{CommandRunner, Toolbox, ToolResult};

const TRACK_NUMBER_MARKER: &str = "|  + Track number:";
const TRACK_TYPE_MARKER: &str = "|  + Track type:";
const CODEC_MARKER: &str = "|  + Codec ID:";
const LANGUAGE_MARKER: &str = "|  + Language:";

/// `Track number: 2 (track ID for mkvmerge & mkvextract: 1)` -> `1`
static TRACK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"mkvextract:\s*(.*?)\)*$").expect("track id pattern is valid"));

/// Segment information title, e.g. `| + Title: Episode One`.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|\s*\+ Title:(.*)$").expect("title pattern is valid"));

/// Parsed `mkvinfo` report for one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MkvInfo {
    /// Tracks in the order mkvinfo listed them.
    pub tracks: Vec<Track>,
    /// Segment title, if one is set.
    pub title: Option<String>,
}

impl MkvInfo {
    /// Parse a complete mkvinfo report.
    pub fn parse(text: &str) -> Self {
        Self {
            tracks: parse_tracks(text),
            title: parse_title(text),
        }
    }
}

/// In-progress track record while scanning.
#[derive(Default)]
struct PendingTrack {
    id: String,
    kind: String,
    language: Option<String>,
    codec: String,
}

impl PendingTrack {
    fn finish(self) -> Option<Track> {
        if self.id.is_empty() {
            return None;
        }
        Some(Track::new(
            self.id,
            TrackKind::from_mkvinfo(&self.kind),
            self.language.unwrap_or_else(|| UNDEFINED_LANGUAGE.to_string()),
            self.codec,
        ))
    }
}

/// Value after the first colon of a line, trimmed.
fn field_value(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Tool-facing track id from a `Track number:` line, or empty if absent.
fn track_id(line: &str) -> String {
    TRACK_ID_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Parse every track block from mkvinfo output.
///
/// Lines that match no marker are ignored. A record is only emitted when
/// it received a non-empty track id.
pub fn parse_tracks(text: &str) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut current = PendingTrack::default();

    for line in text.lines().map(str::trim) {
        if line.contains(TRACK_NUMBER_MARKER) {
            if let Some(track) = std::mem::take(&mut current).finish() {
                tracks.push(track);
            }
            current.id = track_id(line);
        } else if line.contains(TRACK_TYPE_MARKER) {
            current.kind = field_value(line);
        } else if line.contains(CODEC_MARKER) {
            current.codec = field_value(line);
        } else if line.contains(LANGUAGE_MARKER) && !line.contains("IETF") {
            current.language = Some(field_value(line));
        }
    }

    if let Some(track) = current.finish() {
        tracks.push(track);
    }

    tracks
}

/// First segment title in mkvinfo output.
pub fn parse_title(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| TITLE_RE.captures(line))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Run `mkvinfo` on `path` and return its raw report.
///
/// A non-zero exit is an error carrying mkvinfo's diagnostics.
pub fn run_mkvinfo(
    runner: &dyn CommandRunner,
    toolbox: &Toolbox,
    path: &Path,
) -> ToolResult<String> {
    let invocation = toolbox.command("mkvinfo").arg(path);
    let output = runner.capture(&invocation)?.check("mkvinfo", 0)?;
    Ok(output.stdout)
}

/// Probe `path` with mkvinfo and parse the result.
pub fn read_mkvinfo(
    runner: &dyn CommandRunner,
    toolbox: &Toolbox,
    path: &Path,
) -> ToolResult<MkvInfo> {
    let info = MkvInfo::parse(&run_mkvinfo(runner, toolbox, path)?);
    tracing::debug!(
        "mkvinfo {}: {} tracks, title {:?}",
        path.display(),
        info.tracks.len(),
        info.title
    );
    Ok(info)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tools::testing::FakeRunner;
    use crate::tools::{CommandOutput, ToolError};

    pub(crate) const SAMPLE: &str = "\
+ EBML head
|+ EBML version: 1
|+ Document type: matroska
+ Segment: size 1048576
|+ Segment information
| + Timestamp scale: 1000000
| + Writing application: mkvmerge v65.0.0 ('Too Much') 64-bit
| + Duration: 00:23:40.044000000
| + Title: Episode One
|+ Tracks
| + Track
|  + Track number: 1 (track ID for mkvmerge & mkvextract: 0)
|  + Track UID: 1
|  + Track type: video
|  + Codec ID: V_MPEGH/ISO/HEVC
|  + Language: und
|  + Language (IETF BCP 47): und
|  + Video track
|   + Pixel width: 1920
| + Track
|  + Track number: 2 (track ID for mkvmerge & mkvextract: 1)
|  + Track UID: 2
|  + Track type: audio
|  + Codec ID: A_OPUS
|  + Language: jpn
|  + Language (IETF BCP 47): ja
| + Track
|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)
|  + Track UID: 3
|  + Track type: subtitles
|  + Codec ID: S_TEXT/ASS
|  + Language (IETF BCP 47): en
|+ Cluster
";

    #[test]
    fn parses_all_track_blocks_in_order() {
        let tracks = parse_tracks(SAMPLE);
        assert_eq!(
            tracks,
            vec![
                Track::new("0", TrackKind::Video, "und", "V_MPEGH/ISO/HEVC"),
                Track::new("1", TrackKind::Audio, "jpn", "A_OPUS"),
                Track::new("2", TrackKind::Subtitles, "undefined", "S_TEXT/ASS"),
            ]
        );
    }

    #[test]
    fn ietf_language_does_not_override_primary() {
        let text = "\
|  + Track number: 1 (track ID for mkvmerge & mkvextract: 0)
|  + Track type: audio
|  + Language: eng
|  + Language (IETF BCP 47): en-US
";
        let tracks = parse_tracks(text);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language, "eng");
    }

    #[test]
    fn record_without_id_is_dropped() {
        let text = "\
|  + Track number: 1
|  + Track type: audio
|  + Track number: 2 (track ID for mkvmerge & mkvextract: 1)
|  + Track type: video
";
        let tracks = parse_tracks(text);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "1");
        assert_eq!(tracks[0].kind, TrackKind::Video);
    }

    #[test]
    fn garbage_yields_no_tracks() {
        assert!(parse_tracks("").is_empty());
        assert!(parse_tracks("not mkvinfo output\n\n+ EBML head").is_empty());
    }

    #[test]
    fn unknown_track_type_is_other() {
        let text = "\
|  + Track number: 4 (track ID for mkvmerge & mkvextract: 3)
|  + Track type: buttons
";
        assert_eq!(parse_tracks(text)[0].kind, TrackKind::Other);
    }

    #[test]
    fn title_is_first_segment_title() {
        assert_eq!(parse_title(SAMPLE), Some("Episode One".to_string()));
        assert_eq!(
            parse_title("| + Title: Part 2: The Return\n| + Title: Later"),
            Some("Part 2: The Return".to_string())
        );
        assert_eq!(parse_title("|  + Name: Commentary"), None);
    }

    #[test]
    fn read_mkvinfo_parses_tool_output() {
        let runner = FakeRunner::new(|_| CommandOutput::ok(SAMPLE));
        let info = read_mkvinfo(&runner, &Toolbox::default(), Path::new("ep.mkv")).unwrap();

        assert_eq!(info.tracks.len(), 3);
        assert_eq!(info.tracks[1].kind, TrackKind::Audio);
        assert_eq!(info.title.as_deref(), Some("Episode One"));
        assert_eq!(runner.calls()[0].display(), "mkvinfo ep.mkv");
    }

    #[test]
    fn mkvinfo_failure_surfaces_diagnostics() {
        let runner = FakeRunner::new(|_| CommandOutput::failed(2, "Error: not a Matroska file"));
        let err = read_mkvinfo(&runner, &Toolbox::default(), Path::new("bad.mkv")).unwrap_err();

        assert!(matches!(err, ToolError::CommandFailed { exit_code: 2, .. }));
        assert_eq!(err.diagnostics(), Some("Error: not a Matroska file"));
    }
}
