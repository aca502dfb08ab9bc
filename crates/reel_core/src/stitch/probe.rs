//! Video stream probing using ffprobe.
//!
//! Only the first video stream is inspected. Missing color metadata is
//! reported as `unknown`; missing dimensions or an unusable frame rate make
//! the file unusable for validation.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::models::VideoDetails;
use crate::tools::{CommandRunner, Toolbox};

use super::errors::{StitchError, StitchResult};

const SHOW_ENTRIES: &str =
    "stream=width,height,r_frame_rate,pix_fmt,color_space,color_transfer,color_primaries,duration";

/// Probe the first video stream of `path`.
pub fn probe_video(
    runner: &dyn CommandRunner,
    toolbox: &Toolbox,
    path: &Path,
) -> StitchResult<VideoDetails> {
    if !path.exists() {
        return Err(StitchError::probe(path, "File does not exist"));
    }

    let invocation = toolbox
        .command("ffprobe")
        .args(["-v", "error", "-select_streams", "v:0", "-show_entries"])
        .arg(SHOW_ENTRIES)
        .args(["-of", "json"])
        .arg(path);
    tracing::debug!("Probing: {}", invocation.display());

    let output = runner
        .capture(&invocation)?
        .check("ffprobe", 0)
        .map_err(|e| {
            let message = e.diagnostics().map(str::to_string).unwrap_or_else(|| e.to_string());
            StitchError::probe(path, format!("Failed to analyze: {}", message))
        })?;

    let modified = modified_time(path)?;
    parse_probe_json(&output.stdout, path, modified)
}

/// Filesystem modification time of `path` in local time.
pub fn modified_time(path: &Path) -> StitchResult<DateTime<Local>> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| {
            StitchError::io(format!("reading modification time of {}", path.display()), e)
        })?;
    Ok(DateTime::<Local>::from(modified))
}

/// Build [`VideoDetails`] from ffprobe's JSON output.
pub fn parse_probe_json(
    json: &str,
    path: &Path,
    modified: DateTime<Local>,
) -> StitchResult<VideoDetails> {
    let data: Value = serde_json::from_str(json)
        .map_err(|e| StitchError::probe(path, format!("Invalid ffprobe output: {}", e)))?;

    let stream = data
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .ok_or_else(|| StitchError::probe(path, "No video stream found"))?;

    let fps = stream
        .get("r_frame_rate")
        .and_then(|v| v.as_str())
        .map_or(Some(0.0), parse_frame_rate)
        .ok_or_else(|| StitchError::probe(path, "Invalid frame rate data"))?;

    let dimension = |key: &str| {
        stream
            .get(key)
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .filter(|&v| v > 0)
    };
    let (width, height) = match (dimension("width"), dimension("height")) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(StitchError::probe(path, "Invalid resolution data")),
    };

    let text = |key: &str| {
        stream
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string()
    };

    // ffprobe reports duration as a string; absent or "N/A" means unknown.
    let duration = stream
        .get("duration")
        .and_then(|v| v.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let details = VideoDetails {
        width,
        height,
        fps,
        pixel_format: text("pix_fmt"),
        color_space: text("color_space"),
        color_transfer: text("color_transfer"),
        color_primaries: text("color_primaries"),
        duration,
        modified,
    };

    tracing::debug!(
        "Probed {}: {}x{} @ {} fps, {}s",
        path.display(),
        details.width,
        details.height,
        details.fps,
        details.duration
    );
    Ok(details)
}

/// Frames per second from a `num/den` rate, rounded to three decimals.
///
/// A value without exactly one `/` yields 0. Non-numeric parts or a zero
/// denominator yield `None`.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let parts: Vec<&str> = rate.split('/').collect();
    if parts.len() != 2 {
        return Some(0.0);
    }
    let num: f64 = parts[0].trim().parse().ok()?;
    let den: f64 = parts[1].trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some((num / den * 1000.0).round() / 1000.0)
}

/// `H:MM:SS` for a duration in seconds, truncating fractions.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::FakeRunner;
    use crate::tools::CommandOutput;

    const HDR_CLIP: &str = r#"{
        "programs": [],
        "streams": [
            {
                "width": 3840,
                "height": 2160,
                "pix_fmt": "yuv420p10le",
                "color_space": "bt2020nc",
                "color_transfer": "arib-std-b67",
                "color_primaries": "bt2020",
                "r_frame_rate": "30000/1001",
                "duration": "12.512000"
            }
        ]
    }"#;

    fn parse(json: &str) -> StitchResult<VideoDetails> {
        parse_probe_json(json, Path::new("clip.mov"), Local::now())
    }

    #[test]
    fn parses_stream_details() {
        let details = parse(HDR_CLIP).unwrap();
        assert_eq!((details.width, details.height), (3840, 2160));
        assert_eq!(details.fps, 29.97);
        assert_eq!(details.duration, 12.512);
        assert_eq!(details.color_transfer, "arib-std-b67");
        assert!(details.is_hdr());
    }

    #[test]
    fn missing_metadata_defaults_to_unknown() {
        let details = parse(r#"{"streams":[{"width":1920,"height":1080}]}"#).unwrap();
        assert_eq!(details.fps, 0.0);
        assert_eq!(details.duration, 0.0);
        assert_eq!(details.pixel_format, "unknown");
        assert_eq!(details.color_primaries, "unknown");
        assert!(!details.is_hdr());
    }

    #[test]
    fn rejects_unusable_streams() {
        let cases = [
            ("not json", "Invalid ffprobe output"),
            (r#"{"streams":[]}"#, "No video stream found"),
            (r#"{}"#, "No video stream found"),
            (
                r#"{"streams":[{"width":1920,"height":1080,"r_frame_rate":"30/0"}]}"#,
                "Invalid frame rate data",
            ),
            (
                r#"{"streams":[{"width":1920,"height":1080,"r_frame_rate":"abc/1"}]}"#,
                "Invalid frame rate data",
            ),
            (r#"{"streams":[{"width":0,"height":1080}]}"#, "Invalid resolution data"),
            (r#"{"streams":[{"height":1080}]}"#, "Invalid resolution data"),
        ];
        for (json, expected) in cases {
            let err = parse(json).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{json}: got {err}"
            );
        }
    }

    #[test]
    fn frame_rate_rounding() {
        assert_eq!(parse_frame_rate("24000/1001"), Some(23.976));
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("60"), Some(0.0));
        assert_eq!(parse_frame_rate("1/0"), None);
    }

    #[test]
    fn durations_format_as_clock() {
        assert_eq!(format_duration(0.0), "0:00:00");
        assert_eq!(format_duration(59.9), "0:00:59");
        assert_eq!(format_duration(3725.4), "1:02:05");
    }

    #[test]
    fn probe_runs_ffprobe_and_reads_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("a.mov");
        fs::write(&clip, b"mov").unwrap();

        let runner = FakeRunner::new(|_| CommandOutput::ok(HDR_CLIP));
        let details = probe_video(&runner, &Toolbox::default(), &clip).unwrap();

        assert_eq!(details.width, 3840);
        let args = runner.calls()[0].args_lossy();
        assert_eq!(args[0..4], ["-v", "error", "-select_streams", "v:0"]);
        assert_eq!(args[5], SHOW_ENTRIES);
        assert_eq!(args.last().unwrap(), &clip.display().to_string());
    }

    #[test]
    fn probe_failure_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("broken.mp4");
        fs::write(&clip, b"").unwrap();

        let runner = FakeRunner::new(|_| CommandOutput::failed(1, "moov atom not found"));
        let err = probe_video(&runner, &Toolbox::default(), &clip).unwrap_err();
        assert!(err.to_string().contains("moov atom not found"));

        let missing = dir.path().join("gone.mov");
        let err = probe_video(&runner, &Toolbox::default(), &missing).unwrap_err();
        assert!(err.to_string().contains("File does not exist"));
        assert_eq!(runner.calls().len(), 1);
    }
}
