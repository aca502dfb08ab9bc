//! ffmpeg concat + HEVC encode command.

use std::path::Path;

use crate::config::StitchSettings;
use crate::models::Resolution;
use crate::tools::{Invocation, Toolbox};

const HDR_ARGS: [&str; 10] = [
    "-pix_fmt",
    "p010le",
    "-color_primaries",
    "bt2020",
    "-color_trc",
    "arib-std-b67",
    "-colorspace",
    "bt2020nc",
    "-profile:v",
    "main10",
];

const SDR_ARGS: [&str; 4] = ["-pix_fmt", "yuv420p", "-profile:v", "main"];

/// Output format of the encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeTarget {
    pub resolution: Resolution,
    pub fps: u32,
    /// 10-bit HLG output instead of 8-bit SDR.
    pub hdr: bool,
}

/// Build the ffmpeg invocation reading `manifest` and writing `output`.
///
/// Input options come before `-i`; every encoder option follows it.
pub fn encode_command(
    toolbox: &Toolbox,
    settings: &StitchSettings,
    target: &EncodeTarget,
    manifest: &Path,
    output: &Path,
) -> Invocation {
    let (width, height) = target.resolution.dimensions();

    toolbox
        .command("ffmpeg")
        .args(["-f", "concat", "-safe", "0", "-i"])
        .arg(manifest)
        .arg("-c:v")
        .arg(&settings.video_codec)
        .arg("-preset")
        .arg(&settings.preset)
        .args(["-movflags", "faststart", "-tag:v", "hvc1"])
        .arg("-b:v")
        .arg(&settings.bitrate)
        .arg("-maxrate")
        .arg(&settings.maxrate)
        .arg("-bufsize")
        .arg(&settings.bufsize)
        .arg("-vf")
        .arg(format!("scale={}:{}", width, height))
        .arg("-r")
        .arg(target.fps.to_string())
        .args(if target.hdr { &HDR_ARGS[..] } else { &SDR_ARGS[..] })
        .arg(output)
}
