//! Concat demuxer manifest.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::models::VideoFile;

use super::errors::{StitchError, StitchResult};

/// One `file '<path>'` line, with single quotes escaped for the concat
/// demuxer.
pub fn manifest_line(path: &Path) -> String {
    let quoted = path.to_string_lossy().replace('\'', r"'\''");
    format!("file '{}'\n", quoted)
}

/// Manifest text listing `files` in order.
pub fn render_manifest(files: &[VideoFile]) -> String {
    files.iter().map(|f| manifest_line(&f.path)).collect()
}

/// Write the manifest to a temp file that is removed when dropped.
///
/// Keep the returned handle alive until ffmpeg exits.
pub fn write_manifest(files: &[VideoFile]) -> StitchResult<NamedTempFile> {
    let mut manifest = tempfile::Builder::new()
        .prefix("concat-")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| StitchError::io("creating concat manifest", e))?;

    manifest
        .write_all(render_manifest(files).as_bytes())
        .and_then(|()| manifest.flush())
        .map_err(|e| StitchError::io("writing concat manifest", e))?;

    tracing::debug!(
        "Wrote concat manifest {} ({} files)",
        manifest.path().display(),
        files.len()
    );
    Ok(manifest)
}
