//! Input discovery and ordering.

use std::fs;
use std::path::Path;

use crate::models::{SortOrder, VideoFile};

use super::errors::{StitchError, StitchResult};
use super::probe::modified_time;

const VIDEO_EXTENSIONS: [&str; 2] = [".mov", ".mp4"];

/// Whether `name` ends in `.mov` or `.mp4`, ignoring case.
pub fn is_video_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Video files directly inside `dir`, in directory listing order.
///
/// `dir` is resolved to an absolute path first, so every returned path is
/// absolute.
pub fn list_video_files(dir: &Path) -> StitchResult<Vec<VideoFile>> {
    let dir = fs::canonicalize(dir)
        .map_err(|e| StitchError::io(format!("reading directory {}", dir.display()), e))?;
    let entries = fs::read_dir(&dir)
        .map_err(|e| StitchError::io(format!("reading directory {}", dir.display()), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| StitchError::io(format!("reading directory {}", dir.display()), e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_video_file(&name) {
            continue;
        }
        let path = entry.path();
        let modified = modified_time(&path)?;
        files.push(VideoFile {
            name,
            path,
            modified,
        });
    }
    Ok(files)
}

/// Sort in place. Both orders are stable.
pub fn sort_video_files(files: &mut [VideoFile], order: SortOrder) {
    match order {
        SortOrder::Filename => files.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::CreationDate => files.sort_by_key(|f| f.modified),
    }
}

/// List and sort the video files in `dir`.
pub fn sorted_video_files(dir: &Path, order: SortOrder) -> StitchResult<Vec<VideoFile>> {
    let mut files = list_video_files(dir)?;
    sort_video_files(&mut files, order);
    tracing::debug!("{} video files in {} ({})", files.len(), dir.display(), order);
    Ok(files)
}
