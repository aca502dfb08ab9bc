//! Filesystem helpers for in-place container mutation.
//!
//! Every mutation writes a new file next to the original and then renames it
//! over the original. [`ScopedTemp`] owns that new file: if it is dropped
//! before [`ScopedTemp::persist_over`] succeeds, the file is removed, so no
//! failure path leaves a half-written output behind.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::{Builder, TempPath};

/// A temporary output file that is removed unless persisted.
#[derive(Debug)]
pub struct ScopedTemp {
    path: TempPath,
}

impl ScopedTemp {
    /// Create an empty, uniquely named file next to `target`:
    /// `<stem>_<suffix>.<random>.<ext>` in the same directory.
    ///
    /// Keeping it in the same directory keeps the final rename on one
    /// filesystem. Existing files are never reused.
    pub fn beside(target: &Path, suffix: &str) -> io::Result<Self> {
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = format!("{}_{}.", stem, suffix);
        let extension = target
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let path = Builder::new()
            .prefix(&prefix)
            .suffix(&extension)
            .tempfile_in(dir)?
            .into_temp_path();
        tracing::debug!("Created temp file {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the temp file in bytes.
    pub fn size(&self) -> io::Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    /// Atomically replace `target` with the temp file, keeping the
    /// permissions `target` had.
    pub fn persist_over(self, target: &Path) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(target) {
            fs::set_permissions(&self.path, metadata.permissions())?;
        }
        let temp = self.path.to_path_buf();
        self.path.persist(target).map_err(|e| e.error)?;
        tracing::debug!("Replaced {} with {}", target.display(), temp.display());
        Ok(())
    }
}

/// Minimum size a remux output must have relative to its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeGuard {
    /// Output must be strictly larger than `min_ratio * original`.
    pub min_ratio: f64,
}

impl SizeGuard {
    pub fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }

    /// Whether an output of `output_bytes` is an acceptable replacement for
    /// an original of `original_bytes`.
    pub fn accepts(&self, original_bytes: u64, output_bytes: u64) -> bool {
        output_bytes as f64 > original_bytes as f64 * self.min_ratio
    }
}

impl Default for SizeGuard {
    fn default() -> Self {
        Self::new(0.5)
    }
}
