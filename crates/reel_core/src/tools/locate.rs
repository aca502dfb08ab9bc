//! Tool discovery.
//!
//! The search path is carried explicitly in a [`ToolEnvironment`] instead of
//! being read from the process environment at every lookup, so callers (and
//! tests) decide which directories are searched.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::runner::Invocation;
use super::types::{ToolError, ToolResult};

/// Search path used to resolve external tools.
#[derive(Debug, Clone, Default)]
pub struct ToolEnvironment {
    search_path: OsString,
}

impl ToolEnvironment {
    /// Environment built from the current process `PATH`.
    pub fn from_env() -> Self {
        Self {
            search_path: env::var_os("PATH").unwrap_or_default(),
        }
    }

    /// Environment with an explicit `PATH`-style search string.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: search_path.into(),
        }
    }

    /// Find `tool` in the search path directories.
    pub fn find(&self, tool: &str) -> Option<PathBuf> {
        for dir in env::split_paths(&self.search_path) {
            let full = dir.join(tool);
            if is_executable(&full) {
                return Some(full);
            }
            #[cfg(windows)]
            {
                let exe = dir.join(format!("{tool}.exe"));
                if is_executable(&exe) {
                    return Some(exe);
                }
            }
        }
        None
    }
}

/// A regular file the current user may run.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolved locations of the tools a pipeline needs.
#[derive(Debug, Clone, Default)]
pub struct Toolbox {
    paths: BTreeMap<String, PathBuf>,
}

impl Toolbox {
    /// Resolve every tool in `required`, in order.
    ///
    /// A configured override wins over the search path when it points at an
    /// executable file. The first tool that cannot be resolved is returned as
    /// [`ToolError::Missing`].
    pub fn locate(
        environment: &ToolEnvironment,
        required: &[&str],
        overrides: &BTreeMap<String, PathBuf>,
    ) -> ToolResult<Self> {
        let mut paths = BTreeMap::new();

        for &tool in required {
            let resolved = overrides
                .get(tool)
                .filter(|p| is_executable(p))
                .cloned()
                .or_else(|| environment.find(tool))
                .ok_or_else(|| ToolError::missing(tool))?;

            tracing::debug!("Resolved {} -> {}", tool, resolved.display());
            paths.insert(tool.to_string(), resolved);
        }

        Ok(Self { paths })
    }

    /// Resolved path of `tool`, or the bare name when it was never resolved.
    pub fn path(&self, tool: &str) -> PathBuf {
        self.paths
            .get(tool)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(tool))
    }

    /// Start an invocation of `tool`.
    pub fn command(&self, tool: &str) -> Invocation {
        Invocation::new(tool, self.path(tool))
    }
}
