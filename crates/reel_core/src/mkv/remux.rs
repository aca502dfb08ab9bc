//! mkvmerge remux into a scoped temp file, then replace the original.

use std::fs;
use std::path::Path;

use crate::fsutil::{ScopedTemp, SizeGuard};
use crate::tools::{Invocation, ToolError};

use super::errors::{MkvError, MkvResult};
use super::MkvContext;

/// mkvmerge exit codes: 0 = success, 1 = warnings, 2 = errors.
const MKVMERGE_MAX_OK_CODE: i32 = 1;

/// A remux of `file` with extra mkvmerge arguments. The output goes to a
/// fresh `<stem>_<suffix>.<random>.mkv` that exists only while the remux runs.
pub(crate) struct Remux<'a> {
    file: &'a Path,
    suffix: &'a str,
    args: Vec<String>,
}

impl<'a> Remux<'a> {
    pub(crate) fn new(file: &'a Path, suffix: &'a str, args: &[&str]) -> Self {
        Self {
            file,
            suffix,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// `mkvmerge -o <output> <args...> <file>`.
    fn invocation(&self, ctx: &MkvContext<'_>, output: &Path) -> Invocation {
        ctx.toolbox
            .command("mkvmerge")
            .arg("-o")
            .arg(output)
            .args(&self.args)
            .arg(self.file)
    }

    /// The command a real run would execute, with the output named
    /// `<stem>_<suffix>.mkv`. Nothing is created on disk.
    pub(crate) fn preview(&self, ctx: &MkvContext<'_>) -> Invocation {
        let stem = self
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = self
            .file
            .with_file_name(format!("{}_{}.mkv", stem, self.suffix));
        self.invocation(ctx, &output)
    }

    /// Print and run mkvmerge, check the output against `guard`, and
    /// replace the original on success.
    ///
    /// The temp file is removed on every error path.
    pub(crate) fn run(self, ctx: &MkvContext<'_>, guard: Option<SizeGuard>) -> MkvResult<()> {
        let temp = ScopedTemp::beside(self.file, self.suffix)
            .map_err(|e| MkvError::io("creating remux output", e))?;
        let invocation = self.invocation(ctx, temp.path());
        ctx.reporter.command(&invocation.display());

        let output = ctx.runner.capture(&invocation)?;
        ctx.reporter.record_output(&output.stdout, &output.stderr);

        let output = match output.check("mkvmerge", MKVMERGE_MAX_OK_CODE) {
            Ok(output) => output,
            Err(e) => {
                ctx.reporter.show_tail("mkvmerge output");
                return Err(e.into());
            }
        };
        if output.exit_code == 1 {
            ctx.reporter.warn("mkvmerge completed with warnings");
        }

        let output_bytes = temp
            .size()
            .map_err(|e| MkvError::io("reading remux output size", e))?;
        if output_bytes == 0 {
            return Err(ToolError::command_failed(
                "mkvmerge",
                output.exit_code,
                format!("no output written to {}", temp.path().display()),
            )
            .into());
        }

        if let Some(guard) = guard {
            let original_bytes = fs::metadata(self.file)
                .map_err(|e| MkvError::io("reading original file size", e))?
                .len();
            tracing::debug!(
                "Size check: {} -> {} bytes (min ratio {})",
                original_bytes,
                output_bytes,
                guard.min_ratio
            );

            if !guard.accepts(original_bytes, output_bytes) {
                return Err(MkvError::SuspiciousOutput {
                    original_bytes,
                    output_bytes,
                });
            }
        }

        temp.persist_over(self.file).map_err(|e| MkvError::io("replacing original file", e))
    }
}
