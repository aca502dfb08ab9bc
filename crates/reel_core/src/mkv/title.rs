//! Segment title normalization.

use std::path::Path;

use super::errors::MkvResult;
use super::mkvinfo::read_mkvinfo;
use super::MkvContext;

/// What the title step decided for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleDecision {
    AlreadyMatches,
    /// Set the title to `expected`, replacing `current` (if any).
    Set {
        current: Option<String>,
        expected: String,
    },
}

impl TitleDecision {
    pub fn compare(current: Option<String>, expected: String) -> Self {
        if current.as_deref() == Some(expected.as_str()) {
            TitleDecision::AlreadyMatches
        } else {
            TitleDecision::Set { current, expected }
        }
    }
}

/// The title a file should carry: its name without directory or extension.
pub fn expected_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Re-probe `file` and set its title to the file stem if it differs.
///
/// mkvpropedit edits the file in place, so no temp file is involved.
pub fn normalize_title(ctx: &MkvContext<'_>, file: &Path) -> MkvResult<TitleDecision> {
    let info = read_mkvinfo(ctx.runner, ctx.toolbox, file)?;
    let decision = TitleDecision::compare(info.title, expected_title(file));

    match decision {
        TitleDecision::AlreadyMatches => {
            ctx.reporter.info(&format!(
                "The title of '{}' already matches the filename. No change needed.",
                file.display()
            ));
        }
        TitleDecision::Set { ref expected, .. } => {
            let invocation = ctx
                .toolbox
                .command("mkvpropedit")
                .arg(file)
                .args(["--edit", "info", "--set"])
                .arg(format!("title={}", expected));
            ctx.reporter.command(&invocation.display());

            if ctx.dry_run {
                ctx.reporter.dry_run(&format!(
                    "Would set the title of '{}' to '{}'.",
                    file.display(),
                    expected
                ));
            } else {
                let output = ctx.runner.capture(&invocation)?;
                ctx.reporter.record_output(&output.stdout, &output.stderr);
                if let Err(e) = output.check("mkvpropedit", 0) {
                    ctx.reporter.show_tail("mkvpropedit output");
                    return Err(e.into());
                }
                ctx.reporter.success(&format!(
                    "Set the title of '{}' to '{}'.",
                    file.display(),
                    expected
                ));
            }
        }
    }

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::MkvSettings;
    use crate::logging::Reporter;
    use crate::tools::testing::FakeRunner;
    use crate::tools::{CommandOutput, Toolbox};

    #[test]
    fn expected_title_is_file_stem() {
        assert_eq!(expected_title(Path::new("/media/Show S01E01.mkv")), "Show S01E01");
        assert_eq!(expected_title(Path::new("archive.v2.mkv")), "archive.v2");
    }

    #[test]
    fn compare_detects_missing_and_different_titles() {
        assert_eq!(
            TitleDecision::compare(Some("Ep".into()), "Ep".into()),
            TitleDecision::AlreadyMatches
        );
        assert_eq!(
            TitleDecision::compare(None, "Ep".into()),
            TitleDecision::Set {
                current: None,
                expected: "Ep".into()
            }
        );
    }

    #[test]
    fn second_run_makes_no_change() {
        // Fake mkvinfo reports whatever mkvpropedit last set.
        let title = RefCell::new(String::from("Old Title"));
        let runner = FakeRunner::new(|invocation| match invocation.tool() {
            "mkvinfo" => CommandOutput::ok(format!("| + Title: {}\n", title.borrow())),
            "mkvpropedit" => {
                let set = invocation.args_lossy()[4].clone();
                *title.borrow_mut() = set.trim_start_matches("title=").to_string();
                CommandOutput::ok("Done.")
            }
            _ => CommandOutput::ok(""),
        });
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
        let file = Path::new("Episode 2.mkv");

        let first = normalize_title(&ctx, file).unwrap();
        let second = normalize_title(&ctx, file).unwrap();

        assert!(matches!(first, TitleDecision::Set { .. }));
        assert_eq!(second, TitleDecision::AlreadyMatches);
        assert_eq!(runner.calls_to("mkvpropedit"), 1);

        let set_call = runner
            .calls()
            .into_iter()
            .find(|c| c.tool() == "mkvpropedit")
            .unwrap();
        assert_eq!(
            set_call.display(),
            "mkvpropedit Episode 2.mkv --edit info --set title=Episode 2"
        );
    }

    #[test]
    fn mkvpropedit_failure_is_an_error() {
        let runner = FakeRunner::new(|invocation| match invocation.tool() {
            "mkvpropedit" => CommandOutput::failed(2, "Error: file is read-only"),
            _ => CommandOutput::ok(""),
        });
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

        let err = normalize_title(&ctx, Path::new("locked.mkv")).unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }
}
