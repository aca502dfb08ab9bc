use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn combined_output(output: &std::process::Output) -> String {
    format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Environment with an empty search path, so no external tool resolves.
fn without_tools(cmd: &mut Command, dir: &TempDir) {
    cmd.env("PATH", dir.path()).current_dir(dir.path());
}

#[test]
fn stitcher_help_lists_flags() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("hevc-stitcher"))
        .arg("--help")
        .output()
        .expect("hevc-stitcher --help runs");

    assert!(output.status.success());
    let text = combined_output(&output);
    for flag in ["--hdr", "--resolution", "--fps", "--sort_by", "--dry-run", "--config"] {
        assert!(text.contains(flag), "help text missing {flag}: {text}");
    }
    assert!(text.contains("4K"), "help text missing default resolution: {text}");
}

#[test]
fn stitcher_rejects_unknown_resolution() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("hevc-stitcher"))
        .args(["in", "out.mp4", "--resolution", "8K"])
        .output()
        .expect("hevc-stitcher runs");

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("8K"), "usage error missing value: {text}");
}

#[test]
fn stitcher_rejects_unknown_sort_order() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("hevc-stitcher"))
        .args(["--sort_by", "modified", "in", "out.mp4"])
        .output()
        .expect("hevc-stitcher runs");
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("creation_date"));
}

#[test]
fn stitcher_without_ffmpeg_exits_1() {
    let dir = TempDir::new().expect("tempdir");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hevc-stitcher"));
    without_tools(&mut cmd, &dir);
    let output = cmd
        .args(["clips", "out.mp4", "--color", "never"])
        .output()
        .expect("hevc-stitcher runs");

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("[ERROR] ffmpeg is not found"),
        "missing tool error: {text}"
    );
}

#[test]
fn process_mkv_without_file_prints_help() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("process-mkv"))
        .output()
        .expect("process-mkv runs");

    assert!(output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("--keep-language"), "help text: {text}");
    assert!(text.contains("--delete-subtitles"), "help text: {text}");
}

#[test]
fn process_mkv_without_mkvtoolnix_exits_1() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("movie.mkv"), b"not really matroska").expect("write file");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("process-mkv"));
    without_tools(&mut cmd, &dir);
    let output = cmd
        .args(["movie.mkv", "--dry-run", "--color", "never"])
        .output()
        .expect("process-mkv runs");

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("is not found. Please install mkvtoolnix first."),
        "missing tool error: {text}"
    );
}

#[test]
fn bad_config_file_exits_1() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[mkv]\nmin_size_ratio = 3.0\n").expect("write config");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("process-mkv"))
        .arg("movie.mkv")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("process-mkv runs");

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("min_size_ratio"), "config error: {text}");
}

#[cfg(target_os = "linux")]
#[test]
fn process_mkv_help_write_failure_exits_1() {
    let full = fs::OpenOptions::new()
        .write(true)
        .open("/dev/full")
        .expect("open /dev/full");

    let output = std::process::Command::new(assert_cmd::cargo::cargo_bin!("process-mkv"))
        .stdout(full)
        .output()
        .expect("process-mkv runs");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}
