//! Pipe-transport integration tests over the built binary — no network I/O.
//!
//! All tests run with the mock backend configured, so the process never
//! contacts an inference server.

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("mediagen").unwrap()
}

/// Write a mock-backend config into `dir` and return its path.
fn write_mock_config(dir: &std::path::Path, storage: bool) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let output_dir = dir.join("out");
    std::fs::write(
        &path,
        format!(
            "[backend]\nmode = \"mock\"\n\n[storage]\nenabled = {storage}\noutput_dir = \"{}\"\n",
            output_dir.display()
        ),
    )
    .unwrap();
    path
}

fn decode(line: &str) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD.decode(line.trim()).unwrap()
}

#[test]
fn image_line_writes_base64_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_mock_config(dir.path(), false);

    let output = cmd()
        .args(["--config", config.to_str().unwrap(), "pipe"])
        .write_stdin("{\"prompt\": \"a cat\", \"width\": 16, \"height\": 16}\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout.lines().next().expect("one reply line");
    let bytes = decode(line);
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn video_prefix_writes_base64_gif() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_mock_config(dir.path(), false);

    let output = cmd()
        .args(["--config", config.to_str().unwrap(), "pipe"])
        .write_stdin(
            "{\"prompt\": \"!video a cat\", \"width\": 16, \"height\": 16, \
             \"num_frames\": 3, \"fps\": 6}\n",
        )
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout.lines().next().expect("one reply line");
    let bytes = decode(line);
    assert!(bytes.starts_with(b"GIF8"));
}

#[test]
fn malformed_line_reports_error_and_keeps_reading() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_mock_config(dir.path(), false);

    let output = cmd()
        .args(["--config", config.to_str().unwrap(), "pipe"])
        .write_stdin("not json at all\n{\"prompt\": \"a cat\", \"width\": 16, \"height\": 16}\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "one reply per input line");
    assert!(lines[0].starts_with("Error:"));
    let bytes = decode(lines[1]);
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn persisted_artifacts_land_in_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_mock_config(dir.path(), true);

    cmd()
        .args(["--config", config.to_str().unwrap(), "pipe"])
        .write_stdin("{\"prompt\": \"a cat\", \"width\": 16, \"height\": 16}\n")
        .assert()
        .success();

    let out_dir = dir.path().join("out");
    let entries: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].as_ref().unwrap().file_name().into_string().unwrap();
    assert!(name.starts_with("image-a-cat-"));
    assert!(name.ends_with(".png"));
}

#[test]
fn remote_mode_without_base_url_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[backend]\nmode = \"remote\"\n").unwrap();

    cmd()
        .args(["--config", config.to_str().unwrap(), "pipe"])
        .env_remove("MEDIAGEN_BACKEND_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn missing_subcommand_exits_with_usage() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}
