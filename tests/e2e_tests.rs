//! End-to-end tests for the offline CLI commands.
//!
//! Provider-backed paths are exercised in `server_tests.rs` against mock
//! servers; here only commands that never leave the machine run to success.

// Allow deprecated cargo_bin usage until assert_cmd updates API
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    format!("{}/fixtures/documents/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Build a command running in `dir`, with provider keys cleared.
fn edunarrator(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("edunarrator").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("MURF_API_KEY")
        .env("RUST_LOG", "off");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn voices_lists_default_tones() {
    let dir = tempfile::tempdir().unwrap();
    let output = edunarrator(&dir).arg("voices").output().unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["default"], "Calm Female");
    let voices = json["voices"].as_array().unwrap();
    assert_eq!(voices.len(), 6);
    assert!(voices
        .iter()
        .any(|v| v["tone"] == "Energetic Male" && v["voice_id"] == "en-UK-theo"));
}

#[test]
fn voices_reads_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("edunarrator.toml"),
        "[speech]\ndefault_tone = \"Robot\"\n\n[voices]\nRobot = \"en-US-robo\"\n",
    )
    .unwrap();

    let output = edunarrator(&dir).arg("voices").output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["default"], "Robot");
    assert_eq!(json["voices"].as_array().unwrap().len(), 1);
}

#[test]
fn extract_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let output = edunarrator(&dir)
        .arg("extract")
        .arg(fixture("sample.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let text = json["text"].as_str().unwrap();
    assert!(text.starts_with("Photosynthesis\n"));
    assert!(text.contains("Calvin cycle"));
    assert_eq!(json["chars"].as_u64().unwrap() as usize, text.chars().count());
}

#[test]
fn extract_clean_collapses_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let output = edunarrator(&dir)
        .arg("extract")
        .arg("--clean")
        .arg(fixture("sample.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout_json(&output)["text"].as_str().unwrap().to_string();
    assert!(!text.contains('\n'));
    assert!(!text.contains("  "));
    assert!(text.starts_with("Photosynthesis Photosynthesis is"));
}

#[test]
fn extract_unsupported_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("slides.pptx"), b"not really").unwrap();

    edunarrator(&dir)
        .arg("extract")
        .arg("slides.pptx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format: pptx"));
}

#[test]
fn extract_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    edunarrator(&dir)
        .arg("extract")
        .arg("nope.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn process_short_input_fails_before_any_provider_call() {
    let dir = tempfile::tempdir().unwrap();
    edunarrator(&dir)
        .arg("process")
        .arg(fixture("short.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too short"));
}

#[test]
fn init_config_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    edunarrator(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("edunarrator.toml"));

    let written = fs::read_to_string(dir.path().join("edunarrator.toml")).unwrap();
    assert!(written.contains("[server]"));
    assert!(written.contains("port = 8000"));
    assert!(written.contains("Calm Female"));

    edunarrator(&dir)
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    edunarrator(&dir)
        .arg("init-config")
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn init_config_honours_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    edunarrator(&dir)
        .arg("--config")
        .arg("nested/custom.toml")
        .arg("init-config")
        .assert()
        .success();
    assert!(dir.path().join("nested/custom.toml").exists());
}
