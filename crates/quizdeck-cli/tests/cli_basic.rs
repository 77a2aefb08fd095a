//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. All
//! commands run against the dev data directory so a developer's real
//! presenter state is left alone.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "quizdeck-cli", "--quiet", "--"])
        .args(args)
        .env("QUIZDECK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn init_pack(dir: &Path) -> String {
    let path = dir.join("pack.json");
    let path_str = path.to_string_lossy().to_string();
    let (_, stderr, code) = run_cli(&["deck", "init", &path_str]);
    assert_eq!(code, 0, "deck init failed: {stderr}");
    path_str
}

// The persisted engine is shared state, so the whole lifecycle lives in
// one test to keep parallel test runs from interleaving commands.
#[test]
fn timer_lifecycle() {
    let (stdout, stderr, code) = run_cli(&["timer", "start", "90"]);
    assert_eq!(code, 0, "timer start failed: {stderr}");
    assert!(stdout.contains("CountdownStarted"));

    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "CountdownSnapshot");
    assert_eq!(snapshot["status"], "running");

    let (stdout, _, code) = run_cli(&["timer", "pause"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("CountdownPaused"));

    let (stdout, _, code) = run_cli(&["timer", "resume"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("CountdownResumed"));

    let (stdout, _, code) = run_cli(&["timer", "stop"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("CountdownStopped"));
}

#[test]
fn deck_init_list_and_locate() {
    let dir = tempfile::tempdir().unwrap();
    let pack = init_pack(dir.path());

    let (stdout, _, code) = run_cli(&["deck", "list", &pack]);
    assert_eq!(code, 0);
    // A round marker plus two questions.
    assert_eq!(stdout.lines().count(), 3);
    let key = stdout.lines().next().unwrap().split_whitespace().nth(1).unwrap().to_string();
    assert!(key.starts_with("round|"));

    let (stdout, _, code) = run_cli(&["deck", "locate", &pack, &key]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0");

    let (_, stderr, code) = run_cli(&["deck", "locate", &pack, "audio|nope|nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no deck item matches"));
}

#[test]
fn present_start_next_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let pack = init_pack(dir.path());

    let (stdout, stderr, code) = run_cli(&["present", "start", &pack, "--from-top"]);
    assert_eq!(code, 0, "present start failed: {stderr}");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["index"], 0);
    assert_eq!(snapshot["kind"], "round");

    let (stdout, _, code) = run_cli(&["present", "next", &pack]);
    assert_eq!(code, 0);
    assert!(stdout.contains("SlideChanged"));

    // The saved position survives to the next invocation.
    let (stdout, _, code) = run_cli(&["present", "status", &pack]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["index"], 1);

    let (stdout, _, code) = run_cli(&["present", "clear", &pack]);
    assert_eq!(code, 0);
    assert!(stdout.contains("saved position cleared"));

    let (stdout, _, code) = run_cli(&["present", "status", &pack]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["index"], 0);
}

#[test]
fn config_get_set_list() {
    let (_, _, code) = run_cli(&["config", "set", "audio.volume", "65"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(&["config", "get", "audio.volume"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "65");

    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("audio"));

    let (_, stderr, code) = run_cli(&["config", "get", "ui.theme"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));

    let (_, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0);
}
