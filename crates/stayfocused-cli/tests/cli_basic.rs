//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_stayfocused"))
        .args(args)
        .env("STAYFOCUSED_CONFIG_DIR", config_dir)
        .env_remove("STAYFOCUSED_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_timer_presets_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["timer", "presets", "--json"]);
    assert_eq!(code, 0, "Timer presets failed");
    let presets = parse_json(&stdout);
    let presets = presets.as_array().unwrap();
    assert_eq!(presets.len(), 3);
    assert_eq!(presets[0]["key"], "focus");
    assert_eq!(presets[0]["seconds"], 1500);
}

#[test]
fn test_timer_presets_table() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["timer", "presets"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("shortBreak"));
    assert!(stdout.contains("05:00"));
}

#[test]
fn test_timer_simulate_pause_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &[
            "timer", "simulate", "--preset", "shortBreak", "--pause-at", "120", "--resume-at",
            "150", "--elapsed", "150",
        ],
    );
    assert_eq!(code, 0, "Timer simulate failed: {stderr}");
    let report = parse_json(&stdout);
    assert_eq!(report["snapshot"]["type"], "StateSnapshot");
    assert_eq!(report["snapshot"]["phase"], "running");
    assert_eq!(report["snapshot"]["remaining_secs"], 180);
    assert_eq!(report["snapshot"]["display"], "03:00");
    assert_eq!(report["finish_count"], 0);
}

#[test]
fn test_timer_simulate_finish() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["timer", "simulate", "--preset", "focus", "--elapsed", "1600"],
    );
    assert_eq!(code, 0);
    let report = parse_json(&stdout);
    assert_eq!(report["snapshot"]["phase"], "finished");
    assert_eq!(report["snapshot"]["remaining_secs"], 0);
    assert_eq!(report["finish_count"], 1);
    let events = report["events"].as_array().unwrap();
    assert_eq!(events.last().unwrap()["type"], "TimerFinished");
}

#[test]
fn test_timer_simulate_pause_after_deadline_reports_finish() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &[
            "timer", "simulate", "--preset", "shortBreak", "--pause-at", "400", "--elapsed",
            "500",
        ],
    );
    assert_eq!(code, 0, "Timer simulate failed: {stderr}");
    let report = parse_json(&stdout);
    assert_eq!(report["finish_count"], 1);
    assert_eq!(report["snapshot"]["phase"], "finished");
    let finishes = report["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["type"] == "TimerFinished")
        .count();
    assert_eq!(finishes, 1);
}

#[test]
fn test_timer_simulate_huge_elapsed_saturates() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &["timer", "simulate", "--preset", "focus", "--elapsed", "18446744073709551615"],
    );
    assert_eq!(code, 0, "Timer simulate failed: {stderr}");
    let report = parse_json(&stdout);
    assert_eq!(report["snapshot"]["remaining_secs"], 0);
    assert_eq!(report["finish_count"], 1);
}

#[test]
fn test_timer_simulate_unknown_preset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["timer", "simulate", "--preset", "lunch", "--elapsed", "10"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("lunch"));
}

#[test]
fn test_timer_simulate_rejects_out_of_order_marks() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        dir.path(),
        &[
            "timer", "simulate", "--preset", "focus", "--pause-at", "100", "--resume-at", "50",
            "--elapsed", "200",
        ],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "presets.0.seconds"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "1500");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "presets.0.seconds", "1200"]);
    assert_eq!(code, 0, "Config set failed");

    let (_, stdout, _) = run_cli(dir.path(), &["timer", "presets", "--json"]);
    assert_eq!(parse_json(&stdout)[0]["seconds"], 1200);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "sound.volume", "3"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("sound.volume"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let json = parse_json(&stdout);
    assert_eq!(json["cadence"]["background_ms"], 1000);
}

#[test]
fn test_gallery_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["gallery", "list", "--json"]);
    assert_eq!(code, 0, "Gallery list failed");
    let entries = parse_json(&stdout);
    assert_eq!(entries[0]["position"], "1/2");
    assert_eq!(entries[1]["image"], "/cats/Dio1.jpg");
}
