//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_summitpace"))
        .args(args)
        .env("SUMMITPACE_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(config_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(config_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[test]
fn test_plan_default_summary() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["plan"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Summit:  08:14"));
    assert!(stdout.contains("Return:  11:44"));
    assert!(stdout.contains("Total:   7h 44m"));
    assert!(!stdout.contains("late return"));
}

#[test]
fn test_plan_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["plan", "--json"]);
    let schedule = out["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 23);
    assert_eq!(schedule[0]["predicted_time"], "04:00");
    assert_eq!(schedule[1]["predicted_time"], "04:25");
    assert_eq!(out["summary"]["summit_eta"], "08:14");
}

#[test]
fn test_plan_late_start_flags_late_return() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["plan", "--start", "10:00"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("late return"));
}

#[test]
fn test_update_revises_from_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(
        dir.path(),
        &[
            "update", "--flat", "86", "--steady", "60", "--boulder", "60",
            "--checkpoint", "5.2@11:10", "--json",
        ],
    );
    assert_eq!(out["resumed_from"]["mile"], 5.2);
    let schedule = out["schedule"].as_array().unwrap();
    assert_eq!(schedule[0]["predicted_time"], "11:10");
    assert_eq!(schedule[1]["predicted_time"], "11:43");
}

#[test]
fn test_update_marks_checkpoint_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["update", "-c", "3@05:15"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Resuming from mile 3 at 05:15 (8532ft)"));
    assert!(stdout.lines().any(|l| l.starts_with('*')));
}

#[test]
fn test_update_between_waypoints_reports_checkpoint_mile() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["update", "-c", "4.45@08:00"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Resuming from mile 4.45 at 08:00 (9350ft)"));
    assert!(stdout.contains("From:    mile 4.45"));

    let out = run_json(dir.path(), &["update", "-c", "4.45@08:00", "--json"]);
    assert_eq!(out["resumed_from"]["mile"], 4.45);
    assert_eq!(out["summary"]["resumed_from_mile"], 4.45);
    assert_eq!(out["schedule"][0]["mile"], 4.7);
}

#[test]
fn test_plan_with_huge_pace_does_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(dir.path(), &["plan", "--flat", "1e17"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("late return"));

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "paces.flat", "1e17"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(dir.path(), &["update", "-c", "2@06:00"]);
    assert_eq!(code, 0);
}

#[test]
fn test_update_errors() {
    let dir = tempfile::tempdir().unwrap();

    let (code, _, stderr) = run_cli(dir.path(), &["update"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (code, _, _) = run_cli(dir.path(), &["update", "-c", "@05:15"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(dir.path(), &["update", "-c", "2@03:30"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(
        dir.path(),
        &["update", "-c", "2@03:30", "--day-boundary", "next-day"],
    );
    assert_eq!(code, 0);
}

#[test]
fn test_fatigue_on_pace() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["fatigue", "-c", "3@05:15", "--json"]);
    assert_eq!(out["adjustment"]["overall_fatigue"], 1.0);
    assert_eq!(out["analyses"][0]["elapsed_minutes"], 75);
}

#[test]
fn test_paces_table() {
    let dir = tempfile::tempdir().unwrap();
    let rows = run_json(dir.path(), &["paces", "--json"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["terrain"], "flat");
    assert_eq!(rows[0]["original_descent"], 14.0);
    assert_eq!(rows[0]["change_percent"], 0);
}

#[test]
fn test_route_legs() {
    let dir = tempfile::tempdir().unwrap();
    let legs = run_json(dir.path(), &["route", "--legs", "--json"]);
    assert_eq!(legs.as_array().unwrap().len(), 11);

    let (code, stdout, _) = run_cli(dir.path(), &["route"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Middle Teton Summit"));
}

#[test]
fn test_config_set_get_reset() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["config", "set", "trip.start_time", "05:00"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "trip.start_time"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "05:00");

    let out = run_json(dir.path(), &["plan", "--json"]);
    assert_eq!(out["summary"]["summit_eta"], "09:14");

    let (code, _, _) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "trip.start_time"]);
    assert_eq!(stdout.trim(), "04:00");
}

#[test]
fn test_config_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();

    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no.such.key"));

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "paces.flat", "0"]);
    assert_eq!(code, 1);
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_path_uses_override_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with(dir.path().to_str().unwrap()));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("summitpace"));
}
