//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway config
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "gatetime-cli", "--"])
        .args(args)
        .env("GATETIME_HOME", home)
        .env_remove("GATETIME_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is not JSON")
}

const LAX_TRIP: [&str; 6] = ["--flight", "ord-lax-101", "--mode", "car", "--risk", "balanced"];

#[test]
fn test_flights_search() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["flights", "tokyo", "--json"]);
    assert_eq!(code, 0);
    let flights = json(&stdout);
    let flights = flights.as_array().unwrap();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0]["id"], "ord-nrt-700");
}

#[test]
fn test_flights_list_text() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["flights"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ord-lax-101"));
    assert!(stdout.contains("ord-lhr-900"));
}

#[test]
fn test_origins_search() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["origins", "midway", "--json"]);
    assert_eq!(code, 0);
    let origins = json(&stdout);
    assert_eq!(origins[0]["id"], "midway-airport");
}

#[test]
fn test_plan_json() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["plan"];
    args.extend(LAX_TRIP);
    args.push("--json");
    let (stdout, stderr, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0, "plan failed: {stderr}");

    let out = json(&stdout);
    let rec = &out["recommendation"];
    assert_eq!(rec["leave_time"], "2025-11-15T16:30:00Z");
    assert_eq!(rec["expected_gate_arrival_time"], "2025-11-15T17:45:00Z");
    assert_eq!(rec["boarding_time"], "2025-11-15T18:00:00Z");
    assert_eq!(rec["risk_level"], "low");
    assert_eq!(out["status"], "planning");
    assert_eq!(out["options"]["origin_label"], "Home");
    assert_eq!(out["steps"].as_array().unwrap().len(), 6);
}

#[test]
fn test_plan_text() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["plan"];
    args.extend(LAX_TRIP);
    let (stdout, _, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0);
    assert!(stdout.contains("Leave at        16:30"));
    assert!(stdout.contains("Risk            Low"));
}

#[test]
fn test_plan_unknown_flight() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["plan", "--flight", "nope", "--mode", "car", "--risk", "balanced"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Unknown flight 'nope'"));
}

#[test]
fn test_track_late_security_then_boarding() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["track"];
    args.extend(LAX_TRIP);
    args.extend(["--report", "security@17:40", "--json"]);
    let (stdout, stderr, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0, "track failed: {stderr}");

    let out = json(&stdout);
    assert_eq!(out["recommendation"]["actual_buffer_minutes"], 10);
    assert_eq!(out["recommendation"]["risk_level"], "low");
    assert_eq!(out["status"], "in_progress");

    args.pop();
    args.extend(["--report", "boarding@17:58", "--json"]);
    let (stdout, _, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0);
    let out = json(&stdout);
    assert_eq!(out["status"], "completed");
    assert!(out["summary"].as_str().unwrap().contains("10 minutes before boarding"));
    assert!(out["steps"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["status"] == "completed"));
}

#[test]
fn test_track_report_after_boarding_fails() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["track"];
    args.extend(LAX_TRIP);
    args.extend(["--report", "boarding@17:55", "--report", "gate@17:56"]);
    let (_, stderr, code) = run_cli(home.path(), &args);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_track_rejects_bad_clock() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["track"];
    args.extend(LAX_TRIP);
    args.extend(["--report", "curb@25:99"]);
    let (_, stderr, code) = run_cli(home.path(), &args);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid clock time '25:99'"));
}

#[test]
fn test_track_demo_clamps_late_report() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["track"];
    args.extend(LAX_TRIP);
    args.extend(["--demo", "--report", "security@17:59", "--json"]);
    let (stdout, stderr, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0, "track --demo failed: {stderr}");

    let out = json(&stdout);
    let rec = &out["recommendation"];
    assert_eq!(rec["expected_gate_arrival_time"], "2025-11-15T17:55:00Z");
    assert_eq!(rec["actual_buffer_minutes"], 5);
    assert_eq!(rec["risk_level"], "low");

    let security = &out["guidance"][3];
    assert_eq!(security["id"], "security");
    assert_eq!(security["delta"], "14 min late");
    let boarding = out["guidance"][5]["description"].as_str().unwrap();
    assert!(boarding.starts_with("Balanced aims for ~15 min of buffer; this plan currently has ~5 min."));
}

#[test]
fn test_track_demo_softens_missed_buffer() {
    let home = tempfile::tempdir().unwrap();
    let trip = ["--flight", "ord-lax-101", "--mode", "car", "--risk", "low_wait"];

    let mut strict = vec!["track"];
    strict.extend(trip);
    strict.extend(["--report", "security@17:55", "--json"]);
    let (stdout, _, code) = run_cli(home.path(), &strict);
    assert_eq!(code, 0);
    let out = json(&stdout);
    assert_eq!(out["recommendation"]["actual_buffer_minutes"], 0);
    assert_eq!(out["recommendation"]["risk_level"], "high");

    let mut demo = vec!["track"];
    demo.extend(trip);
    demo.extend(["--demo", "--report", "security@18:10", "--json"]);
    let (stdout, _, code) = run_cli(home.path(), &demo);
    assert_eq!(code, 0);
    let out = json(&stdout);
    assert_eq!(out["recommendation"]["expected_gate_arrival_time"], "2025-11-15T18:00:00Z");
    assert_eq!(out["recommendation"]["actual_buffer_minutes"], 0);
    assert_eq!(out["recommendation"]["risk_level"], "medium");
}

#[test]
fn test_plan_text_shows_guidance() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["plan"];
    args.extend(LAX_TRIP);
    let (stdout, _, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0);
    assert!(stdout.contains("~10 min walk to your domestic gate in Terminal 1."));
    assert!(stdout.contains("Balanced setting adds ~15 min of buffer before boarding begins."));
    assert!(stdout.contains(&format!("  {:<22} {:>3} min", "Total", 90)));
}

#[test]
fn test_config_set_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "profile.walk_to_gate", "12"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "profile.walk_to_gate"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "12");

    let (_, _, code) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "profile.walk_to_gate"]);
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_set_rejects_oversized_duration() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "profile.travel.car", "9999999999999"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "profile.travel.car"]);
    assert_eq!(stdout.trim(), "35");
}

#[test]
fn test_config_path() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}
