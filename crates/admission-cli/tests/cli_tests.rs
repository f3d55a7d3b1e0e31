//! Integration tests for the `admit` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the run, stats
//! and check subcommands through the actual binary, including stdin/stdout
//! piping, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn admit() -> Command {
    let mut cmd = Command::cargo_bin("admit").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Run subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn run_stdin_to_stdout() {
    let input = std::fs::read_to_string(fixture("scenario_a.txt")).expect("fixture must exist");

    admit()
        .arg("run")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("101\n-1\n101\n");
}

#[test]
fn run_file_to_stdout() {
    admit()
        .args(["run", "-i", &fixture("scenario_b.txt")])
        .assert()
        .success()
        .stdout("101\n101\n102\n-1\n");
}

#[test]
fn run_file_to_file() {
    let output_path = std::env::temp_dir().join("admit-test-run-output.txt");
    let _ = std::fs::remove_file(&output_path);

    admit()
        .args(["run", "-i", &fixture("scenario_b.txt"), "--verify", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert_eq!(content, "101\n101\n102\n-1\n");

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn run_json_report() {
    let output = admit()
        .args(["run", "-i", &fixture("scenario_b.txt"), "--format", "json"])
        .output()
        .expect("run should execute");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be JSON");
    assert_eq!(report["outcomes"], serde_json::json!([101, 101, 102, -1]));
    assert_eq!(report["reserved"], 3);
    assert_eq!(report["rejected"], 1);
    assert_eq!(report["reservations"].as_array().unwrap().len(), 3);
    assert_eq!(
        report["rooms"][1]["free_intervals"],
        serde_json::json!([{"start": 4, "end": 5}, {"start": 6, "end": 7}])
    );
}

#[test]
fn run_invalid_room_fails() {
    admit()
        .args(["run", "-i", &fixture("invalid_room.txt")])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid configuration for room 101"));
}

#[test]
fn run_invalid_request_fails_without_output() {
    admit()
        .args(["run", "-i", &fixture("invalid_request.txt")])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid request #1"));
}

#[test]
fn run_unparseable_input_reports_line() {
    admit()
        .arg("run")
        .write_stdin("1 1\n101 x 1 6\n1 1 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse batch"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn run_missing_file_fails() {
    admit()
        .args(["run", "-i", "/nonexistent/batch.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn verbose_run_logs_decisions_to_stderr() {
    admit()
        .args(["-vv", "run", "-i", &fixture("scenario_a.txt")])
        .assert()
        .success()
        .stdout("101\n-1\n101\n")
        .stderr(predicate::str::contains("request reserved"))
        .stderr(predicate::str::contains("no admissible room"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_shows_counts_and_rooms() {
    admit()
        .args(["stats", "-i", &fixture("scenario_b.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Requests:  4"))
        .stdout(predicate::str::contains("Reserved:  3"))
        .stdout(predicate::str::contains("Rejected:  1"))
        .stdout(predicate::str::contains("[3, 4)"))
        .stdout(predicate::str::contains("[4, 5) [6, 7)"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_batch() {
    admit()
        .args(["check", "-i", &fixture("scenario_a.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 2 rooms, 3 requests"));
}

#[test]
fn check_invalid_batches() {
    admit()
        .args(["check", "-i", &fixture("invalid_room.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid room configuration"));

    admit()
        .args(["check", "-i", &fixture("invalid_request.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_subcommand_prints_usage() {
    admit()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_format_is_rejected() {
    admit()
        .args(["run", "--format", "xml"])
        .write_stdin("0 0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}
