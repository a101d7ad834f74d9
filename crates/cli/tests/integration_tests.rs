//! Integration tests for the `run-pipeline` CLI.
//!
//! Exercises the binary's exit-code contract end to end: success against a
//! minimal raw telemetry tree, and failure (non-zero exit, stderr message)
//! against an empty one.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn run_pipeline() -> Command {
    Command::cargo_bin("run-pipeline").unwrap()
}

fn write_sample_race(raw_root: &std::path::Path) {
    let race_dir = raw_root.join("Barber_R1");
    std::fs::create_dir_all(&race_dir).unwrap();
    std::fs::write(
        race_dir.join("car12_telemetry.csv"),
        "meta_time,Vehicle_ID,gps_lat,gps_long,speed\n\
         0,12,33.50,-86.60,50.0\n\
         100,12,33.51,-86.59,51.0\n\
         200,12,33.52,-86.58,52.0\n\
         300,12,33.53,-86.57,53.0\n\
         400,12,33.54,-86.56,54.0\n\
         500,12,33.56,-86.54,55.0\n\
         600,12,33.58,-86.52,56.0\n\
         700,12,33.60,-86.50,57.0\n\
         800,12,33.63,-86.48,58.0\n\
         900,12,33.66,-86.46,59.0\n\
         1000,12,33.70,-86.44,60.0\n",
    )
    .unwrap();
    std::fs::write(
        race_dir.join("car45_telemetry.csv"),
        "meta_time,Vehicle_ID,gps_lat,gps_long,speed\n\
         0,45,33.50,-86.60,48.0\n\
         100,45,33.51,-86.59,49.0\n\
         200,45,33.52,-86.58,50.0\n\
         300,45,33.53,-86.57,51.0\n\
         400,45,33.54,-86.56,52.0\n\
         500,45,33.56,-86.54,53.0\n\
         600,45,33.58,-86.52,54.0\n\
         700,45,33.60,-86.50,55.0\n\
         800,45,33.63,-86.48,56.0\n\
         900,45,33.66,-86.46,57.0\n\
         1000,45,33.70,-86.44,58.0\n",
    )
    .unwrap();
}

#[test]
fn test_cli_help() {
    run_pipeline()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("telemetry analytics pipeline"));
}

#[test]
fn test_cli_version() {
    run_pipeline()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("run-pipeline"));
}

#[test]
fn test_run_succeeds_over_a_small_raw_tree() {
    let raw_dir = TempDir::new().unwrap();
    let processed_dir = TempDir::new().unwrap();
    write_sample_race(raw_dir.path());

    run_pipeline()
        .args(["--raw-root", raw_dir.path().to_str().unwrap()])
        .args(["--processed-root", processed_dir.path().to_str().unwrap()])
        .args(["--workers", "1"])
        .assert()
        .success();

    assert!(processed_dir.path().join("master_timeline.parquet").exists());
    assert!(processed_dir.path().join("timeline/timeline_index.json").exists());
}

#[test]
fn test_run_fails_on_an_empty_raw_root() {
    let raw_dir = TempDir::new().unwrap();
    let processed_dir = TempDir::new().unwrap();

    run_pipeline()
        .args(["--raw-root", raw_dir.path().to_str().unwrap()])
        .args(["--processed-root", processed_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("run-pipeline: aborted"));
}

#[test]
fn test_missing_required_arg_exits_with_usage_error() {
    run_pipeline().arg("--raw-root").arg("./raw").assert().failure().code(2);
}
