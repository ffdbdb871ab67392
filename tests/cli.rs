//! Binary-level checks: exit codes, verbose output, and the timing report.

use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sortmatch"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run sortmatch")
}

fn run(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_successful_run_exits_zero() {
    let output = run(&["4", "4", "2", "--fixed"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
}

#[test]
fn test_threaded_low_memory_superset_runs() {
    let output = run(&[
        "64",
        "64",
        "3",
        "--seed",
        "7",
        "--threaded",
        "--low-memory",
        "--superset",
    ]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
}

#[test]
fn test_verbose_prints_one_line_per_update() {
    // Fixed dataset, 2 updates against 3 subscriptions in one dimension:
    // updates [61,69] and [71,89] both overlap only subscription 2 [45,90].
    let output = run(&["2", "3", "1", "--fixed", "--verbose"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "00100000000000000000000000000000\n00100000000000000000000000000000\n"
    );
}

#[test]
fn test_space_type_selection_runs_all_types() {
    for space_type in ["i32", "i64", "f32", "f64"] {
        let output = run(&["8", "8", "2", "--seed", "3", "--space-type", space_type]);
        assert_eq!(output.status.code(), Some(0), "{space_type}");
    }
}

#[test]
fn test_stats_go_to_stderr() {
    let output = run(&["4", "4", "2", "--fixed", "--stats"]);
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("4 updates against 4 subscriptions"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_zero_counts_exit_with_invalid_input() {
    let output = run(&["0", "5", "1"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).contains("update extents"));

    let output = run(&["5", "0", "1"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).contains("subscription extents"));

    let output = run(&["5", "5", "0"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).contains("dimensions"));
}

#[test]
fn test_too_many_dimensions_exits_with_its_code() {
    let output = run(&["5", "5", "4"]);
    assert_eq!(output.status.code(), Some(6));
    assert!(stdout(&output).contains("dimensions"));
}

#[test]
fn test_help_exits_zero() {
    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("<UPDATES>"));
}

#[test]
fn test_missing_arguments_exit_with_invalid_input() {
    let output = run(&["5"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_timing_report_appends_a_seconds_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["4", "4", "2", "--fixed", "--timing"]);
    assert_eq!(output.status.code(), Some(0));

    let report = dir.path().join("sortmatch_4_4_2.txt");
    let content = std::fs::read_to_string(&report).unwrap();
    let seconds: f64 = content.trim().parse().unwrap();
    assert!(seconds >= 0.0);

    // A second run appends another line.
    run_in(dir.path(), &["4", "4", "2", "--fixed", "--timing"]);
    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content.lines().count(), 2);
}
