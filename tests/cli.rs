#![cfg(unix)]

mod common;

use common::{fake_loudgain, read_calls, touch};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the scanner with `PATH` restricted to `path_dir`
fn run_scanner(path_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_loudgain-scanner"))
        .args(args)
        .env("PATH", path_dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_scan_succeeds_with_loudgain_on_path() {
    let bin_dir = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    let log = bin_dir.path().join("calls.log");
    fake_loudgain(bin_dir.path(), &log, 0);
    touch(&library.path().join("Album"), &["01.flac", "02.flac"]);
    touch(&library.path().join("Mixed"), &["a.flac", "b.mp3"]);

    let output = run_scanner(bin_dir.path(), &[library.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(read_calls(&log).len(), 1);
}

#[test]
fn test_failing_loudgain_still_exits_zero() {
    let bin_dir = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    let log = bin_dir.path().join("calls.log");
    fake_loudgain(bin_dir.path(), &log, 2);
    touch(&library.path().join("Album"), &["01.wv"]);

    let output = run_scanner(bin_dir.path(), &[library.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(read_calls(&log).len(), 1);
}

#[test]
fn test_missing_argument_exits_one() {
    let bin_dir = TempDir::new().unwrap();
    fake_loudgain(bin_dir.path(), &bin_dir.path().join("calls.log"), 0);

    let output = run_scanner(bin_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("<DIRECTORY>"), "{}", stderr(&output));
}

#[test]
fn test_unknown_flag_exits_one() {
    let bin_dir = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    fake_loudgain(bin_dir.path(), &bin_dir.path().join("calls.log"), 0);

    let output = run_scanner(
        bin_dir.path(),
        &["--dry-run", library.path().to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_nonexistent_directory_exits_one() {
    let bin_dir = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    let log = bin_dir.path().join("calls.log");
    fake_loudgain(bin_dir.path(), &log, 0);
    let missing = library.path().join("no-such-dir");

    let output = run_scanner(bin_dir.path(), &[missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"), "{}", stderr(&output));
    assert!(read_calls(&log).is_empty());
}

#[test]
fn test_loudgain_not_found_exits_one() {
    let empty_path = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    touch(&library.path().join("Album"), &["01.flac"]);

    let output = run_scanner(empty_path.path(), &[library.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("loudgain not found"), "{}", stderr(&output));
}

#[test]
fn test_missing_tool_reported_before_missing_argument() {
    let empty_path = TempDir::new().unwrap();

    let output = run_scanner(empty_path.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("loudgain not found"), "{}", stderr(&output));
}

#[test]
fn test_help_exits_zero_without_loudgain() {
    let empty_path = TempDir::new().unwrap();

    let output = run_scanner(empty_path.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}
