//! Binary-level tests for the cat Pomodoro CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("cat-pomodoro").unwrap()
}

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--work"))
        .stdout(predicate::str::contains("--break"));
}

#[test]
fn test_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cat-pomodoro"));
}

#[test]
fn test_rejects_zero_minutes() {
    cmd().args(["--work", "0"]).assert().failure();
}

#[test]
fn test_completions_bash() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cat-pomodoro"));
}

#[test]
fn test_quit_from_stdin_logs_nothing() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .write_stdin("fields\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("準備はいいニャ？"))
        .stdout(predicate::str::contains("作業(分): 25  休憩(分): 5"));

    assert!(!dir.path().join("tasks.txt").exists());
}

#[test]
fn test_invalid_field_reports_error() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .write_stdin("work abc\nstart\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("数字を入力してニャ！"));
}
