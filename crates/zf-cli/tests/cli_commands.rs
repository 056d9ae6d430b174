//! End-to-end tests driving the `zf` binary over scripted stdin.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn zf() -> Command {
    Command::cargo_bin("zf").unwrap()
}

// -- scenarios ---------------------------------------------------------------

#[test]
fn scenarios_lists_builtin_catalog() {
    zf().arg("scenarios")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Path of the Immortal")
                .and(predicate::str::contains("Garage to Empire"))
                .and(predicate::str::contains("3 scenarios")),
        );
}

// -- play --------------------------------------------------------------------

#[test]
fn play_runs_through_a_scenario() {
    zf().args(["play", "--seed", "7", "--scenario", "1"])
        .write_stdin("a\na\na\na\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Playing")
                .and(predicate::str::contains("Seed: 7"))
                .and(predicate::str::contains("level")),
        );
}

#[test]
fn play_rejects_invalid_option_input() {
    zf().args(["play", "--seed", "1", "--scenario", "2"])
        .write_stdin("z\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pick one of a, b or c."));
}

#[test]
fn play_fails_on_unknown_scenario_id() {
    zf().args(["play", "--scenario", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("999"));
}

#[test]
fn play_same_seed_same_transcript() {
    let run = |seed: &str| {
        let out = zf()
            .args(["play", "--seed", seed, "--scenario", "1"])
            .write_stdin("a\nb\na\nc\n")
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    assert_eq!(run("42"), run("42"));
}

// -- transcript --------------------------------------------------------------

#[test]
fn transcript_count_empty_conversation() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db");
    zf().args(["transcript", "count", "--story", "s1", "--chapter", "c1"])
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 messages"));
}

#[test]
fn transcript_show_empty_conversation() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db");
    zf().args(["transcript", "show", "--story", "s1", "--chapter", "c1"])
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages"));
}

#[test]
fn transcript_clear_empty_conversation() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db");
    zf().args(["transcript", "clear", "--story", "s1", "--chapter", "c1"])
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 messages"));
}

// -- chat --------------------------------------------------------------------

#[test]
fn chat_requires_api_key() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db");
    zf().args(["chat", "--story", "s1", "--chapter", "c1"])
        .arg("--db")
        .arg(&db)
        .env_remove("ZF_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZF_API_KEY"));
}
