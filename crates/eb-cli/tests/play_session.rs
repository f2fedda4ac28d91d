//! End-to-end CLI play-session tests.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small but complete content set.
fn content_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("locations.json"),
        r#"{"locations": {
            "start": {
                "description": "A mossy clearing at the edge of the woods.",
                "exits": {"north": "market"}
            },
            "market": {
                "description": "Stalls crowd a cobbled square.",
                "exits": {"south": "start"}
            }
        }}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("items.json"),
        r#"{"items": {
            "crystal": {
                "description": "A faintly glowing crystal.",
                "location": "market"
            }
        }}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("npcs.json"),
        r#"{"npcs": {
            "merchant": {
                "location": "market",
                "greetings": {"neutral": ["Welcome, stranger."]},
                "responses": {"neutral": ["Mhm."]}
            }
        }}"#,
    )
    .unwrap();
    dir
}

fn eb() -> Command {
    Command::cargo_bin("eb").unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_counts() {
    let dir = content_dir();
    eb().args(["check", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("locations"))
        .stdout(predicate::str::contains("Content OK."));
}

#[test]
fn check_rejects_broken_exits() {
    let dir = content_dir();
    fs::write(
        dir.path().join("locations.json"),
        r#"{"locations": {
            "start": {"description": "A clearing.", "exits": {"north": "nowhere"}}
        }}"#,
    )
    .unwrap();

    eb().args(["check", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_walks_the_scripted_scenario() {
    let dir = content_dir();
    eb().args(["play", "--dir"])
        .arg(dir.path())
        .write_stdin("look\ngo north\ntake crystal\ninventory\nquit\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Everbrook!"))
        .stdout(predicate::str::contains("mossy clearing"))
        .stdout(predicate::str::contains("cobbled square"))
        .stdout(predicate::str::contains("You take the crystal."))
        .stdout(predicate::str::contains("You are carrying:"))
        .stdout(predicate::str::contains("Thanks for playing"));
}

#[test]
fn play_quit_can_be_cancelled() {
    let dir = content_dir();
    eb().args(["play", "--dir"])
        .arg(dir.path())
        .write_stdin("quit\nn\nlook\nquit\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quit cancelled."))
        .stdout(predicate::str::contains("mossy clearing"));
}

#[test]
fn play_conversation_round_trip() {
    let dir = content_dir();
    eb().args(["play", "--dir"])
        .arg(dir.path())
        .write_stdin("go north\ntalk merchant\nhow is trade\nbye\nquit\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merchant: Welcome, stranger."))
        .stdout(predicate::str::contains("Merchant bids you farewell."));
}

#[test]
fn play_ends_cleanly_on_eof() {
    let dir = content_dir();
    eb().args(["play", "--dir"])
        .arg(dir.path())
        .write_stdin("look\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Farewell."));
}

#[test]
fn play_fails_without_start_location() {
    let dir = content_dir();
    eb().args(["play", "--dir"])
        .arg(dir.path())
        .args(["--start", "atlantis"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("atlantis"));
}
