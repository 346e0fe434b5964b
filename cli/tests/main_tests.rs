//! # faqbot CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `faqbot` binary: `--help`, `--version`, the
//! `help` subcommand and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    faqbot_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chat")
                .and(predicate::str::contains("ask"))
                .and(predicate::str::contains("catalog")),
        );
}

#[test]
fn test_version_flag() {
    faqbot_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_subcommand_for_ask() {
    faqbot_cmd()
        .args(["help", "ask"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"));
}

#[test]
fn test_unknown_subcommand_fails() {
    faqbot_cmd()
        .arg("dance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
