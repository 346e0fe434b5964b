//! # faqbot CLI Catalog Integration Tests
//!
//! File: cli/tests/catalog.rs
//!
//! ## Overview
//!
//! `faqbot catalog list` and `faqbot catalog check` against the built-in
//! data and against scratch files.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_list_builtin_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Quick-reply catalog (built-in)")
                .and(predicate::str::contains("urban-ai"))
                .and(predicate::str::contains("6 primary and 4 follow-up question(s).")),
        );
}

#[test]
fn test_check_builtin_data_passes() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["catalog", "check"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Catalog OK (built-in): 10 question(s), 3 closing prompt(s).")
                .and(predicate::str::contains("Keyword rules OK (built-in): 5 rule(s)")),
        );
}

#[test]
fn test_check_reports_dangling_follow_up() {
    let sandbox = Sandbox::new();
    let catalog = sandbox.write("catalog.toml", &tiny_catalog("holidays"));
    sandbox
        .cmd()
        .args(["catalog", "check", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("'hours' offers follow-up 'holidays'")
                .and(predicate::str::contains("1 dangling follow-up reference(s)")),
        );
}

#[test]
fn test_check_rejects_malformed_rules() {
    let sandbox = Sandbox::new();
    let rules = sandbox.write("rules.toml", "fallback = \"?\"\n[[rules]]\nkeywords = []\nresponse = \"x\"\n");
    sandbox
        .cmd()
        .args(["catalog", "check", "--rules"])
        .arg(&rules)
        .assert()
        .failure();
}

#[test]
fn test_list_with_catalog_from_environment() {
    let sandbox = Sandbox::new();
    let catalog = sandbox.write("catalog.toml", &tiny_catalog("weekend"));
    sandbox
        .cmd()
        .env("FAQBOT_CATALOG", &catalog)
        .args(["catalog", "ls"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hours")
                .and(predicate::str::contains("1 primary and 1 follow-up question(s).")),
        );
}

#[test]
fn test_check_rejects_catalog_without_closing_prompts() {
    let sandbox = Sandbox::new();
    let catalog = sandbox.write(
        "catalog.toml",
        &tiny_catalog("weekend").replace(r#"["Anything else?"]"#, "[]"),
    );
    sandbox
        .cmd()
        .args(["catalog", "check", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Catalog error: catalog defines no closing prompts",
        ));
}
