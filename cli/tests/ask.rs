//! # faqbot CLI Ask Integration Tests
//!
//! File: cli/tests/ask.rs
//!
//! ## Overview
//!
//! `faqbot ask` end to end: page selection, data files from flags and from
//! a project `.faqbot.toml`, and the error for a blank question.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_ask_answers_from_builtin_catalog_with_follow_ups() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ask", "What", "is", "Urban", "AI?"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You: What is Urban AI?")
                .and(predicate::str::contains("traffic cameras"))
                .and(predicate::str::contains("[1] Can I request a demo?"))
                // The opening is not replayed.
                .and(predicate::str::contains("How can I assist you today?").not()),
        );
}

#[test]
fn test_ask_unmatched_question_gets_fallback_and_partner_button() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ask", "banana"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("contact@scientisttechnologies.uk")
                .and(predicate::str::contains("Services (services.html)"))
                .and(predicate::str::contains("[1] How can we partner with you?")),
        );
}

#[test]
fn test_ask_on_other_page_uses_keyword_rules() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ask", "--page", "index", "banana"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("That's an interesting question!")
                .and(predicate::str::contains("[1]").not()),
        );
}

#[test]
fn test_ask_page_from_environment() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("FAQBOT_PAGE", "services")
        .args(["ask", "what does it cost?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bot: ...").not())
        .stdout(predicate::str::contains("Scientist AI: ..."));
}

#[test]
fn test_ask_with_custom_catalog_flag() {
    let sandbox = Sandbox::new();
    let catalog = sandbox.write("catalog.toml", &tiny_catalog("weekend"));
    sandbox
        .cmd()
        .arg("ask")
        .arg("--catalog")
        .arg(&catalog)
        .arg("open?")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Nine to five.")
                .and(predicate::str::contains("[1] And on weekends?")),
        );
}

#[test]
fn test_project_config_selects_page_variant_and_catalog() {
    let sandbox = Sandbox::new();
    let catalog = sandbox.write("catalog.toml", &tiny_catalog("weekend"));
    sandbox.write(
        ".faqbot.toml",
        &format!(
            "[catalog]\npath = {:?}\n\n[pages.help]\nvariant = \"quick-reply\"\n",
            catalog.display().to_string()
        ),
    );
    sandbox
        .cmd()
        .args(["ask", "--page", "help", "weekend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed."));
}

#[test]
fn test_ask_rejects_blank_question() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ask", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The question is empty."));
}

#[test]
fn test_ask_reports_unreadable_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ask", "--catalog", "missing.toml", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog: missing.toml"));
}
