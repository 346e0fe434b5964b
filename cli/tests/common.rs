//! # faqbot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Every
//! command built here runs in its own scratch directory with the user config
//! location redirected into it and the `FAQBOT_*` variables cleared, so the
//! developer's own configuration never leaks into a test.
//!

// Each test crate uses a different subset of these helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get faqbot Command (`faqbot_cmd`)
///
/// An `assert_cmd::Command` for the compiled `faqbot` binary, with no
/// isolation applied.
///
/// ## Panics
/// Panics if the `faqbot` binary cannot be found via `Command::cargo_bin`.
pub fn faqbot_cmd() -> Command {
    Command::cargo_bin("faqbot").expect("Failed to find faqbot binary for testing")
}

/// A scratch directory acting as both the working directory and the home
/// directory of the command under test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create sandbox dir");
        // Stops the project config search at the sandbox.
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the sandbox and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write sandbox file");
        path
    }

    /// `faqbot` running inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = faqbot_cmd();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("FAQBOT_PAGE")
            .env_remove("FAQBOT_CATALOG")
            .env_remove("FAQBOT_RULES")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A small catalog in the built-in file format. `follow_up` is offered by
/// the `hours` question, so a missing id makes the catalog dangle.
pub fn tiny_catalog(follow_up: &str) -> String {
    format!(
        r#"
welcome = "Hi there."
closing_prompts = ["Anything else?"]

[fallback]
answer = "No idea, sorry."
follow_ups = []

[[questions]]
id = "hours"
question = "When are you open?"
answer = "Nine to five."
follow_ups = ["{follow_up}"]

[[follow_up_questions]]
id = "weekend"
question = "And on weekends?"
answer = "Closed."
"#
    )
}
