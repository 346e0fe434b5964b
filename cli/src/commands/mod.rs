//! # faqbot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the `faqbot` CLI and the argument groups they
//! share.
//!
//! ## Commands
//!
//! - `chat`: interactive conversation in the terminal
//! - `ask`: one free-text turn, printed without waiting for the delays
//! - `catalog`: list or lint the dialogue data
//!
//! Each command defines its own arguments structure and an async handler.
//! `SourceArgs` (which page, which data files) is flattened into the
//! commands that start a session; `prepare` turns it into a ready-to-use
//! script plus pacing by merging flags over the configuration files.
//!
use clap::Args;
use faqbot::core::config::{self, Config, PageConfig, CONTACT_PAGE};
use faqbot::core::error::Result;
use faqbot::dialogue::{self, script::Script, session::Pacing};
use std::path::PathBuf;
use tracing::debug;

/// One-shot question (`faqbot ask`).
pub mod ask;
/// Dialogue data inspection (`faqbot catalog list|check`).
pub mod catalog;
/// Interactive terminal chat (`faqbot chat`).
pub mod chat;

/// Where the dialogue data comes from. Flags beat config files.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Quick-reply catalog TOML file (default: built-in catalog).
    #[arg(long, env = "FAQBOT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Keyword rules TOML file (default: built-in rules).
    #[arg(long, env = "FAQBOT_RULES")]
    pub rules: Option<PathBuf>,
}

impl DataArgs {
    pub fn catalog_path(&self, config: &Config) -> Option<PathBuf> {
        self.catalog.clone().or_else(|| config.catalog_path())
    }

    pub fn rules_path(&self, config: &Config) -> Option<PathBuf> {
        self.rules.clone().or_else(|| config.rules_path())
    }
}

/// Page selection plus data sources, for commands that run a session.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Page the chatbot runs on; decides the chatbot variant.
    #[arg(long, env = "FAQBOT_PAGE", default_value = CONTACT_PAGE)]
    pub page: String,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Everything needed to construct a session for one page.
pub struct Prepared {
    pub page: PageConfig,
    pub script: Script,
    pub pacing: Pacing,
}

impl SourceArgs {
    pub fn prepare(&self) -> Result<Prepared> {
        let config = config::load_config()?;
        let page = config.page(&self.page);
        debug!("Page '{}' uses the {} chatbot", self.page, page.variant);
        let script = dialogue::load_script(
            page.variant,
            self.data.catalog_path(&config).as_deref(),
            self.data.rules_path(&config).as_deref(),
        )?;
        Ok(Prepared {
            page,
            script,
            pacing: config.pacing(),
        })
    }
}
