//! # Dialogue Engine
//!
//! File: cli/src/dialogue/mod.rs
//!
//! ## Overview
//!
//! The scripted FAQ chatbot. Nothing in here knows about terminals, files
//! on disk (beyond loading data) or wall-clock time.
//!
//! ## Architecture
//!
//! - `catalog`: the quick-reply question tree, closing prompts and fallback
//! - `keyword`: the flat keyword rule list used on marketing pages
//! - `matcher`: free text to catalog node
//! - `script`: one enum over both data shapes, used by the session
//! - `session`: the conversation state machine
//! - `timeline`: virtual-time queue of deferred events
//! - `render`: the `RenderSink` trait the session draws through
//! - `random`: the injectable closing-prompt picker
//!
//! ## Example
//!
//! ```rust
//! use faqbot::dialogue::{
//!     catalog::Catalog, random::FixedPicker, render::RecordingSink,
//!     script::Script, session::{Pacing, Session},
//! };
//!
//! let script = Script::QuickReply(Catalog::builtin().unwrap());
//! let mut session = Session::new(script, Pacing::default(), RecordingSink::new(), FixedPicker(0));
//! session.open();
//! session.submit_text("What is Urban AI?");
//! session.run_until_idle();
//! assert_eq!(session.sink().last_button_ids(), Some(vec!["demo"]));
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;

pub mod catalog;
pub mod keyword;
pub mod matcher;
pub mod random;
pub mod render;
pub mod script;
pub mod session;
pub mod timeline;

use catalog::Catalog;
use keyword::KeywordRules;
use script::{Script, Variant};

/// Builds the script for `variant`, from the given file or the built-in data.
pub fn load_script(
    variant: Variant,
    catalog_path: Option<&Path>,
    rules_path: Option<&Path>,
) -> Result<Script> {
    let script = match variant {
        Variant::QuickReply => {
            let catalog = match catalog_path {
                Some(path) => Catalog::load(path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
                None => Catalog::builtin().context("Built-in catalog is invalid")?,
            };
            Script::QuickReply(catalog)
        }
        Variant::Keyword => {
            let rules = match rules_path {
                Some(path) => KeywordRules::load(path)
                    .with_context(|| format!("Failed to load keyword rules: {}", path.display()))?,
                None => KeywordRules::builtin().context("Built-in keyword rules are invalid")?,
            };
            Script::Keyword(rules)
        }
    };
    Ok(script)
}
