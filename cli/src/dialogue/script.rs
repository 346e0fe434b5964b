//! # Dialogue Scripts
//!
//! File: cli/src/dialogue/script.rs
//!
//! A `Script` is what a session talks from. There are two shapes:
//! - `QuickReply`: a question tree (`Catalog`) with follow-up buttons, a
//!   free-text matcher and closing prompts;
//! - `Keyword`: a flat keyword rule list (`KeywordRules`) where every turn
//!   is independent.
//!
//! The session asks the script what to open with, how to answer a button or
//! a typed line, and which buttons a list of follow-up ids resolves to. The
//! pacing and placeholder differences between the two shapes live here too,
//! so the session itself has a single code path.
//!
use crate::dialogue::catalog::Catalog;
use crate::dialogue::keyword::KeywordRules;
use crate::dialogue::matcher;
use crate::dialogue::render::Button;
use serde::Deserialize;
use std::fmt;
use tracing::warn;

/// Which chatbot a page uses.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    QuickReply,
    Keyword,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::QuickReply => write!(f, "quick-reply"),
            Variant::Keyword => write!(f, "keyword"),
        }
    }
}

/// What follows a bot answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Offer these follow-up ids. An empty list makes the answer terminal,
    /// which is when a closing prompt may follow.
    Offer(Vec<String>),
    /// Nothing follows; the turn stands alone.
    Standalone,
}

/// A bot answer plus what comes after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub next: NextStep,
}

/// What the surface shows the first time it opens.
#[derive(Debug, Clone, Default)]
pub struct Opening {
    pub welcome: Option<String>,
    pub buttons: Vec<Button>,
}

/// How a button press is played out.
#[derive(Debug, Clone)]
pub enum Choice {
    /// Show `prompt` as the user's line, then answer with `reply`.
    Answer { prompt: String, reply: Reply },
    /// Treat `text` exactly as if it had been typed.
    Typed(String),
    /// The id names nothing this script can play.
    Unknown,
}

#[derive(Debug, Clone)]
pub enum Script {
    QuickReply(Catalog),
    Keyword(KeywordRules),
}

impl Script {
    pub fn variant(&self) -> Variant {
        match self {
            Script::QuickReply(_) => Variant::QuickReply,
            Script::Keyword(_) => Variant::Keyword,
        }
    }

    /// Keyword pages show a "thinking" bubble while the answer is pending.
    pub fn shows_thinking(&self) -> bool {
        matches!(self, Script::Keyword(_))
    }

    pub fn closing_prompts(&self) -> &[String] {
        match self {
            Script::QuickReply(catalog) => catalog.closing_prompts(),
            Script::Keyword(_) => &[],
        }
    }

    pub fn opening(&self) -> Opening {
        match self {
            Script::QuickReply(catalog) => Opening {
                welcome: Some(catalog.welcome().to_string()),
                buttons: self.buttons_for(catalog.root_ids()),
            },
            Script::Keyword(rules) => Opening {
                welcome: None,
                buttons: rules
                    .suggestions
                    .iter()
                    .enumerate()
                    .map(|(index, label)| Button {
                        id: chip_id(index),
                        label: label.clone(),
                    })
                    .collect(),
            },
        }
    }

    /// Answer to a typed line.
    pub fn reply_to_text(&self, input: &str) -> Reply {
        match self {
            Script::QuickReply(catalog) => {
                let found = matcher::match_question(catalog, input);
                Reply {
                    text: found.node.answer.clone(),
                    next: NextStep::Offer(found.node.follow_ups.clone()),
                }
            }
            Script::Keyword(rules) => Reply {
                text: rules.respond(input).to_string(),
                next: NextStep::Standalone,
            },
        }
    }

    /// How pressing the button `id` plays out. Unknown catalog ids are
    /// answered with the fallback node rather than dropped.
    pub fn reply_to_choice(&self, id: &str) -> Choice {
        match self {
            Script::QuickReply(catalog) => {
                let (prompt, node) = match catalog.lookup(id) {
                    Some(node) => (node.question.clone(), node),
                    None => {
                        warn!("Quick reply '{}' is not in the catalog; using fallback", id);
                        (id.to_string(), catalog.fallback())
                    }
                };
                Choice::Answer {
                    prompt,
                    reply: Reply {
                        text: node.answer.clone(),
                        next: NextStep::Offer(node.follow_ups.clone()),
                    },
                }
            }
            Script::Keyword(rules) => rules
                .suggestions
                .iter()
                .enumerate()
                .find(|(index, label)| chip_id(*index) == id || label.as_str() == id)
                .map(|(_, label)| Choice::Typed(label.clone()))
                .unwrap_or(Choice::Unknown),
        }
    }

    /// Buttons for the ids that resolve; dangling ids are skipped.
    pub fn buttons_for<I, S>(&self, ids: I) -> Vec<Button>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Script::QuickReply(catalog) = self else {
            return Vec::new();
        };
        ids.into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                match catalog.lookup(id) {
                    Some(node) => Some(Button {
                        id: node.id.clone(),
                        label: node.question.clone(),
                    }),
                    None => {
                        warn!("Skipping dangling follow-up id '{}'", id);
                        None
                    }
                }
            })
            .collect()
    }
}

fn chip_id(index: usize) -> String {
    format!("chip-{}", index + 1)
}
