//! # Keyword Rules
//!
//! File: cli/src/dialogue/keyword.rs
//!
//! The flat rule list used by the chatbot on the marketing pages. Each rule
//! is a set of keywords plus one response. Rules are evaluated top to bottom
//! against the lower-cased input. A rule fires when the input contains any of
//! its keywords as a plain substring, and the first rule that fires answers.
//! If none fires, the generic fallback sentence is used.
//!
//! Substring matching means short keywords fire inside longer words ("hi" is
//! found in "which"), so rule order matters.
//!
use crate::core::error::FaqbotError;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, info};

const BUILTIN_RULES: &str = include_str!("../../assets/keywords.toml");

/// One `(keywords, response)` pair.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub response: String,
}

impl KeywordRule {
    fn fires_on(&self, lowered_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_input.contains(&keyword.to_lowercase()))
    }
}

/// Ordered keyword rules with their fallback and suggestion chips.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeywordRules {
    pub fallback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
}

impl KeywordRules {
    /// Parses the rules compiled into the binary.
    pub fn builtin() -> Result<Self, FaqbotError> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    pub fn load(path: &Path) -> Result<Self, FaqbotError> {
        info!("Loading keyword rules from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            FaqbotError::Rules(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FaqbotError> {
        let rules: KeywordRules =
            toml::from_str(content).map_err(|e| FaqbotError::Rules(e.to_string()))?;
        let unusable = |rule: &&KeywordRule| {
            rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty())
        };
        if let Some(rule) = rules.rules.iter().find(unusable) {
            return Err(FaqbotError::Rules(format!(
                "rule with response '{}' has a missing or empty keyword",
                rule.response
            )));
        }
        Ok(rules)
    }

    /// Response for `input`: the first firing rule, else the fallback.
    pub fn respond(&self, input: &str) -> &str {
        let lowered = input.to_lowercase();
        match self.rules.iter().position(|rule| rule.fires_on(&lowered)) {
            Some(index) => {
                debug!("Keyword rule #{} fired for '{}'", index, lowered);
                &self.rules[index].response
            }
            None => {
                debug!("No keyword rule fired for '{}'", lowered);
                &self.fallback
            }
        }
    }
}
