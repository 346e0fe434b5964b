//! # Free-Text Matcher
//!
//! File: cli/src/dialogue/matcher.rs
//!
//! Maps a free-text question onto exactly one catalog node. The heuristic is
//! deliberately loose (substring checks, no tokenizing):
//!
//! 1. **Id mention**: the lower-cased input contains the node id with its
//!    hyphens turned into spaces (`urban-ai` -> `urban ai`).
//! 2. **Question contains input**: the node's lower-cased question contains
//!    the whole input.
//! 3. **Leading word**: the input contains the first word of the node's
//!    lower-cased question.
//!
//! Rules are tried in that order across the whole catalog (primary table,
//! then follow-up table); within a rule the first node in scan order wins.
//! When nothing matches the catalog's fallback node is returned, so a match
//! always exists.
//!
//! Rule 3 is very permissive: the leading word "do" is found inside
//! "random", for example. That is the expected behaviour.
//!
use crate::dialogue::catalog::{Catalog, QuestionNode};
use tracing::debug;

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    IdMention,
    QuestionContainsInput,
    LeadingWord,
    Fallback,
}

/// Result of matching: the chosen node and the rule that chose it.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub node: &'a QuestionNode,
    pub rule: MatchRule,
}

impl Match<'_> {
    pub fn is_fallback(&self) -> bool {
        self.rule == MatchRule::Fallback
    }
}

/// # Match a Typed Question (`match_question`)
///
/// Applies the rules in order and stops at the first hit.
///
/// ## Arguments
///
/// * `catalog`: The nodes to search, primary before follow-up.
/// * `input`: The typed line. It is trimmed and lowercased first.
///
/// ## Returns
///
/// * `Match`: The chosen node and the rule that chose it. Blank input and
///   input no rule accepts resolve to the fallback node.
pub fn match_question<'a>(catalog: &'a Catalog, input: &str) -> Match<'a> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return fallback(catalog);
    }

    let rules: [(MatchRule, fn(&str, &QuestionNode) -> bool); 3] = [
        (MatchRule::IdMention, mentions_id),
        (MatchRule::QuestionContainsInput, question_contains_input),
        (MatchRule::LeadingWord, contains_leading_word),
    ];

    for (rule, test) in rules {
        if let Some(node) = catalog.nodes().find(|node| test(&input, node)) {
            debug!("Matched '{}' to node '{}' via {:?}", input, node.id, rule);
            return Match { node, rule };
        }
    }

    debug!("No node matched '{}'; using fallback", input);
    fallback(catalog)
}

fn fallback(catalog: &Catalog) -> Match<'_> {
    Match {
        node: catalog.fallback(),
        rule: MatchRule::Fallback,
    }
}

fn mentions_id(input: &str, node: &QuestionNode) -> bool {
    input.contains(&node.spoken_id().to_lowercase())
}

fn question_contains_input(input: &str, node: &QuestionNode) -> bool {
    node.question.to_lowercase().contains(input)
}

fn contains_leading_word(input: &str, node: &QuestionNode) -> bool {
    let question = node.question.to_lowercase();
    match question.split(' ').next() {
        // An empty leading word would match every input.
        Some(word) if !word.is_empty() => input.contains(word),
        _ => false,
    }
}
