//! # Dialogue Catalog
//!
//! File: cli/src/dialogue/catalog.rs
//!
//! ## Overview
//!
//! The static table of question nodes behind the quick-reply chatbot. A
//! catalog has two ordered tables:
//! - the **primary** questions, whose order is the root menu shown when the
//!   chat opens;
//! - the **follow-up** questions, only offered after another answer (or
//!   reached through free text).
//!
//! It also carries the welcome line, the closing prompts and the fallback
//! node used when nothing matches. A catalog is immutable once loaded.
//!
//! ## Loading
//!
//! The built-in catalog (`assets/catalog.toml`) is compiled into the binary.
//! Any other TOML file with the same shape can replace it:
//!
//! ```toml
//! welcome = "Hello!"
//! closing_prompts = ["Would you like to speak to our team?"]
//!
//! [fallback]
//! answer = "Please contact us."
//! follow_ups = ["partner"]
//!
//! [[questions]]
//! id = "partner"
//! question = "How can we partner with you?"
//! answer = "Write to us."
//! follow_ups = []
//! ```
//!
//! Follow-up ids that do not resolve are tolerated: lookups simply return
//! `None` and [`Catalog::dangling_references`] lists them for linting.
//!
use serde::Deserialize;
use std::collections::HashSet;
use std::{fs, path::Path};
use thiserror::Error;
use tracing::{debug, info};

/// TOML source of the built-in catalog.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Id given to the fallback node. It is never part of the lookup tables.
pub const FALLBACK_ID: &str = "fallback";

/// Errors raised while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog defines no primary questions")]
    NoQuestions,

    #[error("catalog defines no closing prompts")]
    NoClosingPrompts,

    #[error("question id '{0}' is defined more than once")]
    DuplicateId(String),

    #[error("a question has an empty id (question text: '{0}')")]
    EmptyId(String),
}

/// One canned question, its answer and the ids offered next.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QuestionNode {
    pub id: String,
    pub question: String,
    /// May embed inline markup such as a hyperlink.
    pub answer: String,
    #[serde(default)]
    pub follow_ups: Vec<String>,
}

impl QuestionNode {
    /// The id as it would appear in prose: hyphens become spaces.
    pub fn spoken_id(&self) -> String {
        self.id.replace('-', " ")
    }
}

/// The fallback entry as written in TOML; it has no id or question.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FallbackSpec {
    answer: String,
    #[serde(default)]
    follow_ups: Vec<String>,
}

/// Raw shape of a catalog file before validation.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    welcome: String,
    closing_prompts: Vec<String>,
    fallback: FallbackSpec,
    #[serde(default)]
    questions: Vec<QuestionNode>,
    #[serde(default)]
    follow_up_questions: Vec<QuestionNode>,
}

/// A follow-up id that does not resolve, with the node that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub owner: String,
    pub missing: String,
}

/// Read-only question table for the quick-reply chatbot.
#[derive(Debug, Clone)]
pub struct Catalog {
    welcome: String,
    primary: Vec<QuestionNode>,
    follow_up: Vec<QuestionNode>,
    closing_prompts: Vec<String>,
    fallback: QuestionNode,
}

impl Catalog {
    /// Parses the catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// # Load Catalog File (`load`)
    ///
    /// ## Arguments
    ///
    /// * `path`: A TOML catalog in the layout of `assets/catalog.toml`.
    ///
    /// ## Returns
    ///
    /// * `Result<Catalog, CatalogError>`: The validated catalog, or the read,
    ///   parse or validation failure. Dangling follow-up ids are not an
    ///   error here; see `dangling_references`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading catalog from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates catalog TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        if file.questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }
        if file.closing_prompts.is_empty() {
            return Err(CatalogError::NoClosingPrompts);
        }

        let mut seen = HashSet::new();
        for node in file.questions.iter().chain(&file.follow_up_questions) {
            if node.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(node.question.clone()));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(CatalogError::DuplicateId(node.id.clone()));
            }
        }

        let catalog = Self {
            welcome: file.welcome,
            primary: file.questions,
            follow_up: file.follow_up_questions,
            closing_prompts: file.closing_prompts,
            fallback: QuestionNode {
                id: FALLBACK_ID.to_string(),
                question: String::new(),
                answer: file.fallback.answer,
                follow_ups: file.fallback.follow_ups,
            },
        };
        debug!(
            "Catalog ready: {} primary, {} follow-up, {} closing prompts",
            catalog.primary.len(),
            catalog.follow_up.len(),
            catalog.closing_prompts.len()
        );
        Ok(catalog)
    }

    /// Finds a node by id, primary table first.
    pub fn lookup(&self, id: &str) -> Option<&QuestionNode> {
        self.nodes().find(|node| node.id == id)
    }

    /// Ids of the top-level menu, in display order.
    pub fn root_ids(&self) -> Vec<&str> {
        self.primary.iter().map(|node| node.id.as_str()).collect()
    }

    /// All nodes in scan order: primary table, then follow-up table.
    pub fn nodes(&self) -> impl Iterator<Item = &QuestionNode> {
        self.primary.iter().chain(self.follow_up.iter())
    }

    pub fn primary(&self) -> &[QuestionNode] {
        &self.primary
    }

    pub fn follow_up_questions(&self) -> &[QuestionNode] {
        &self.follow_up
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn closing_prompts(&self) -> &[String] {
        &self.closing_prompts
    }

    pub fn fallback(&self) -> &QuestionNode {
        &self.fallback
    }

    /// Every follow-up id (including the fallback's) that has no node.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.nodes()
            .chain(std::iter::once(&self.fallback))
            .flat_map(|node| {
                node.follow_ups
                    .iter()
                    .filter(move |id| self.lookup(id).is_none())
                    .map(move |id| DanglingReference {
                        owner: node.id.clone(),
                        missing: id.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
        welcome = "Hi"
        closing_prompts = ["Bye?"]

        [fallback]
        answer = "Ask a human."
        follow_ups = ["b"]

        [[questions]]
        id = "a"
        question = "Question A?"
        answer = "Answer A."
        follow_ups = ["b", "ghost"]

        [[follow_up_questions]]
        id = "b"
        question = "Question B?"
        answer = "Answer B."
    "#;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("built-in catalog must be valid");
        assert_eq!(
            catalog.root_ids(),
            vec![
                "services",
                "urban-ai",
                "ai-developers",
                "custom-ai",
                "data-security",
                "partner"
            ]
        );
        assert_eq!(catalog.follow_up_questions().len(), 4);
        assert_eq!(catalog.closing_prompts().len(), 3);
        assert_eq!(catalog.fallback().follow_ups, vec!["partner"]);
    }

    #[test]
    fn test_builtin_catalog_has_no_dangling_references() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.dangling_references().is_empty());
    }

    #[test]
    fn test_lookup_searches_both_tables() {
        let catalog = Catalog::from_toml_str(SMALL).unwrap();
        assert_eq!(catalog.lookup("a").unwrap().answer, "Answer A.");
        assert_eq!(catalog.lookup("b").unwrap().answer, "Answer B.");
        assert!(catalog.lookup("ghost").is_none());
        assert!(catalog.lookup(FALLBACK_ID).is_none());
    }

    #[test]
    fn test_dangling_references_are_reported() {
        let catalog = Catalog::from_toml_str(SMALL).unwrap();
        assert_eq!(
            catalog.dangling_references(),
            vec![DanglingReference {
                owner: "a".into(),
                missing: "ghost".into()
            }]
        );
    }

    #[test]
    fn test_rejects_duplicate_ids_across_tables() {
        let toml = r#"
            welcome = "Hi"
            closing_prompts = ["Bye?"]
            [fallback]
            answer = "x"
            [[questions]]
            id = "a"
            question = "A?"
            answer = "A."
            [[follow_up_questions]]
            id = "a"
            question = "Again?"
            answer = "Again."
        "#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_rejects_empty_closing_prompts() {
        let toml = r#"
            welcome = "Hi"
            closing_prompts = []
            [fallback]
            answer = "x"
            [[questions]]
            id = "a"
            question = "A?"
            answer = "A."
        "#;
        assert!(matches!(
            Catalog::from_toml_str(toml),
            Err(CatalogError::NoClosingPrompts)
        ));
    }

    #[test]
    fn test_rejects_catalog_without_questions() {
        let toml = r#"
            welcome = "Hi"
            closing_prompts = ["Bye?"]
            [fallback]
            answer = "x"
        "#;
        assert!(matches!(
            Catalog::from_toml_str(toml),
            Err(CatalogError::NoQuestions)
        ));
    }

    #[test]
    fn test_spoken_id_replaces_every_hyphen() {
        let node = QuestionNode {
            id: "a-b-c".into(),
            question: String::new(),
            answer: String::new(),
            follow_ups: vec![],
        };
        assert_eq!(node.spoken_id(), "a b c");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = Catalog::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
