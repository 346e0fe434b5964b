//! # faqbot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used at the edges of the application:
//! loading configuration, catalogs and keyword rules, and resolving CLI input.
//! The dialogue engine itself has no fatal states; every conversational path
//! ends in a rendered bot message.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `FaqbotError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Catalog validation has its own enum (`dialogue::catalog::CatalogError`),
//! which converts into `FaqbotError::Catalog` via `#[from]`.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if catalog_path.as_os_str().is_empty() {
//!     return Err(FaqbotError::Config("empty catalog path".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
//! ```
//!
use crate::dialogue::catalog::CatalogError;
use thiserror::Error;

/// Custom error type for the faqbot application.
#[derive(Error, Debug)]
pub enum FaqbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Keyword rules error: {0}")]
    Rules(String),

    #[error("No displayed button matches '{selector}'.")]
    UnknownButton { selector: String },

    #[error("Catalog has {count} dangling follow-up reference(s).")]
    DanglingReferences { count: usize },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = FaqbotError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let unknown = FaqbotError::UnknownButton {
            selector: "7".into(),
        };
        assert_eq!(unknown.to_string(), "No displayed button matches '7'.");

        let catalog: FaqbotError = CatalogError::NoClosingPrompts.into();
        assert_eq!(
            catalog.to_string(),
            "Catalog error: catalog defines no closing prompts"
        );
    }
}
