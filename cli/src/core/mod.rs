//! # faqbot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the commands and the
//! dialogue engine:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust,ignore
//! use faqbot::core::config; // For loading configuration
//! use faqbot::core::error::{FaqbotError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
