//! # faqbot Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that sit outside the dialogue engine. Currently this is
//! the terminal user interface: the `RenderSink` that prints a conversation
//! and the helper that flattens answer markup for plain-text output.
//!
//! ```rust,ignore
//! use faqbot::common::ui::TerminalSink;
//! ```
//!

/// Terminal rendering of conversations (sink, markup flattening).
pub mod ui;
