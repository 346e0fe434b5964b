//! # faqbot
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Scripted FAQ chatbots for a marketing site: a quick-reply question tree
//! for the contact page and a keyword responder for every other page. The
//! library holds the dialogue engine (`dialogue`), configuration and errors
//! (`core`) and terminal rendering (`common`). The `faqbot` binary in
//! `main.rs` wires them to a command line.
//!
pub mod common;
pub mod core;
pub mod dialogue;
