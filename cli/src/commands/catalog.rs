//! # faqbot Catalog Command Group
//!
//! File: cli/src/commands/catalog.rs
//!
//! ## Overview
//!
//! Inspection of the dialogue data, without starting a session:
//! - `faqbot catalog list` prints the quick-reply questions as a table
//! - `faqbot catalog check` loads the catalog and the keyword rules and
//!   reports follow-up ids that point nowhere
//!
//! Both honor `--catalog` / `--rules` and the config files, so a custom
//! data file can be linted before it is deployed.
//!
//! ## Examples
//!
//! ```bash
//! faqbot catalog list
//! faqbot catalog check --catalog ./my-catalog.toml
//! ```
//!
//! Example output of `list`:
//!
//! ```text
//! Quick-reply catalog (built-in):
//!
//! Id              | Question                               | Follow-ups
//! ----------------+----------------------------------------+----------------
//! services        | What services do you provide?          | industries, custom-ai
//! urban-ai        | What is Urban AI?                      | demo
//! ...
//!
//! 6 primary and 4 follow-up question(s).
//! ```
//!
use super::DataArgs;
use clap::{Parser, Subcommand};
use faqbot::core::config;
use faqbot::core::error::{FaqbotError, Result};
use faqbot::dialogue::catalog::Catalog;
use faqbot::dialogue::keyword::KeywordRules;
use std::path::Path;
use tracing::{debug, info};

/// # Catalog Command Group Arguments (`CatalogArgs`)
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List the quick-reply questions and what each offers next.
    #[command(alias = "ls")]
    List(DataArgs),
    /// Validate the catalog and keyword rules.
    Check(DataArgs),
}

/// # Handle Catalog Command Group (`handle_catalog`)
///
/// Dispatches to `list` or `check`.
///
/// ## Arguments
///
/// * `args`: The parsed subcommand and its data-file overrides.
///
/// ## Returns
///
/// * `Result<()>`: An error if a data file cannot be loaded, or if `check`
///   finds follow-up ids that point nowhere.
pub async fn handle_catalog(args: CatalogArgs) -> Result<()> {
    match args.command {
        CatalogCommand::List(data) => handle_list(data),
        CatalogCommand::Check(data) => handle_check(data),
    }
}

fn handle_list(data: DataArgs) -> Result<()> {
    info!("Handling catalog list command...");
    let cfg = config::load_config()?;
    let path = data.catalog_path(&cfg);
    let catalog = load_catalog(path.as_deref())?;

    println!("Quick-reply catalog ({}):\n", describe_source(path.as_deref()));
    print!("{}", format_table(&catalog));
    println!(
        "\n{} primary and {} follow-up question(s).",
        catalog.primary().len(),
        catalog.follow_up_questions().len()
    );
    Ok(())
}

fn handle_check(data: DataArgs) -> Result<()> {
    info!("Handling catalog check command...");
    let cfg = config::load_config()?;
    let catalog_path = data.catalog_path(&cfg);
    let rules_path = data.rules_path(&cfg);

    let catalog = load_catalog(catalog_path.as_deref())?;
    let rules = match rules_path.as_deref() {
        Some(path) => KeywordRules::load(path)?,
        None => KeywordRules::builtin()?,
    };
    debug!("Keyword rules loaded: {} rule(s)", rules.rules.len());

    let dangling = catalog.dangling_references();
    if !dangling.is_empty() {
        for reference in &dangling {
            eprintln!(
                "'{}' offers follow-up '{}', which is not in the catalog",
                reference.owner, reference.missing
            );
        }
        return Err(FaqbotError::DanglingReferences {
            count: dangling.len(),
        }
        .into());
    }

    println!(
        "Catalog OK ({}): {} question(s), {} closing prompt(s).",
        describe_source(catalog_path.as_deref()),
        catalog.nodes().count(),
        catalog.closing_prompts().len()
    );
    println!(
        "Keyword rules OK ({}): {} rule(s), {} suggestion(s).",
        describe_source(rules_path.as_deref()),
        rules.rules.len(),
        rules.suggestions.len()
    );
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    };
    Ok(catalog.map_err(FaqbotError::from)?)
}

fn describe_source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string())
}

/// Formats every node (primary first) as an aligned table.
fn format_table(catalog: &Catalog) -> String {
    let rows: Vec<(&str, &str, String)> = catalog
        .nodes()
        .map(|node| {
            (
                node.id.as_str(),
                node.question.as_str(),
                node.follow_ups.join(", "),
            )
        })
        .collect();

    let id_width = rows
        .iter()
        .map(|row| row.0.chars().count())
        .max()
        .unwrap_or(0)
        .max("Id".len());
    let question_width = rows
        .iter()
        .map(|row| row.1.chars().count())
        .max()
        .unwrap_or(0)
        .max("Question".len());

    let mut out = format!(
        "{:<iw$} | {:<qw$} | Follow-ups\n",
        "Id",
        "Question",
        iw = id_width,
        qw = question_width
    );
    out.push_str(&format!(
        "{}-+-{}-+-{}\n",
        "-".repeat(id_width),
        "-".repeat(question_width),
        "-".repeat(16)
    ));
    for (id, question, follow_ups) in rows {
        let follow_ups = if follow_ups.is_empty() {
            "-".to_string()
        } else {
            follow_ups
        };
        out.push_str(&format!(
            "{:<iw$} | {:<qw$} | {}\n",
            id,
            question,
            follow_ups,
            iw = id_width,
            qw = question_width
        ));
    }
    out
}
