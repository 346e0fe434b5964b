//! # faqbot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `faqbot` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! The dialogue engine itself lives in the `faqbot` library crate; this
//! binary only wires it to a terminal.
//!
//! ## Examples
//!
//! ```bash
//! # Chat on the contact page (quick-reply chatbot, opens by itself)
//! faqbot chat
//!
//! # One question against the keyword chatbot, with debug logs
//! faqbot -vv ask --page index "who are you?"
//!
//! # Lint a custom catalog
//! faqbot catalog check --catalog ./catalog.toml
//! ```
//!
//! Logs go to stderr, so the transcript on stdout stays clean. `RUST_LOG`
//! overrides the `-v` level.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "faqbot",
    about = "💬 faqbot: Scripted FAQ chatbot for the terminal",
    long_about = "Runs the website FAQ chatbot in a terminal.\n\
                  Quick-reply pages answer from a question catalog with follow-up buttons;\n\
                  other pages answer from keyword rules.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    Catalog(commands::catalog::CatalogArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
        Commands::Catalog(args) => commands::catalog::handle_catalog(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
