//! # faqbot Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! `faqbot ask` plays exactly one typed turn against a page's chatbot and
//! prints what the bot says back: the user line, the answer and any
//! follow-up buttons. The configured delays are simulated, not waited for.
//!
//! The opening (welcome and root buttons) is not printed; only what the
//! question produced is.
//!
//! ## Examples
//!
//! ```bash
//! faqbot ask What is Urban AI?
//! faqbot ask --page index "how much does it cost?"
//! ```
//!
use super::SourceArgs;
use clap::Parser;
use faqbot::common::ui::TerminalSink;
use faqbot::core::error::Result;
use faqbot::dialogue::random::{PromptPicker, RngPicker};
use faqbot::dialogue::render::{RecordingSink, RenderEvent};
use faqbot::dialogue::session::{Rejection, Session, Submission};
use tracing::{debug, info};

/// # Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// The question. Several words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// # Handle Ask Command (`handle_ask`)
///
/// Answers one question and exits. The session's timeline is run until
/// idle, so the answer and its follow-up buttons print without waiting.
///
/// ## Arguments
///
/// * `args`: The question words and the page/data-file selection.
///
/// ## Returns
///
/// * `Result<()>`: An error if the script cannot be loaded or the question
///   is blank.
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    info!("Handling ask command with args: {:?}", args);
    let prepared = args.source.prepare()?;
    let question = args.text.join(" ");

    let events = play_turn(
        Session::new(
            prepared.script,
            prepared.pacing,
            RecordingSink::new(),
            RngPicker::from_entropy(),
        ),
        &question,
    )?;

    let mut terminal = TerminalSink::stdout();
    for event in &events {
        terminal.replay(event);
    }
    Ok(())
}

/// Opens `session`, submits `question` and runs it to completion. Returns the
/// render events the question produced.
fn play_turn<P: PromptPicker>(
    mut session: Session<RecordingSink, P>,
    question: &str,
) -> Result<Vec<RenderEvent>> {
    session.open();
    let mark = session.sink().events().len();

    if let Submission::Rejected(reason) = session.submit_text(question) {
        match reason {
            Rejection::Empty => anyhow::bail!("The question is empty."),
            other => anyhow::bail!("The question was not accepted: {:?}", other),
        }
    }
    let fired = session.run_until_idle();
    debug!("Turn finished after {} deferred event(s)", fired);

    Ok(session.into_sink().events()[mark..].to_vec())
}
