//! # faqbot Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! `faqbot chat` runs one conversation in the terminal. The transcript goes
//! to stdout; hints and rejections go to stderr.
//!
//! Input lines are interpreted as:
//! - `:open`, `:min`, `:toggle`: open, minimize or toggle the chat surface
//! - `:help`, `:quit`
//! - `/N` presses the N-th displayed button, `/ID` presses a button by id
//! - anything else is a typed question
//!
//! ## Architecture
//!
//! The session keeps virtual time; this loop maps it onto the wall clock.
//! Each iteration races the next stdin line against `sleep_until` for the
//! session's next due event, then advances the session to the elapsed time.
//! At end of input the pending events are allowed to finish before exiting.
//!
//! ## Examples
//!
//! ```bash
//! # The contact page opens by itself after a short delay
//! faqbot chat --page contact
//!
//! # Keyword chatbot, no artificial delays
//! faqbot chat --page index --instant
//! ```
//!
use super::SourceArgs;
use anyhow::Context;
use clap::Parser;
use faqbot::common::ui::TerminalSink;
use faqbot::core::error::{FaqbotError, Result};
use faqbot::dialogue::random::{PromptPicker, RngPicker};
use faqbot::dialogue::render::{Button, RenderSink};
use faqbot::dialogue::script::Variant;
use faqbot::dialogue::session::{Pacing, Rejection, Session, Submission};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

const HELP: &str = "Commands: :open  :min  :toggle  :help  :quit\n\
                    Press a button with /N (its number) or /ID. Anything else is a question.";

/// # Chat Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Skip all artificial delays (answers appear immediately).
    #[arg(long)]
    pub instant: bool,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Builds a session for the selected page and drives it from stdin until
/// `:quit` or end of input.
///
/// ## Arguments
///
/// * `args`: Page, data-file overrides and the `--instant` switch.
///
/// ## Returns
///
/// * `Result<()>`: An error if the configuration or a data file cannot be
///   loaded, or if stdin fails.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let prepared = args.source.prepare()?;
    let pacing = if args.instant {
        Pacing::instant()
    } else {
        prepared.pacing
    };

    let sink = TerminalSink::stdout().with_timestamps(prepared.page.variant == Variant::Keyword);
    let mut session = Session::new(prepared.script, pacing, sink, RngPicker::from_entropy());

    if prepared.page.auto_open {
        session.schedule_auto_open();
    } else {
        eprintln!("Type :open to start chatting, :help for commands.");
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_chat(&mut session, stdin).await
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Quit,
}

/// Drives `session` from `input` in real time.
pub async fn run_chat<S, P, R>(session: &mut Session<S, P>, input: R) -> Result<()>
where
    S: RenderSink,
    P: PromptPicker,
    R: AsyncBufRead + Unpin,
{
    let start = Instant::now();
    let mut lines = input.lines();

    loop {
        let wake = session.next_due().map(|due| start + due);
        tokio::select! {
            biased;
            _ = wait_until(wake) => {
                session.advance_to(start.elapsed());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("End of input");
                    break;
                };
                session.advance_to(start.elapsed());
                if handle_line(session, &line) == LineOutcome::Quit {
                    return Ok(());
                }
                // Zero-delay events (instant pacing) fire before the next read.
                session.advance_to(start.elapsed());
            }
        }
    }

    while let Some(due) = session.next_due() {
        sleep_until(start + due).await;
        session.advance_to(start.elapsed());
    }
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn handle_line<S: RenderSink, P: PromptPicker>(
    session: &mut Session<S, P>,
    line: &str,
) -> LineOutcome {
    let line = line.trim();
    match line {
        ":quit" | ":q" | ":exit" => return LineOutcome::Quit,
        ":open" => {
            session.open();
        }
        ":min" | ":minimize" => {
            session.minimize();
        }
        ":toggle" => session.toggle(),
        ":help" => eprintln!("{}", HELP),
        _ => {
            let submission = match line.strip_prefix('/') {
                Some(selector) => match resolve_button(session.displayed_buttons(), selector) {
                    Ok(id) => session.choose(&id),
                    Err(e) => {
                        eprintln!("{}", e);
                        return LineOutcome::Continue;
                    }
                },
                None => session.submit_text(line),
            };
            report(submission);
        }
    }
    LineOutcome::Continue
}

fn report(submission: Submission) {
    match submission {
        Submission::Accepted | Submission::Rejected(Rejection::Empty) => {}
        Submission::Rejected(Rejection::SurfaceHidden) => {
            eprintln!("The chat is minimized. Type :open first.")
        }
        Submission::Rejected(Rejection::UnknownChoice) => {
            eprintln!("That button is not available here.")
        }
    }
}

/// Turns `/N` or `/ID` into a button id. Numbers index the displayed
/// buttons from 1; anything else is taken as an id as-is.
fn resolve_button(
    displayed: &[Button],
    selector: &str,
) -> std::result::Result<String, FaqbotError> {
    let selector = selector.trim();
    let unknown = || FaqbotError::UnknownButton {
        selector: selector.to_string(),
    };
    if selector.is_empty() {
        return Err(unknown());
    }
    match selector.parse::<usize>() {
        Ok(number) => number
            .checked_sub(1)
            .and_then(|index| displayed.get(index))
            .map(|button| button.id.clone())
            .ok_or_else(unknown),
        Err(_) => Ok(selector.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqbot::dialogue::catalog::Catalog;
    use faqbot::dialogue::keyword::KeywordRules;
    use faqbot::dialogue::random::FixedPicker;
    use faqbot::dialogue::render::RecordingSink;
    use faqbot::dialogue::script::Script;

    fn buttons() -> Vec<Button> {
        vec![
            Button {
                id: "demo".into(),
                label: "Can I request a demo?".into(),
            },
            Button {
                id: "partner".into(),
                label: "How can we partner with you?".into(),
            },
        ]
    }

    fn session(script: Script) -> Session<RecordingSink, FixedPicker> {
        Session::new(script, Pacing::instant(), RecordingSink::new(), FixedPicker(0))
    }

    #[test]
    fn test_parses_chat_args() {
        let args = ChatArgs::try_parse_from(["chat", "--page", "index", "--instant"]).unwrap();
        assert_eq!(args.source.page, "index");
        assert!(args.instant);
    }

    #[test]
    fn test_resolve_button_by_number_and_id() {
        assert_eq!(resolve_button(&buttons(), "2").unwrap(), "partner");
        assert_eq!(resolve_button(&buttons(), "demo").unwrap(), "demo");
        assert_eq!(resolve_button(&[], "services").unwrap(), "services");
    }

    #[test]
    fn test_resolve_button_rejects_bad_numbers() {
        assert!(resolve_button(&buttons(), "0").is_err());
        assert!(resolve_button(&buttons(), "3").is_err());
        let err = resolve_button(&buttons(), " ").unwrap_err();
        assert!(matches!(err, FaqbotError::UnknownButton { .. }));
    }

    #[test]
    fn test_handle_line_commands() {
        let mut session = session(Script::QuickReply(Catalog::builtin().unwrap()));
        assert_eq!(handle_line(&mut session, ":open"), LineOutcome::Continue);
        assert!(session.state().is_open());
        handle_line(&mut session, ":toggle");
        assert!(!session.state().is_open());
        assert_eq!(handle_line(&mut session, " :quit "), LineOutcome::Quit);
    }

    #[test]
    fn test_handle_line_presses_numbered_button() {
        let mut session = session(Script::QuickReply(Catalog::builtin().unwrap()));
        handle_line(&mut session, ":open");
        handle_line(&mut session, "/2");
        assert_eq!(
            session.state().transcript().last().unwrap().text,
            "What is Urban AI?"
        );
    }

    #[tokio::test]
    async fn test_run_chat_plays_piped_input_in_order() {
        let mut session = session(Script::Keyword(KeywordRules::builtin().unwrap()));
        let input: &[u8] = b":open\nhow much?\n\nwho are you\n";
        run_chat(&mut session, input).await.unwrap();

        let texts: Vec<_> = session
            .state()
            .transcript()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0], "how much?");
        assert!(texts[1].starts_with("That's an interesting question!"));
        assert_eq!(texts[2], "who are you");
        assert!(texts[3].starts_with("We are a team"));
    }

    #[tokio::test]
    async fn test_run_chat_finishes_pending_turn_at_end_of_input() {
        let mut session = Session::new(
            Script::QuickReply(Catalog::builtin().unwrap()),
            Pacing {
                answer_delay: std::time::Duration::from_millis(20),
                follow_up_delay: std::time::Duration::from_millis(10),
                ..Pacing::instant()
            },
            RecordingSink::new(),
            FixedPicker(0),
        );
        let input: &[u8] = b":open\nWhat is Urban AI?\n";
        run_chat(&mut session, input).await.unwrap();

        assert_eq!(session.state().exchange_count(), 1);
        assert_eq!(session.sink().last_button_ids(), Some(vec!["demo"]));
        assert!(session.is_idle());
    }
}
