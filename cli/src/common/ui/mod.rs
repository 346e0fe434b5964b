//! # faqbot UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal rendering for dialogue sessions. `TerminalSink` implements the
//! engine's `RenderSink` by writing plain lines to any `io::Write`:
//!
//! ```text
//! -- chat opened --
//! Scientist AI: Hello! 👋 I'm here to help you ...
//!   [1] What services do you provide?
//!   [2] What is Urban AI?
//! You: What is Urban AI?
//! Scientist AI: Urban AI is a smart system that uses traffic cameras ...
//! ```
//!
//! Buttons are numbered so the chat loop can accept `/2` as a press.
//! Markup in bot answers is flattened by `markup::to_plain_text`; user lines
//! are printed exactly as typed. With
//! timestamps enabled (keyword pages), every message carries a local `HH:MM`
//! stamp.
//!
//! Writes are best effort: a `RenderSink` cannot fail, so I/O errors are
//! logged and the conversation carries on.
//!
use crate::dialogue::render::{Button, Message, RenderEvent, RenderSink, Speaker};
use std::io::{self, Write};
use tracing::warn;

pub mod markup;

/// Display name used for bot lines unless configured otherwise.
pub const DEFAULT_BOT_NAME: &str = "Scientist AI";

/// `RenderSink` writing plain text lines.
pub struct TerminalSink<W: Write> {
    out: W,
    bot_name: String,
    timestamps: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bot_name: DEFAULT_BOT_NAME.to_string(),
            timestamps: false,
        }
    }

    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    /// Prefix messages with the local time (`HH:MM`).
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a recorded event exactly as a live session would have.
    pub fn replay(&mut self, event: &RenderEvent) {
        match event {
            RenderEvent::Message(message) => self.append(message),
            RenderEvent::Buttons(buttons) => self.show_buttons(buttons),
            RenderEvent::ClearButtons => self.clear_buttons(),
            RenderEvent::Thinking(ticket) => self.show_thinking(*ticket),
            RenderEvent::ThinkingDismissed(ticket) => self.dismiss_thinking(*ticket),
            RenderEvent::Visible(visible) => self.set_visible(*visible),
        }
    }

    fn speaker_name(&self, speaker: Speaker) -> String {
        match speaker {
            Speaker::User => speaker.to_string(),
            Speaker::Bot => self.bot_name.clone(),
        }
    }

    fn line(&mut self, text: &str) {
        let result = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn append(&mut self, message: &Message) {
        let stamp = if self.timestamps {
            format!("[{}] ", chrono::Local::now().format("%H:%M"))
        } else {
            String::new()
        };
        // Only answers carry markup; user lines are shown as typed.
        let text = match message.speaker {
            Speaker::Bot => markup::to_plain_text(&message.text),
            Speaker::User => message.text.clone(),
        };
        let line = format!("{}{}: {}", stamp, self.speaker_name(message.speaker), text);
        self.line(&line);
    }

    fn show_buttons(&mut self, buttons: &[Button]) {
        for (index, button) in buttons.iter().enumerate() {
            let line = format!("  [{}] {}", index + 1, button.label);
            self.line(&line);
        }
    }

    fn clear_buttons(&mut self) {}

    fn show_thinking(&mut self, _ticket: u64) {
        let line = format!("{}: ...", self.bot_name);
        self.line(&line);
    }

    fn set_visible(&mut self, visible: bool) {
        self.line(if visible {
            "-- chat opened --"
        } else {
            "-- chat minimized --"
        });
    }
}
