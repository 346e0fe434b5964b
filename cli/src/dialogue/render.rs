//! # Render Sink
//!
//! File: cli/src/dialogue/render.rs
//!
//! ## Overview
//!
//! The boundary between a dialogue session and whatever displays it. A
//! session never formats output itself; it calls a `RenderSink` it was
//! constructed with:
//! - `append` for every user or bot message, in order;
//! - `show_buttons` / `clear_buttons` for quick-reply buttons;
//! - `show_thinking` / `dismiss_thinking` for the transient "..." bubble;
//! - `set_visible` when the chat surface opens or minimizes.
//!
//! Answer text may embed a hyperlink; sinks decide how to show it.
//!
//! `RecordingSink` keeps every call as a `RenderEvent` and is what the tests
//! (and the one-shot `ask` command) use. The terminal sink lives in
//! `common::ui`.
//!
use std::fmt;

/// Who said a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "You"),
            Speaker::Bot => write!(f, "Bot"),
        }
    }
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}

/// A clickable quick reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub id: String,
    pub label: String,
}

/// Display surface driven by a session.
pub trait RenderSink {
    fn append(&mut self, message: &Message);

    /// Replaces the displayed button set.
    fn show_buttons(&mut self, buttons: &[Button]);

    fn clear_buttons(&mut self);

    /// Shows a placeholder identified by `ticket` until it is dismissed.
    fn show_thinking(&mut self, _ticket: u64) {}

    fn dismiss_thinking(&mut self, _ticket: u64) {}

    fn set_visible(&mut self, _visible: bool) {}
}

/// A single sink call, as recorded by `RecordingSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Message(Message),
    Buttons(Vec<Button>),
    ClearButtons,
    Thinking(u64),
    ThinkingDismissed(u64),
    Visible(bool),
}

/// Sink that remembers everything it was asked to render.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<RenderEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.events.iter().filter_map(|event| match event {
            RenderEvent::Message(message) => Some(message),
            _ => None,
        })
    }

    pub fn bot_texts(&self) -> Vec<&str> {
        self.messages()
            .filter(|m| m.speaker == Speaker::Bot)
            .map(|m| m.text.as_str())
            .collect()
    }

    /// Ids of the most recently shown button set, if any was shown.
    pub fn last_button_ids(&self) -> Option<Vec<&str>> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::Buttons(buttons) => {
                Some(buttons.iter().map(|b| b.id.as_str()).collect())
            }
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn append(&mut self, message: &Message) {
        self.events.push(RenderEvent::Message(message.clone()));
    }

    fn show_buttons(&mut self, buttons: &[Button]) {
        self.events.push(RenderEvent::Buttons(buttons.to_vec()));
    }

    fn clear_buttons(&mut self) {
        self.events.push(RenderEvent::ClearButtons);
    }

    fn show_thinking(&mut self, ticket: u64) {
        self.events.push(RenderEvent::Thinking(ticket));
    }

    fn dismiss_thinking(&mut self, ticket: u64) {
        self.events.push(RenderEvent::ThinkingDismissed(ticket));
    }

    fn set_visible(&mut self, visible: bool) {
        self.events.push(RenderEvent::Visible(visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_call_order() {
        let mut sink = RecordingSink::new();
        sink.append(&Message::user("hi"));
        sink.show_thinking(1);
        sink.dismiss_thinking(1);
        sink.append(&Message::bot("hello"));
        assert_eq!(
            sink.events(),
            &[
                RenderEvent::Message(Message::user("hi")),
                RenderEvent::Thinking(1),
                RenderEvent::ThinkingDismissed(1),
                RenderEvent::Message(Message::bot("hello")),
            ]
        );
        assert_eq!(sink.bot_texts(), vec!["hello"]);
    }

    #[test]
    fn test_last_button_ids() {
        let mut sink = RecordingSink::new();
        assert!(sink.last_button_ids().is_none());
        sink.show_buttons(&[Button {
            id: "a".into(),
            label: "A?".into(),
        }]);
        sink.clear_buttons();
        sink.show_buttons(&[Button {
            id: "b".into(),
            label: "B?".into(),
        }]);
        assert_eq!(sink.last_button_ids(), Some(vec!["b"]));
    }

    #[test]
    fn test_speaker_display() {
        assert_eq!(Speaker::User.to_string(), "You");
        assert_eq!(Speaker::Bot.to_string(), "Bot");
    }
}
