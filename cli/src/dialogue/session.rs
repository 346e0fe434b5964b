//! # Dialogue Session
//!
//! File: cli/src/dialogue/session.rs
//!
//! ## Overview
//!
//! One conversation on one page. A session owns its script, the render sink
//! it draws on, the prompt picker, the conversation state and a timeline of
//! deferred events. Everything runs on the caller's thread; delays are
//! events on the timeline, fired when the owner advances time.
//!
//! ## States
//!
//! The surface is either **minimized** or **expanded**:
//! - `open` expands it. The first time it also shows the welcome line (if
//!   the script has one) and the opening buttons. Opening an open session
//!   does nothing.
//! - `minimize` hides it. History, counters and pending events are kept.
//! - `toggle` flips between the two.
//!
//! Input is accepted only while expanded; blank input is dropped silently.
//!
//! ## Turn ordering
//!
//! A turn is always rendered as:
//! 1. the user's line (immediately);
//! 2. the bot answer after the answer delay, or, on keyword pages, a
//!    thinking bubble immediately that is replaced by the answer after the
//!    thinking delay;
//! 3. after the follow-up delay, either the follow-up buttons or, when the
//!    answer was terminal and at least two exchanges are complete, one
//!    closing prompt. The closing prompt is shown at most once.
//!
//! Rapid submissions are not coalesced: each turn keeps its own order and
//! overlapping turns interleave only by due time.
//!
use crate::dialogue::random::PromptPicker;
use crate::dialogue::render::{Button, Message, RenderSink};
use crate::dialogue::script::{Choice, NextStep, Reply, Script};
use crate::dialogue::timeline::Timeline;
use std::time::Duration;
use tracing::{debug, trace};

/// Exchanges required before a terminal answer is followed by a closing prompt.
const CLOSING_THRESHOLD: u32 = 2;

/// Delays between the steps of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// User line to bot answer (quick-reply pages).
    pub answer_delay: Duration,
    /// Bot answer to follow-up buttons or closing prompt.
    pub follow_up_delay: Duration,
    /// Thinking bubble to bot answer (keyword pages).
    pub thinking_delay: Duration,
    /// Page load to automatic open, for pages that open by themselves.
    pub auto_open_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            answer_delay: Duration::from_millis(800),
            follow_up_delay: Duration::from_millis(500),
            thinking_delay: Duration::from_millis(1200),
            auto_open_delay: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// No delays at all; every turn settles at the instant it starts.
    pub fn instant() -> Self {
        Self {
            answer_delay: Duration::ZERO,
            follow_up_delay: Duration::ZERO,
            thinking_delay: Duration::ZERO,
            auto_open_delay: Duration::ZERO,
        }
    }
}

/// Per-session conversation state.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    exchange_count: u32,
    transcript: Vec<Message>,
    is_open: bool,
    welcomed: bool,
    closing_shown: bool,
}

impl ConversationState {
    /// Completed bot answers so far.
    pub fn exchange_count(&self) -> u32 {
        self.exchange_count
    }

    /// Everything appended so far, in display order.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn closing_shown(&self) -> bool {
        self.closing_shown
    }
}

/// Why input was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing but whitespace.
    Empty,
    /// The surface is minimized.
    SurfaceHidden,
    /// The button id names nothing on this page.
    UnknownChoice,
}

/// Outcome of `submit_text` / `choose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(Rejection),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

#[derive(Debug)]
enum Deferred {
    AutoOpen,
    Answer { reply: Reply, thinking: Option<u64> },
    FollowUps(Vec<String>),
    Closing,
}

pub struct Session<S, P> {
    script: Script,
    pacing: Pacing,
    sink: S,
    picker: P,
    state: ConversationState,
    buttons: Vec<Button>,
    timeline: Timeline<Deferred>,
    next_ticket: u64,
}

impl<S: RenderSink, P: PromptPicker> Session<S, P> {
    pub fn new(script: Script, pacing: Pacing, sink: S, picker: P) -> Self {
        debug!("New {} session", script.variant());
        Self {
            script,
            pacing,
            sink,
            picker,
            state: ConversationState::default(),
            buttons: Vec::new(),
            timeline: Timeline::new(),
            next_ticket: 0,
        }
    }

    /// Opens the surface after the auto-open delay, as the contact page does.
    pub fn schedule_auto_open(&mut self) {
        let due = self
            .timeline
            .schedule_in(self.pacing.auto_open_delay, Deferred::AutoOpen);
        debug!("Auto-open scheduled at {:?}", due);
    }

    /// Expands the surface. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.state.is_open {
            trace!("open() on an open session ignored");
            return false;
        }
        self.state.is_open = true;
        self.sink.set_visible(true);
        debug!("Session expanded");

        if !self.state.welcomed {
            self.state.welcomed = true;
            let opening = self.script.opening();
            if let Some(welcome) = opening.welcome {
                self.append(Message::bot(welcome));
            }
            self.show_buttons(opening.buttons);
        }
        true
    }

    /// Hides the surface. Returns `false` if it was already minimized.
    pub fn minimize(&mut self) -> bool {
        if !self.state.is_open {
            return false;
        }
        self.state.is_open = false;
        self.sink.set_visible(false);
        debug!("Session minimized");
        true
    }

    pub fn toggle(&mut self) {
        if self.state.is_open {
            self.minimize();
        } else {
            self.open();
        }
    }

    /// # Submit Typed Text (`submit_text`)
    ///
    /// Echoes the trimmed line and schedules the reply on the timeline.
    ///
    /// ## Arguments
    ///
    /// * `text`: The line as typed. Surrounding whitespace is ignored.
    ///
    /// ## Returns
    ///
    /// * `Submission`: `Accepted`, or `Rejected` with `Empty` for a blank
    ///   line and `SurfaceHidden` while minimized. A rejected line leaves
    ///   the session untouched.
    pub fn submit_text(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Rejected(Rejection::Empty);
        }
        if !self.state.is_open {
            return Submission::Rejected(Rejection::SurfaceHidden);
        }
        let reply = self.script.reply_to_text(text);
        self.start_turn(text.to_string(), reply);
        Submission::Accepted
    }

    /// # Press a Button (`choose`)
    ///
    /// Clears the displayed buttons and starts a turn for the pressed one.
    /// Suggestion buttons of the keyword variant behave like typed text.
    ///
    /// ## Arguments
    ///
    /// * `id`: The button id. Surrounding whitespace is ignored.
    ///
    /// ## Returns
    ///
    /// * `Submission`: `Rejected(Empty)` for a blank id,
    ///   `Rejected(SurfaceHidden)` while minimized, and
    ///   `Rejected(UnknownChoice)` for an id the script does not offer.
    pub fn choose(&mut self, id: &str) -> Submission {
        let id = id.trim();
        if id.is_empty() {
            return Submission::Rejected(Rejection::Empty);
        }
        if !self.state.is_open {
            return Submission::Rejected(Rejection::SurfaceHidden);
        }
        match self.script.reply_to_choice(id) {
            Choice::Answer { prompt, reply } => {
                self.clear_buttons();
                self.start_turn(prompt, reply);
                Submission::Accepted
            }
            Choice::Typed(text) => self.submit_text(&text),
            Choice::Unknown => Submission::Rejected(Rejection::UnknownChoice),
        }
    }

    /// Fires every event due at or before `now`, including events those
    /// handlers schedule within the same window. Returns how many fired.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(event) = self.timeline.pop_due(now) {
            self.fire(event);
            fired += 1;
        }
        self.timeline.settle(now);
        fired
    }

    pub fn advance_by(&mut self, delta: Duration) -> usize {
        let target = self.timeline.now() + delta;
        self.advance_to(target)
    }

    /// Fires events until nothing is pending.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.timeline.next_due() {
            fired += self.advance_to(due);
        }
        fired
    }

    /// When the next deferred event is due, if any is pending.
    pub fn next_due(&self) -> Option<Duration> {
        self.timeline.next_due()
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The button set currently on display.
    pub fn displayed_buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn start_turn(&mut self, user_text: String, reply: Reply) {
        self.append(Message::user(user_text));
        let (delay, thinking) = if self.script.shows_thinking() {
            let ticket = self.next_ticket;
            self.next_ticket += 1;
            self.sink.show_thinking(ticket);
            (self.pacing.thinking_delay, Some(ticket))
        } else {
            (self.pacing.answer_delay, None)
        };
        let due = self
            .timeline
            .schedule_in(delay, Deferred::Answer { reply, thinking });
        trace!("Answer scheduled at {:?}", due);
    }

    fn fire(&mut self, event: Deferred) {
        trace!("Firing {:?} at {:?}", event, self.timeline.now());
        match event {
            Deferred::AutoOpen => {
                self.open();
            }
            Deferred::Answer { reply, thinking } => self.deliver(reply, thinking),
            Deferred::FollowUps(ids) => {
                let buttons = self.script.buttons_for(&ids);
                if buttons.is_empty() {
                    debug!("No follow-up of {:?} resolved; nothing offered", ids);
                } else {
                    self.show_buttons(buttons);
                }
            }
            Deferred::Closing => self.show_closing(),
        }
    }

    fn deliver(&mut self, reply: Reply, thinking: Option<u64>) {
        if let Some(ticket) = thinking {
            self.sink.dismiss_thinking(ticket);
        }
        self.append(Message::bot(reply.text));
        self.state.exchange_count += 1;
        debug!("Exchange #{} complete", self.state.exchange_count);

        match reply.next {
            NextStep::Offer(ids) if !ids.is_empty() => {
                self.timeline
                    .schedule_in(self.pacing.follow_up_delay, Deferred::FollowUps(ids));
            }
            NextStep::Offer(_) if self.closing_due() => {
                // Claimed now so an overlapping turn cannot queue a second one.
                self.state.closing_shown = true;
                self.timeline
                    .schedule_in(self.pacing.follow_up_delay, Deferred::Closing);
            }
            NextStep::Offer(_) | NextStep::Standalone => {}
        }
    }

    fn closing_due(&self) -> bool {
        self.state.exchange_count >= CLOSING_THRESHOLD
            && !self.state.closing_shown
            && !self.script.closing_prompts().is_empty()
    }

    fn show_closing(&mut self) {
        let prompts = self.script.closing_prompts();
        if prompts.is_empty() {
            return;
        }
        let index = self.picker.pick(prompts.len());
        let text = prompts[index % prompts.len()].clone();
        debug!("Closing prompt #{} chosen", index);
        self.append(Message::bot(text));
    }

    fn append(&mut self, message: Message) {
        self.sink.append(&message);
        self.state.transcript.push(message);
    }

    fn show_buttons(&mut self, buttons: Vec<Button>) {
        if buttons.is_empty() {
            return;
        }
        self.sink.show_buttons(&buttons);
        self.buttons = buttons;
    }

    fn clear_buttons(&mut self) {
        if !self.buttons.is_empty() {
            self.sink.clear_buttons();
            self.buttons.clear();
        }
    }
}
