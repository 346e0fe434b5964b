//! # Deferred Event Timeline
//!
//! File: cli/src/dialogue/timeline.rs
//!
//! A virtual-time queue of deferred events. It plays the role browser timers
//! play for a web chatbot: "show the answer in 800 ms" becomes an event due
//! at `now + 800ms`.
//!
//! Events are ordered by `(due, sequence)`, so two events due at the same
//! instant fire in the order they were scheduled. Time only moves when the
//! owner pops events or settles the clock, which keeps sessions fully
//! deterministic under test. A front-end maps wall-clock time onto it.
//!
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug)]
pub struct Timeline<E> {
    now: Duration,
    sequence: u64,
    queue: BTreeMap<(Duration, u64), E>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            sequence: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `event` to fire `delay` after the current time. Returns its due time.
    pub fn schedule_in(&mut self, delay: Duration, event: E) -> Duration {
        let due = self.now + delay;
        self.queue.insert((due, self.sequence), event);
        self.sequence += 1;
        due
    }

    /// Due time of the earliest pending event.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pops the earliest event due at or before `until`, moving the clock to
    /// its due time. Events scheduled while handling it are seen by the next call.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let ((due, _), event) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        Some(event)
    }

    /// Moves the clock forward to `until` (never backwards).
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
