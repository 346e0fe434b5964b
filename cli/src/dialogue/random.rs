//! # Prompt Picker
//!
//! File: cli/src/dialogue/random.rs
//!
//! The random source behind closing-prompt selection. Sessions take a
//! `PromptPicker` at construction; production code uses [`RngPicker`] over
//! an OS-seeded `StdRng`, tests inject [`FixedPicker`] or a fixed seed.
//!
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses an index in `0..len`. Callers never pass `len == 0`.
pub trait PromptPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform choice backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R>(pub R);

impl RngPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PromptPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always picks the same index (wrapped into range).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl PromptPicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}
