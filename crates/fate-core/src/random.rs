//! Random sources for the roll engine.
//!
//! The engine only ever asks for one thing: the next uniform integer in an
//! inclusive range. Production code uses [`ThreadRandom`]; tests substitute
//! [`ScriptedRandom`] to force specific faces.

use std::collections::VecDeque;

use rand::Rng;

/// A source of uniformly distributed integers.
pub trait RandomSource: Send {
    /// Return the next integer in `low..=high`. Callers guarantee `low <= high`.
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;
}

/// Non-deterministic source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        rand::rng().random_range(low..=high)
    }
}

/// A source that replays a fixed script of values, cycling when exhausted.
///
/// Values outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<u32>,
}

impl ScriptedRandom {
    /// Create a source replaying `values` in order. An empty script yields `low`.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: u32) -> Self {
        Self::new([value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        match self.values.pop_front() {
            Some(v) => {
                self.values.push_back(v);
                v.clamp(low, high)
            }
            None => low,
        }
    }
}
