//! The timed roll engine.
//!
//! A roll is triggered, stays in flight for [`ROLL_DURATION`] while the
//! front end animates, and resolves on the first [`RollEngine::poll`] at or
//! after its deadline. Time is passed in by the caller so the engine holds
//! no timer of its own.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::die::DieKind;
use crate::outcome::{Celebration, RollOutcome};
use crate::random::{RandomSource, ThreadRandom};

/// How long a roll stays in flight before it resolves.
pub const ROLL_DURATION: Duration = Duration::from_millis(800);

/// A roll that just resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The new outcome.
    pub outcome: RollOutcome,
    /// Set when the roll landed on 1 or the highest face.
    pub celebration: Option<Celebration>,
}

/// Owns the die kind, the face currently showing, and the in-flight roll.
pub struct RollEngine {
    die: DieKind,
    current_value: u32,
    deadline: Option<Instant>,
    roll_duration: Duration,
    sequence: u64,
    last_outcome: Option<RollOutcome>,
    rng: Box<dyn RandomSource>,
}

impl RollEngine {
    /// Create an engine rolling `die` with the thread-local RNG.
    pub fn new(die: DieKind) -> Self {
        Self::with_source(die, ThreadRandom)
    }

    /// Create an engine drawing faces from `rng`.
    pub fn with_source(die: DieKind, rng: impl RandomSource + 'static) -> Self {
        Self {
            die,
            current_value: 1,
            deadline: None,
            roll_duration: ROLL_DURATION,
            sequence: 0,
            last_outcome: None,
            rng: Box::new(rng),
        }
    }

    /// Override the in-flight duration.
    pub fn with_roll_duration(mut self, duration: Duration) -> Self {
        self.roll_duration = duration;
        self
    }

    /// The die kind the next resolution will use.
    pub fn die(&self) -> DieKind {
        self.die
    }

    /// The face currently showing.
    pub fn current_value(&self) -> u32 {
        self.current_value
    }

    /// Whether a roll is in flight.
    pub fn is_rolling(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the in-flight roll resolves, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The configured in-flight duration.
    pub fn roll_duration(&self) -> Duration {
        self.roll_duration
    }

    /// The most recent completed roll.
    pub fn last_outcome(&self) -> Option<&RollOutcome> {
        self.last_outcome.as_ref()
    }

    /// Fraction of the in-flight window elapsed at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let deadline = self.deadline?;
        if self.roll_duration.is_zero() {
            return Some(1.0);
        }
        let remaining = deadline.saturating_duration_since(now);
        let elapsed = self.roll_duration.saturating_sub(remaining);
        Some((elapsed.as_secs_f32() / self.roll_duration.as_secs_f32()).clamp(0.0, 1.0))
    }

    /// Start a roll at `now`. Returns `false` without side effects if one is
    /// already in flight.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            tracing::trace!("roll already in flight, trigger ignored");
            return false;
        }
        self.deadline = Some(now + self.roll_duration);
        tracing::debug!(die = %self.die, "roll started");
        true
    }

    /// Resolve the in-flight roll if its deadline has passed.
    ///
    /// Returns the resolution exactly once per trigger.
    pub fn poll(&mut self, now: Instant) -> Option<Resolution> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        let value = self.rng.next_in_range(1, self.die.faces());
        debug_assert!(self.die.contains(value), "{value} is not a face of {}", self.die);
        self.current_value = value;
        self.sequence += 1;

        let outcome = RollOutcome {
            sequence: self.sequence,
            value,
            die: self.die,
            produced_at: Utc::now(),
        };
        let celebration = outcome.celebration();
        tracing::debug!(value, die = %self.die, sequence = self.sequence, "roll resolved");
        self.last_outcome = Some(outcome.clone());

        Some(Resolution {
            outcome,
            celebration,
        })
    }

    /// Switch the die kind and show face 1. An in-flight roll keeps going
    /// and resolves against the new die.
    pub fn set_die(&mut self, die: DieKind) {
        self.die = die;
        self.current_value = 1;
    }
}

impl std::fmt::Debug for RollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollEngine")
            .field("die", &self.die)
            .field("current_value", &self.current_value)
            .field("deadline", &self.deadline)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
