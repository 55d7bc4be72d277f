//! Completed roll outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::die::DieKind;

/// The celebratory cue emitted when a roll lands on an extreme face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Celebration {
    /// The highest face of the die.
    Critical,
    /// A roll of 1.
    Fumble,
}

impl std::fmt::Display for Celebration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical!"),
            Self::Fumble => write!(f, "Fumble!"),
        }
    }
}

/// One completed roll. Never mutated; superseded by the next roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Position of this roll in the session, starting at 1.
    pub sequence: u64,
    /// The face that came up (1 to `die.faces()`).
    pub value: u32,
    /// The die this roll was resolved against.
    pub die: DieKind,
    /// Wall-clock time of resolution.
    pub produced_at: DateTime<Utc>,
}

impl RollOutcome {
    /// Whether this roll hit the highest face.
    pub fn is_max(&self) -> bool {
        self.value == self.die.faces()
    }

    /// Whether this roll hit 1.
    pub fn is_min(&self) -> bool {
        self.value == 1
    }

    /// The celebration for this roll, if it landed on an extreme face.
    pub fn celebration(&self) -> Option<Celebration> {
        if self.is_max() {
            Some(Celebration::Critical)
        } else if self.is_min() {
            Some(Celebration::Fumble)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.value, self.die)
    }
}
