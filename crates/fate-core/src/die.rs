//! The two die kinds a session can roll.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A die kind, carrying its face count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DieKind {
    /// Classic six-sided die.
    #[default]
    #[serde(rename = "d6")]
    Six,
    /// Mystic twenty-one-sided die.
    #[serde(rename = "d21")]
    TwentyOne,
}

impl DieKind {
    /// All die kinds in display order.
    pub const ALL: [DieKind; 2] = [DieKind::Six, DieKind::TwentyOne];

    /// Returns the number of faces on this die.
    pub fn faces(self) -> u32 {
        match self {
            Self::Six => 6,
            Self::TwentyOne => 21,
        }
    }

    /// Human-facing label used by the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Six => "Classic D6",
            Self::TwentyOne => "Mystic D21",
        }
    }

    /// The other die kind.
    pub fn toggled(self) -> Self {
        match self {
            Self::Six => Self::TwentyOne,
            Self::TwentyOne => Self::Six,
        }
    }

    /// Whether `value` is a face of this die.
    pub fn contains(self, value: u32) -> bool {
        (1..=self.faces()).contains(&value)
    }
}

impl FromStr for DieKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d6" | "6" | "six" => Ok(Self::Six),
            "d21" | "21" | "twentyone" | "twenty-one" => Ok(Self::TwentyOne),
            _ => Err(CoreError::UnknownDie(s.to_string())),
        }
    }
}

impl std::fmt::Display for DieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.faces())
    }
}
