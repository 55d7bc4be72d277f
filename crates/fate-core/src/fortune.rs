//! Fortunes attached to a completed roll.

use serde::{Deserialize, Serialize};

/// Mood classification of a fortune. Governs display styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// A favourable reading.
    Lucky,
    /// Neither good nor bad. Also the substitute for any unknown tone.
    #[default]
    Neutral,
    /// A foreboding reading.
    Ominous,
}

impl Tone {
    /// Parse a tone tag, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside the three known tones.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "lucky" => Some(Self::Lucky),
            "neutral" => Some(Self::Neutral),
            "ominous" => Some(Self::Ominous),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lucky => write!(f, "lucky"),
            Self::Neutral => write!(f, "neutral"),
            Self::Ominous => write!(f, "ominous"),
        }
    }
}

/// A short interpretive text plus its tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortune {
    /// The interpretation shown to the user.
    pub text: String,
    /// The mood of the interpretation.
    pub tone: Tone,
}

impl Fortune {
    /// Create a fortune.
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Create a neutral fortune.
    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }
}

impl std::fmt::Display for Fortune {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.text, self.tone)
    }
}
