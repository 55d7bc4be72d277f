//! Fortune provider for Fate Roller.
//!
//! Turns a completed roll into a short interpretive [`Fortune`] by asking a
//! Gemini model for a JSON verdict. The provider never fails: a missing
//! credential, a broken transport, or a malformed reply all degrade to a
//! neutral fallback fortune.
//!
//! [`Fortune`]: fate_core::Fortune

pub mod config;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod reply;

pub use config::OracleConfig;
pub use error::{OracleError, OracleResult};
pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use provider::{FALLBACK_TEXT, FortuneProvider, UNAVAILABLE_TEXT};
pub use reply::{UNCLEAR_TEXT, parse_reply};
