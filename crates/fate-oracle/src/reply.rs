//! Validation of the model's fortune document.
//!
//! The reply is untrusted text. It is parsed as an untyped JSON value and
//! then checked field by field:
//!
//! - `text` must be a non-blank string, otherwise [`UNCLEAR_TEXT`] is used;
//! - `tone` must name one of the three tones (any case), otherwise neutral.
//!
//! Anything that is not a JSON object at all is an error, which the
//! provider turns into its fallback fortune.

use fate_core::{Fortune, Tone};
use serde_json::Value;

use crate::error::{OracleError, OracleResult};

/// Substitute text when the reply carries no usable `text` field.
pub const UNCLEAR_TEXT: &str = "Destiny is unclear.";

/// Parse a fortune document.
pub fn parse_reply(raw: &str) -> OracleResult<Fortune> {
    let doc: Value = serde_json::from_str(strip_code_fence(raw))?;
    let Value::Object(fields) = doc else {
        return Err(OracleError::NotAnObject);
    };

    let text = fields
        .get("text")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNCLEAR_TEXT);
    let tone = fields
        .get("tone")
        .and_then(Value::as_str)
        .and_then(Tone::from_tag)
        .unwrap_or_default();

    Ok(Fortune::new(text, tone))
}

/// Models occasionally wrap JSON in a markdown fence despite being told not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
