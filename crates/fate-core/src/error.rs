//! Error types for the core crate.

/// Errors that can occur when interpreting user-supplied core values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A die name did not match any supported die kind.
    #[error("unknown die: {0} (expected d6 or d21)")]
    UnknownDie(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
