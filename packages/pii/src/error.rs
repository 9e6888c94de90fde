//! Typed errors for the PII library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! bad input apart from internal failures.

use thiserror::Error;

/// Errors that can occur while analyzing or anonymizing text.
#[derive(Debug, Error)]
pub enum PiiError {
    /// No recognizer is registered for the requested language
    #[error("language not supported: {0}")]
    UnsupportedLanguage(String),

    /// Entity name does not map to a known entity type
    #[error("unknown entity type: {0}")]
    UnknownEntity(String),

    /// Operator configuration could not be parsed or is invalid
    #[error("invalid operator: {reason}")]
    InvalidOperator { reason: String },

    /// Result span does not fit the text it claims to describe
    #[error("invalid span {start}..{end} for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    /// Custom recognizer pattern failed to compile
    #[error("invalid pattern {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

impl PiiError {
    /// True when the error was caused by caller input rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PiiError::UnsupportedLanguage(_)
                | PiiError::UnknownEntity(_)
                | PiiError::InvalidOperator { .. }
                | PiiError::InvalidPattern { .. }
        )
    }
}

/// Result type alias for PII operations.
pub type Result<T> = std::result::Result<T, PiiError>;
