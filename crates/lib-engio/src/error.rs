//! Error types for engineering-notation parsing and formatting.

use thiserror::Error;

/// Errors that can occur while reading or rendering engineering values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngIoError {
    /// Input was empty (or whitespace only).
    #[error("Empty input")]
    Empty,

    /// Input does not follow engineering notation.
    #[error("Invalid engineering value '{input}': {reason}")]
    InvalidFormat { input: String, reason: &'static str },

    /// The numeric part could not be read as a floating-point number.
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// NaN or infinite values have no engineering representation.
    #[error("Value {0} is not finite")]
    NotFinite(f64),

    /// Value magnitude is outside the configured suffix table.
    #[error("Value {value} is outside the SI suffix range")]
    OutOfRange { value: f64 },

    /// Invalid parser/formatter configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngIoError {
    /// Create an invalid format error.
    pub fn invalid_format(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason,
        }
    }
}

/// Result type for engineering I/O operations.
pub type EngIoResult<T> = Result<T, EngIoError>;
