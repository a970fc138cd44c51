//! Error types for electronics formulas.

use lib_engio::EngIoError;
use thiserror::Error;

/// Errors that can occur while evaluating a formula.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ElectronicsError {
    /// An argument could not be read as a number.
    #[error("Invalid input: {0}")]
    Input(#[from] EngIoError),

    /// A temperature was given in a unit that is not a temperature scale.
    #[error("Invalid temperature unit '{0}', expected °C, K or °F")]
    InvalidTemperatureUnit(String),

    /// A temperature below 0 K.
    #[error("Temperature {0} K is below absolute zero")]
    BelowAbsoluteZero(f64),

    /// An argument is outside the domain of the formula.
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl ElectronicsError {
    /// Create an invalid value error.
    pub fn invalid_value(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for electronics formulas.
pub type ElectronicsResult<T> = Result<T, ElectronicsError>;

/// Reject zero, negative and NaN values for arguments that must be positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> ElectronicsResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ElectronicsError::invalid_value(
            name,
            format!("must be positive, got {value}"),
        ))
    }
}

/// Reject values that must not be exactly zero (divisors).
pub(crate) fn require_nonzero(name: &'static str, value: f64) -> ElectronicsResult<f64> {
    if value != 0.0 && !value.is_nan() {
        Ok(value)
    } else {
        Err(ElectronicsError::invalid_value(name, "must not be zero"))
    }
}
