//! Error types for DSP operations.

use thiserror::Error;

/// Errors that can occur during DSP operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DspError {
    /// FFT size is too small to produce any frequency bin.
    #[error("FFT size must be at least 2, got {0}")]
    InvalidFftSize(usize),

    /// Input length mismatch.
    #[error("Input length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Insufficient data for operation.
    #[error("Insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter combination.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Numerical instability detected.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl DspError {
    /// Error for an input that must contain at least `needed` samples.
    pub fn insufficient(needed: usize, got: usize) -> Self {
        Self::InsufficientData { needed, got }
    }
}

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Check that two paired inputs have the same length.
pub(crate) fn check_same_len(x: &[f64], y: &[f64]) -> DspResult<()> {
    if x.len() != y.len() {
        return Err(DspError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}
