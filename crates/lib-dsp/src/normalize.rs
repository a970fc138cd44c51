//! Signal normalization.

use crate::error::{DspError, DspResult};
use serde::{Deserialize, Serialize};

/// A normalized signal together with the parameters that produced it.
///
/// The original signal is recovered as `data * factor + offset`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub data: Vec<f64>,
    /// The signal was divided by this value.
    pub factor: f64,
    /// This value was subtracted from the signal before dividing.
    pub offset: f64,
}

impl NormalizationResult {
    /// Undo the normalization.
    pub fn denormalize(&self) -> Vec<f64> {
        self.data.iter().map(|v| v * self.factor + self.offset).collect()
    }
}

fn min_max(signal: &[f64]) -> DspResult<(f64, f64)> {
    if signal.is_empty() {
        return Err(DspError::insufficient(1, 0));
    }
    Ok(signal
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

fn mean(signal: &[f64]) -> f64 {
    signal.iter().sum::<f64>() / signal.len() as f64
}

/// Divide the signal by its maximum value without shifting it.
pub fn normalize_max(signal: &[f64]) -> DspResult<NormalizationResult> {
    let (_, max) = min_max(signal)?;
    if max == 0.0 {
        return Err(DspError::NumericalInstability(
            "cannot normalize a signal whose maximum is zero".into(),
        ));
    }
    Ok(NormalizationResult {
        data: signal.iter().map(|v| v / max).collect(),
        factor: max,
        offset: 0.0,
    })
}

/// Map the smallest value to 0.0 and the largest to 1.0.
pub fn normalize_minmax(signal: &[f64]) -> DspResult<NormalizationResult> {
    let (min, max) = min_max(signal)?;
    let span = max - min;
    if span == 0.0 {
        return Err(DspError::NumericalInstability(
            "cannot normalize a constant signal".into(),
        ));
    }
    Ok(NormalizationResult {
        data: signal.iter().map(|v| (v - min) / span).collect(),
        factor: span,
        offset: min,
    })
}

/// Subtract the mean so the signal is centered around zero.
pub fn center_to_zero(signal: &[f64]) -> DspResult<NormalizationResult> {
    if signal.is_empty() {
        return Err(DspError::insufficient(1, 0));
    }
    let mean = mean(signal);
    Ok(NormalizationResult {
        data: signal.iter().map(|v| v - mean).collect(),
        factor: 1.0,
        offset: mean,
    })
}

/// Difference between the largest and smallest value; zero for an empty signal.
pub fn peak_to_peak(signal: &[f64]) -> f64 {
    min_max(signal).map(|(lo, hi)| hi - lo).unwrap_or(0.0)
}

/// Root mean square; zero for an empty signal.
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|v| v * v).sum::<f64>() / signal.len() as f64).sqrt()
}

/// Copy of the signal with its mean removed.
pub fn remove_mean(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mean = mean(signal);
    signal.iter().map(|v| v - mean).collect()
}
