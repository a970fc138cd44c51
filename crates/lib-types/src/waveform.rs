//! Uniformly sampled signal representation.
//!
//! Samples in a `Waveform` are point measurements at discrete time instants.
//! For a waveform with `N` samples the sample times are:
//!
//! ```text
//! t[i] = t_start + i * dt,  for i = 0, 1, ..., N-1
//! ```
//!
//! `duration()` returns `N * dt`, the span from `t_start` to one sample
//! past the last one.

use crate::units::{Hertz, Seconds};
use serde::{Deserialize, Serialize};

/// A uniformly-sampled time-domain signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample values.
    pub samples: Vec<f64>,

    /// Time step between consecutive samples.
    pub dt: Seconds,

    /// Time of the first sample.
    pub t_start: Seconds,
}

impl Waveform {
    /// Create a new waveform from samples.
    pub fn new(samples: Vec<f64>, dt: Seconds, t_start: Seconds) -> Self {
        Self { samples, dt, t_start }
    }

    /// Create a waveform starting at t = 0 from a sample rate.
    pub fn from_sample_rate(samples: Vec<f64>, sample_rate: Hertz) -> Self {
        Self {
            samples,
            dt: sample_rate.to_period(),
            t_start: Seconds::ZERO,
        }
    }

    /// Number of samples in the waveform.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the waveform is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration of the waveform.
    #[inline]
    pub fn duration(&self) -> Seconds {
        Seconds(self.samples.len() as f64 * self.dt.0)
    }

    /// Get the time value for a given sample index.
    #[inline]
    pub fn time_at(&self, index: usize) -> Seconds {
        Seconds(self.t_start.0 + index as f64 * self.dt.0)
    }

    /// Sample times for every sample, in seconds.
    pub fn times(&self) -> Vec<f64> {
        (0..self.samples.len()).map(|i| self.time_at(i).0).collect()
    }

    /// Sample rate (reciprocal of dt).
    #[inline]
    pub fn sample_rate(&self) -> Hertz {
        self.dt.to_frequency()
    }

    /// Peak-to-peak amplitude.
    pub fn peak_to_peak(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::MAX, f64::MIN), |(min, max), &v| (min.min(v), max.max(v)));
        max - min
    }

    /// Maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.samples.iter().map(|v| v.abs()).fold(0.0, f64::max)
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Root mean square value.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|v| v * v).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    /// Keep every `divisor`-th sample starting at `offset`.
    ///
    /// The time step grows by `divisor` and `t_start` moves to the first kept sample.
    pub fn decimate(&self, divisor: usize, offset: usize) -> Self {
        let divisor = divisor.max(1);
        Self {
            samples: self.samples.iter().skip(offset).step_by(divisor).copied().collect(),
            dt: self.dt * divisor as f64,
            t_start: self.time_at(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_basics() {
        let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0];
        let wf = Waveform::new(samples, Seconds::from_ms(10.0), Seconds::ZERO);

        assert_eq!(wf.len(), 5);
        assert!((wf.duration().as_ms() - 50.0).abs() < 1e-9);
        assert!((wf.peak_to_peak() - 1.0).abs() < 1e-12);
        assert!((wf.sample_rate().0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_decimate_moves_start() {
        let wf = Waveform::from_sample_rate((0..10).map(f64::from).collect(), Hertz(10.0));
        let dec = wf.decimate(3, 1);

        assert_eq!(dec.samples, vec![1.0, 4.0, 7.0]);
        assert!((dec.dt.0 - 0.3).abs() < 1e-12);
        assert!((dec.t_start.0 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_statistics() {
        let wf = Waveform::new(Vec::new(), Seconds(1.0), Seconds::ZERO);
        assert!(wf.is_empty());
        assert_eq!(wf.rms(), 0.0);
        assert_eq!(wf.mean(), 0.0);
        assert_eq!(wf.peak_to_peak(), 0.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let wf = Waveform::new(vec![1.0, 2.0], Seconds(0.5), Seconds(1.0));
        let json = serde_json::to_string(&wf).unwrap();
        let back: Waveform = serde_json::from_str(&json).unwrap();
        assert_eq!(wf, back);
    }
}
