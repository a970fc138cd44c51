//! Synthetic test signals.

use crate::error::{DspError, DspResult};
use lib_types::units::Hertz;
use lib_types::waveform::Waveform;
use std::f64::consts::PI;

/// Parameters of a generated sine wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SineSpec {
    pub frequency: Hertz,
    pub samplerate: Hertz,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Length in seconds.
    pub length: f64,
    /// Phase shift in degrees.
    pub phaseshift: f64,
    pub offset: f64,
}

impl SineSpec {
    /// One second of a unit-amplitude sine without phase shift or offset.
    pub fn new(frequency: Hertz, samplerate: Hertz) -> Self {
        Self {
            frequency,
            samplerate,
            amplitude: 1.0,
            length: 1.0,
            phaseshift: 0.0,
            offset: 0.0,
        }
    }
}

/// Generate `ceil(length * samplerate)` samples of
/// `offset + amplitude * sin(2π f (i + shift) / fs)`, where the phase shift
/// in degrees is converted to a sample offset.
pub fn generate_sinewave(spec: &SineSpec) -> DspResult<Waveform> {
    let f = spec.frequency.0;
    let fs = spec.samplerate.0;
    if !fs.is_finite() || fs <= 0.0 {
        return Err(DspError::InvalidConfig(format!(
            "samplerate must be positive, got {fs}"
        )));
    }
    if f <= 0.0 || spec.length < 0.0 {
        return Err(DspError::InvalidConfig(format!(
            "invalid sine parameters: frequency {f} Hz, length {} s",
            spec.length
        )));
    }
    let count = (spec.length * fs).ceil() as usize;
    let shift = spec.phaseshift * fs / (360.0 * f);
    let samples = (0..count)
        .map(|i| spec.offset + spec.amplitude * (2.0 * PI * f * (i as f64 + shift) / fs).sin())
        .collect();
    Ok(Waveform::from_sample_rate(samples, spec.samplerate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_and_rate() {
        let wf = generate_sinewave(&SineSpec {
            length: 10.0,
            ..SineSpec::new(Hertz(25.0), Hertz(400.0))
        })
        .unwrap();
        assert_eq!(wf.len(), 4000);
        assert_relative_eq!(wf.sample_rate().0, 400.0, epsilon = 1e-9);
        assert_relative_eq!(wf.peak_to_peak(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_phase_and_offset() {
        let wf = generate_sinewave(&SineSpec {
            phaseshift: 90.0,
            offset: 1.5,
            amplitude: 2.0,
            ..SineSpec::new(Hertz(10.0), Hertz(1000.0))
        })
        .unwrap();
        // cos(0) at the first sample
        assert_relative_eq!(wf.samples[0], 3.5, epsilon = 1e-12);
        assert_relative_eq!(wf.mean(), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(generate_sinewave(&SineSpec::new(Hertz(10.0), Hertz(0.0))).is_err());
        assert!(generate_sinewave(&SineSpec::new(Hertz(-1.0), Hertz(100.0))).is_err());
    }
}
