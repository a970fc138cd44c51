//! Window functions for spectral analysis.
//!
//! All windows are symmetric and match the usual `numpy` definitions,
//! so `generate_window(FftWindow::Hann, n)` equals `numpy.hanning(n)`.

use crate::error::DspError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Kaiser beta used when a window is selected by name.
pub const DEFAULT_KAISER_BETA: f64 = 2.0;

/// Window applied to each block before the FFT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FftWindow {
    /// Strong sidelobe rejection; the default.
    #[default]
    Blackman,
    /// Triangular window.
    Bartlett,
    Hamming,
    /// Raised cosine.
    Hann,
    /// Kaiser-Bessel window with shape parameter `beta`.
    Kaiser { beta: f64 },
    /// No windowing.
    Rectangular,
}

impl FromStr for FftWindow {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blackman" => Ok(Self::Blackman),
            "bartlett" => Ok(Self::Bartlett),
            "hamming" => Ok(Self::Hamming),
            "hann" | "hanning" => Ok(Self::Hann),
            "kaiser" => Ok(Self::Kaiser {
                beta: DEFAULT_KAISER_BETA,
            }),
            "none" | "rectangular" => Ok(Self::Rectangular),
            other => Err(DspError::InvalidConfig(format!("unknown FFT window '{other}'"))),
        }
    }
}

impl fmt::Display for FftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blackman => f.write_str("blackman"),
            Self::Bartlett => f.write_str("bartlett"),
            Self::Hamming => f.write_str("hamming"),
            Self::Hann => f.write_str("hann"),
            Self::Kaiser { beta } => write!(f, "kaiser(beta={beta})"),
            Self::Rectangular => f.write_str("rectangular"),
        }
    }
}

/// Zeroth-order modified Bessel function of the first kind, I_0(x).
///
/// Polynomial approximation (Abramowitz & Stegun 9.8.1 / 9.8.2).
fn bessel_i0(x: f64) -> f64 {
    let ax = x.abs();

    if ax < 3.75 {
        let t = (x / 3.75).powi(2);
        1.0 + t * (3.5156229
            + t * (3.0899424
                + t * (1.2067492 + t * (0.2659732 + t * (0.0360768 + t * 0.0045813)))))
    } else {
        let t = 3.75 / ax;
        (ax.exp() / ax.sqrt())
            * (0.39894228
                + t * (0.01328592
                    + t * (0.00225319
                        + t * (-0.00157565
                            + t * (0.00916281
                                + t * (-0.02057706
                                    + t * (0.02635537 + t * (-0.01647633 + t * 0.00392377))))))))
    }
}

/// Window coefficients of the given type and length.
pub fn generate_window(window: FftWindow, length: usize) -> Vec<f64> {
    match length {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }

    let m = (length - 1) as f64;
    let coefficient = |i: usize| -> f64 {
        let x = i as f64 / m;
        match window {
            FftWindow::Rectangular => 1.0,
            FftWindow::Bartlett => 1.0 - (2.0 * x - 1.0).abs(),
            FftWindow::Hann => 0.5 - 0.5 * (2.0 * PI * x).cos(),
            FftWindow::Hamming => 0.54 - 0.46 * (2.0 * PI * x).cos(),
            FftWindow::Blackman => 0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos(),
            FftWindow::Kaiser { beta } => {
                let r = 2.0 * x - 1.0;
                bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / bessel_i0(beta)
            }
        }
    };

    (0..length).map(coefficient).collect()
}

/// Multiply `values` elementwise by the window coefficients.
pub fn apply_window(values: &[f64], coefficients: &[f64]) -> Vec<f64> {
    values.iter().zip(coefficients).map(|(v, w)| v * w).collect()
}
