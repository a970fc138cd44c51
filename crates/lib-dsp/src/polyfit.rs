//! Least-squares polynomial fitting with automatic degree selection.

use crate::error::{check_same_len, DspError, DspResult};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Singular values below this fraction of the largest one are discarded.
const SVD_RELATIVE_EPS: f64 = 1e-14;

/// A polynomial fitted on a normalized domain.
///
/// The coefficients apply to `x' = (x - offset) * scale`, which maps the
/// fitted x range onto [-1, 1] and keeps high degrees well conditioned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    /// Ascending powers of the normalized variable.
    pub coeffs: Vec<f64>,
    pub offset: f64,
    pub scale: f64,
}

impl Polynomial {
    /// Polynomial in raw `x` with ascending coefficients.
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self {
            coeffs,
            offset: 0.0,
            scale: 1.0,
        }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let xn = (x - self.offset) * self.scale;
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * xn + c)
    }

    pub fn eval_many(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.eval(v)).collect()
    }

    /// Coefficients for ascending powers of the raw `x`.
    pub fn coefficients(&self) -> Vec<f64> {
        let n = self.coeffs.len();
        let mut raw = vec![0.0; n];
        let shift = -self.offset;
        for (k, &c) in self.coeffs.iter().enumerate() {
            // c * scale^k * (x + shift)^k
            let mut binom = 1.0;
            let lead = c * self.scale.powi(k as i32);
            for j in 0..=k {
                raw[j] += lead * binom * shift.powi((k - j) as i32);
                binom = binom * (k - j) as f64 / (j + 1) as f64;
            }
        }
        raw
    }

    /// Largest absolute deviation between the polynomial and `(x, y)`.
    ///
    /// NaN if any residual is NaN.
    pub fn max_abs_residual(&self, x: &[f64], y: &[f64]) -> f64 {
        x.iter()
            .zip(y)
            .map(|(&xi, &yi)| (self.eval(xi) - yi).abs())
            .fold(0.0, |acc: f64, r| if r.is_nan() { r } else { acc.max(r) })
    }
}

fn check_finite(name: &str, values: &[f64]) -> DspResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(DspError::InvalidConfig(format!(
            "{name}[{i}] is not finite ({})",
            values[i]
        ))),
        None => Ok(()),
    }
}

fn check_fit_input(x: &[f64], y: &[f64]) -> DspResult<()> {
    check_same_len(x, y)?;
    if x.is_empty() {
        return Err(DspError::insufficient(1, 0));
    }
    check_finite("x", x)?;
    check_finite("y", y)
}

/// A NaN score never beats a number.
fn better_score(candidate: f64, current: f64) -> bool {
    !candidate.is_nan() && (current.is_nan() || candidate < current)
}

fn normalization(x: &[f64]) -> (f64, f64) {
    let (min, max) = x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = max - min;
    if span > 0.0 && span.is_finite() {
        ((min + max) / 2.0, 2.0 / span)
    } else {
        (min, 1.0)
    }
}

/// Least-squares fit of a polynomial of the given degree.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> DspResult<Polynomial> {
    check_fit_input(x, y)?;
    let (offset, scale) = normalization(x);
    let m = x.len();
    let cols = degree + 1;

    let vander = DMatrix::from_fn(m, cols, |i, j| ((x[i] - offset) * scale).powi(j as i32));
    let rhs = DVector::from_column_slice(y);

    let svd = vander.svd(true, true);
    let eps = svd.singular_values.max() * SVD_RELATIVE_EPS;
    let solution = svd
        .solve(&rhs, eps)
        .map_err(|e| DspError::NumericalInstability(format!("SVD solve failed: {e}")))?;

    Ok(Polynomial {
        coeffs: solution.iter().copied().collect(),
        offset,
        scale,
    })
}

/// Degree range searched by [`optimum_polyfit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyfitOptions {
    pub min_degree: usize,
    pub max_degree: usize,
}

impl Default for PolyfitOptions {
    fn default() -> Self {
        Self {
            min_degree: 1,
            max_degree: 30,
        }
    }
}

/// Best fit found by [`optimum_polyfit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyfitResult {
    pub poly: Polynomial,
    pub degree: usize,
    /// Maximum absolute residual of the fit.
    pub score: f64,
}

/// Fit every degree in the configured range and keep the one with the
/// smallest maximum absolute residual.
///
/// The maximum degree is capped at `n - 1` for `n` samples. Equal scores
/// resolve to the lower degree.
pub fn optimum_polyfit(x: &[f64], y: &[f64], options: &PolyfitOptions) -> DspResult<PolyfitResult> {
    check_fit_input(x, y)?;
    let max_degree = options.max_degree.min(x.len() - 1);
    if options.min_degree > max_degree {
        return Err(DspError::InvalidConfig(format!(
            "empty degree range {}..={} for {} samples",
            options.min_degree,
            options.max_degree,
            x.len()
        )));
    }

    let fits = (options.min_degree..=max_degree)
        .into_par_iter()
        .map(|degree| -> DspResult<PolyfitResult> {
            let poly = polyfit(x, y, degree)?;
            let score = poly.max_abs_residual(x, y);
            trace!(degree, score, "polyfit candidate");
            Ok(PolyfitResult { poly, degree, score })
        })
        .collect::<DspResult<Vec<_>>>()?;

    let best = fits
        .into_iter()
        .reduce(|best, next| if better_score(next.score, best.score) { next } else { best })
        .ok_or_else(|| DspError::InvalidConfig("no polynomial degree evaluated".into()))?;
    if best.score.is_nan() {
        return Err(DspError::NumericalInstability(
            "every polynomial degree produced a NaN residual".into(),
        ));
    }

    debug!(
        degree = best.degree,
        score = best.score,
        min_degree = options.min_degree,
        max_degree,
        "optimum polyfit"
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(n: usize, lo: f64, hi: f64) -> Vec<f64> {
        (0..n).map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn test_eval_horner() {
        let p = Polynomial::new(vec![1.0, -2.0, 3.0]);
        assert_eq!(p.degree(), 2);
        assert_relative_eq!(p.eval(2.0), 1.0 - 4.0 + 12.0);
        assert_eq!(p.eval_many(&[0.0, 1.0]), vec![1.0, 2.0]);
    }

    #[test]
    fn test_raw_coefficients() {
        let x = grid(50, 10.0, 20.0);
        let y: Vec<f64> = x.iter().map(|v| 3.0 + 2.0 * v - 0.5 * v * v).collect();
        let p = polyfit(&x, &y, 2).unwrap();
        let c = p.coefficients();
        assert_eq!(c.len(), 3);
        assert_relative_eq!(c[0], 3.0, epsilon = 1e-6);
        assert_relative_eq!(c[1], 2.0, epsilon = 1e-7);
        assert_relative_eq!(c[2], -0.5, epsilon = 1e-9);
        assert_relative_eq!(Polynomial::new(c).eval(15.0), p.eval(15.0), epsilon = 1e-6);
    }

    #[test]
    fn test_optimum_polyfit_square() {
        let x = grid(100, -3.0, 5.0);
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        let opts = PolyfitOptions {
            min_degree: 1,
            max_degree: 10,
        };
        let res = optimum_polyfit(&x, &y, &opts).unwrap();
        assert!(res.degree >= 2);
        assert!(res.score < 1e-8, "score {}", res.score);
        assert_relative_eq!(res.poly.eval(1.5), 2.25, epsilon = 1e-8);
    }

    #[test]
    fn test_optimum_polyfit_prefers_higher_degree_for_cubic_noise() {
        // Deterministic pseudo-noise on top of a cubic
        let x = grid(200, 0.0, 1.0);
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| v.powi(3) - v + 1e-6 * ((i * 7919 % 101) as f64 / 101.0 - 0.5))
            .collect();
        let res = optimum_polyfit(&x, &y, &PolyfitOptions::default()).unwrap();
        assert!(res.degree >= 3);
        assert!(res.score < 1e-5);
        let linear = polyfit(&x, &y, 1).unwrap();
        assert!(linear.max_abs_residual(&x, &y) > res.score);
    }

    #[test]
    fn test_degree_capped_by_sample_count() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 0.0, 1.0];
        let res = optimum_polyfit(&x, &y, &PolyfitOptions::default()).unwrap();
        assert!(res.degree <= 2);
        assert!(res.score < 1e-9);
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let x = grid(10, 0.0, 9.0);
        let mut y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        y[3] = f64::NAN;
        assert!(matches!(
            optimum_polyfit(&x, &y, &PolyfitOptions::default()),
            Err(DspError::InvalidConfig(_))
        ));
        assert!(polyfit(&x, &y, 1).is_err());

        let mut x_inf = x.clone();
        x_inf[0] = f64::INFINITY;
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        assert!(optimum_polyfit(&x_inf, &y, &PolyfitOptions::default()).is_err());
    }

    #[test]
    fn test_nan_residual_ranks_last() {
        let p = Polynomial::new(vec![0.0, 1.0]);
        assert!(p.max_abs_residual(&[0.0, 1.0], &[0.0, f64::NAN]).is_nan());
        assert!(p.max_abs_residual(&[0.0, 1.0], &[f64::NAN, 3.0]).is_nan());
        assert!(better_score(1.0, f64::NAN));
        assert!(!better_score(f64::NAN, 1.0));
        assert!(!better_score(2.0, 1.0));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            optimum_polyfit(&[], &[], &PolyfitOptions::default()),
            Err(DspError::InsufficientData { .. })
        ));
        assert!(matches!(
            optimum_polyfit(&[1.0, 2.0], &[1.0], &PolyfitOptions::default()),
            Err(DspError::LengthMismatch { .. })
        ));
        let opts = PolyfitOptions {
            min_degree: 5,
            max_degree: 3,
        };
        assert!(matches!(
            optimum_polyfit(&grid(10, 0.0, 1.0), &[0.0; 10], &opts),
            Err(DspError::InvalidConfig(_))
        ));
    }
}
