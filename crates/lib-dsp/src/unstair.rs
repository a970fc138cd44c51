//! Compression of step functions.
//!
//! Quantized signals (ADC readings, rounded sensor values) contain long runs
//! of equal samples. [`unstair`] removes the redundant samples of each run
//! while always keeping the first and last sample of the signal.

use crate::error::{check_same_len, DspError, DspResult};
use crate::selection::find_true_runs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which sample(s) of each stair run are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnstairMethod {
    /// The first sample of each stair.
    #[default]
    Left,
    /// The sample in the middle of each stair.
    Middle,
    /// The last sample of each stair.
    Right,
    /// The first and last sample of each stair, so the function itself is unchanged.
    Reduce,
}

impl fmt::Display for UnstairMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::Reduce => "reduce",
        };
        f.write_str(name)
    }
}

impl FromStr for UnstairMethod {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            "reduce" => Ok(Self::Reduce),
            other => Err(DspError::InvalidConfig(format!(
                "unknown unstair method '{other}' (expected left, middle, right or reduce)"
            ))),
        }
    }
}

/// Default threshold below which two adjacent samples count as equal.
pub const DEFAULT_UNSTAIR_TOLERANCE: f64 = 1e-9;

/// Indices of the samples [`unstair`] keeps, sorted and unique.
pub fn unstair_indices(y: &[f64], method: UnstairMethod, tolerance: f64) -> DspResult<Vec<usize>> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(DspError::InvalidConfig(format!(
            "unstair tolerance must be non-negative, got {tolerance}"
        )));
    }
    let n = y.len();
    if n < 2 {
        return Ok((0..n).collect());
    }

    // stairs[i] compares y[i] and y[i + 1]
    let stairs: Vec<bool> = y.windows(2).map(|w| (w[1] - w[0]).abs() < tolerance).collect();
    let runs = find_true_runs(&stairs);

    let mut keep: BTreeSet<usize> = stairs
        .iter()
        .enumerate()
        .filter(|(_, &stair)| !stair)
        .map(|(i, _)| i + 1)
        .collect();
    keep.insert(0);
    keep.insert(n - 1);

    match method {
        UnstairMethod::Left => keep.extend(runs.iter().map(|&(start, _)| start)),
        UnstairMethod::Reduce => keep.extend(runs.iter().flat_map(|&(start, end)| [start, end])),
        UnstairMethod::Right | UnstairMethod::Middle => {
            let picked = runs.iter().map(|&(start, end)| match method {
                UnstairMethod::Right => end,
                _ => (start + end) / 2,
            });
            keep.extend(picked);
            for &(start, _) in &runs {
                keep.remove(&start);
            }
            keep.insert(0);
            keep.insert(n - 1);
        }
    }

    debug!(
        input = n,
        kept = keep.len(),
        stairs = runs.len(),
        %method,
        "unstair"
    );
    Ok(keep.into_iter().collect())
}

/// Remove stairs (runs of adjacent equal values) from a sampled function.
///
/// Two adjacent samples are part of a stair if their `y` values differ by
/// less than `tolerance`. The first and last samples are always kept. Inputs
/// with fewer than two samples are returned unchanged.
///
/// ```
/// use lib_dsp::unstair::{unstair, UnstairMethod};
///
/// let y = [0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0];
/// let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
/// let (xs, _) = unstair(&x, &y, UnstairMethod::Left, 1e-9).unwrap();
/// assert_eq!(xs, vec![0.0, 3.0, 4.0, 7.0, 8.0, 9.0, 10.0]);
/// ```
pub fn unstair(
    x: &[f64],
    y: &[f64],
    method: UnstairMethod,
    tolerance: f64,
) -> DspResult<(Vec<f64>, Vec<f64>)> {
    check_same_len(x, y)?;
    let idxs = unstair_indices(y, method, tolerance)?;
    Ok((
        idxs.iter().map(|&i| x[i]).collect(),
        idxs.iter().map(|&i| y[i]).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: [f64; 11] = [0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0];
    const ALL: [UnstairMethod; 4] = [
        UnstairMethod::Left,
        UnstairMethod::Middle,
        UnstairMethod::Right,
        UnstairMethod::Reduce,
    ];

    fn indices(method: UnstairMethod) -> Vec<usize> {
        unstair_indices(&STEPS, method, DEFAULT_UNSTAIR_TOLERANCE).unwrap()
    }

    #[test]
    fn test_no_reduction() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        for method in ALL {
            let (xr, yr) = unstair(&x, &y, method, DEFAULT_UNSTAIR_TOLERANCE).unwrap();
            assert_eq!(xr, x, "{method}");
            assert_eq!(yr, y, "{method}");
        }
    }

    #[test]
    fn test_left() {
        assert_eq!(indices(UnstairMethod::Left), vec![0, 3, 4, 7, 8, 9, 10]);
    }

    #[test]
    fn test_right() {
        assert_eq!(indices(UnstairMethod::Right), vec![0, 2, 3, 6, 7, 8, 10]);
    }

    #[test]
    fn test_middle() {
        assert_eq!(indices(UnstairMethod::Middle), vec![0, 1, 3, 5, 7, 8, 10]);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(indices(UnstairMethod::Reduce), vec![0, 2, 3, 4, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_values_follow_indices() {
        let x: Vec<f64> = (0..STEPS.len()).map(|i| i as f64 * 0.5).collect();
        let (xr, yr) = unstair(&x, &STEPS, UnstairMethod::Right, 1e-9).unwrap();
        assert_eq!(xr, vec![0.0, 1.0, 1.5, 3.0, 3.5, 4.0, 5.0]);
        assert_eq!(yr, vec![0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_rounded_sine_is_reduced() {
        let x: Vec<f64> = (0..1000).map(|i| i as f64 * 0.02).collect();
        let y: Vec<f64> = x.iter().map(|v| (v.sin() * 10.0).round() / 10.0).collect();
        for method in ALL {
            let (xr, yr) = unstair(&x, &y, method, DEFAULT_UNSTAIR_TOLERANCE).unwrap();
            assert!(xr.len() < x.len(), "{method}");
            assert_eq!(xr.len(), yr.len());
            assert_eq!(xr[0], x[0]);
            assert_eq!(xr[xr.len() - 1], x[999]);
        }
    }

    #[test]
    fn test_all_equal() {
        let y = [1.0; 5];
        assert_eq!(unstair_indices(&y, UnstairMethod::Left, 1e-9).unwrap(), vec![0, 4]);
        assert_eq!(unstair_indices(&y, UnstairMethod::Right, 1e-9).unwrap(), vec![0, 4]);
        assert_eq!(unstair_indices(&y, UnstairMethod::Middle, 1e-9).unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn test_short_inputs() {
        let (x, y) = unstair(&[1.0], &[2.0], UnstairMethod::Middle, 1e-9).unwrap();
        assert_eq!((x, y), (vec![1.0], vec![2.0]));
        let (x, _) = unstair(&[], &[], UnstairMethod::Left, 1e-9).unwrap();
        assert!(x.is_empty());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            unstair(&[0.0, 1.0], &[0.0], UnstairMethod::Left, 1e-9),
            Err(DspError::LengthMismatch { expected: 2, actual: 1 })
        ));
        assert!(unstair_indices(&STEPS, UnstairMethod::Left, -1.0).is_err());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("Middle".parse::<UnstairMethod>().unwrap(), UnstairMethod::Middle);
        assert!("diff".parse::<UnstairMethod>().is_err());
        assert_eq!(UnstairMethod::default(), UnstairMethod::Left);
        assert_eq!(UnstairMethod::Reduce.to_string(), "reduce");
    }
}
