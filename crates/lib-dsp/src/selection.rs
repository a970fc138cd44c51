//! Selecting runs, ranges and extrema in sampled data.
//!
//! All ranges are half-open `(start, end)` index pairs.

use crate::error::{check_same_len, DspResult};
use std::cmp::Ordering;

/// Half-open `(start, end)` ranges of consecutive `true` values.
pub fn find_true_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &value) in mask.iter().enumerate() {
        match (value, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, mask.len()));
    }
    runs
}

/// Half-open `(start, end)` ranges of consecutive `false` values.
pub fn find_false_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let inverted: Vec<bool> = mask.iter().map(|v| !v).collect();
    find_true_runs(&inverted)
}

/// Shrink every range by `by` samples on both sides.
///
/// Ranges that would become empty are dropped.
pub fn shrink_ranges(ranges: &[(usize, usize)], by: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter_map(|&(start, end)| {
            let start = start + by;
            let end = end.checked_sub(by)?;
            (start < end).then_some((start, end))
        })
        .collect()
}

/// Index of the largest value inside each range.
///
/// Empty ranges and ranges outside `values` are skipped.
pub fn range_maxima(ranges: &[(usize, usize)], values: &[f64]) -> Vec<usize> {
    ranges
        .iter()
        .filter_map(|&(start, end)| {
            let end = end.min(values.len());
            (start..end).max_by(|&a, &b| values[a].total_cmp(&values[b]).then(b.cmp(&a)))
        })
        .collect()
}

/// Index range `[start, end)` of a sorted array where `low <= x < high`.
///
/// A missing bound leaves that side open.
pub fn frequency_range_indices(x: &[f64], low: Option<f64>, high: Option<f64>) -> (usize, usize) {
    let start = low.map_or(0, |low| x.partition_point(|&v| v < low));
    let end = high.map_or(x.len(), |high| x.partition_point(|&v| v < high));
    (start, end.max(start))
}

/// Select the part of an `(x, y)` dataset where `low <= x < high`.
///
/// `x` must be sorted in ascending order, as FFT frequencies are.
pub fn select_frequency_range<'a>(
    x: &'a [f64],
    y: &'a [f64],
    low: Option<f64>,
    high: Option<f64>,
) -> DspResult<(&'a [f64], &'a [f64])> {
    check_same_len(x, y)?;
    let (start, end) = frequency_range_indices(x, low, high);
    Ok((&x[start..end], &y[start..end]))
}

/// Index of the value closest to `value` in a sorted array.
///
/// On a tie the lower index wins. Returns `None` for an empty array.
pub fn find_closest_index(sorted: &[f64], value: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }
    let idx = sorted.partition_point(|&v| v < value);
    if idx == 0 {
        return Some(0);
    }
    if idx == sorted.len() {
        return Some(sorted.len() - 1);
    }
    let below = value - sorted[idx - 1];
    let above = sorted[idx] - value;
    Some(if below <= above { idx - 1 } else { idx })
}

/// Kind of extremum searched by [`find_sorted_extrema`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    Maxima,
    Minima,
}

/// Strict local extrema of `y` as `(x, y)` pairs, most pronounced first.
///
/// A sample is an extremum if it is strictly greater (or less) than both
/// neighbours. The first and last samples are never reported.
pub fn find_sorted_extrema(x: &[f64], y: &[f64], kind: Extremum) -> DspResult<Vec<(f64, f64)>> {
    check_same_len(x, y)?;
    let wanted = match kind {
        Extremum::Maxima => Ordering::Greater,
        Extremum::Minima => Ordering::Less,
    };

    let mut extrema: Vec<(f64, f64)> = y
        .windows(3)
        .enumerate()
        .filter(|(_, w)| {
            w[1].partial_cmp(&w[0]) == Some(wanted) && w[1].partial_cmp(&w[2]) == Some(wanted)
        })
        .map(|(i, w)| (x[i + 1], w[1]))
        .collect();

    extrema.sort_by(|a, b| match kind {
        Extremum::Maxima => b.1.total_cmp(&a.1),
        Extremum::Minima => a.1.total_cmp(&b.1),
    });
    Ok(extrema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(len: usize, ranges: &[(usize, usize)]) -> Vec<bool> {
        let mut m = vec![false; len];
        for &(s, e) in ranges {
            m[s..e].iter_mut().for_each(|v| *v = true);
        }
        m
    }

    #[test]
    fn test_find_true_runs() {
        let m = mask(25, &[(4, 9), (14, 21)]);
        assert_eq!(find_true_runs(&m), vec![(4, 9), (14, 21)]);
    }

    #[test]
    fn test_find_true_runs_edges() {
        let m = mask(25, &[(0, 9), (14, 25)]);
        assert_eq!(find_true_runs(&m), vec![(0, 9), (14, 25)]);
        assert!(find_true_runs(&[false; 25]).is_empty());
        assert!(find_true_runs(&[]).is_empty());
    }

    #[test]
    fn test_find_false_runs() {
        let m = mask(10, &[(2, 4)]);
        assert_eq!(find_false_runs(&m), vec![(0, 2), (4, 10)]);
    }

    #[test]
    fn test_shrink_ranges() {
        let ranges = [(4, 9), (14, 16), (20, 21)];
        assert_eq!(shrink_ranges(&ranges, 1), vec![(5, 8)]);
        assert_eq!(shrink_ranges(&ranges, 0), ranges.to_vec());
    }

    #[test]
    fn test_range_maxima() {
        let mut x = vec![0.0; 25];
        x[4..9].iter_mut().for_each(|v| *v = 1.0);
        x[5] = 2.0;
        x[14..21].iter_mut().for_each(|v| *v = 1.0);
        x[20] = 3.0;
        x[22] = 4.0;
        let runs = find_true_runs(&x.iter().map(|&v| v > 0.5).collect::<Vec<_>>());
        assert_eq!(range_maxima(&runs, &x), vec![5, 20, 22]);
    }

    #[test]
    fn test_select_frequency_range() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v + 1.0).collect();
        let (sx, sy) = select_frequency_range(&x, &y, Some(1.0), Some(5.5)).unwrap();
        assert_eq!(sx, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(sy, &[2.0, 3.0, 4.0, 5.0, 6.0]);

        let (sx, _) = select_frequency_range(&x, &y, None, Some(2.0)).unwrap();
        assert_eq!(sx, &[0.0, 1.0]);
        assert!(select_frequency_range(&x, &y[..3], None, None).is_err());
    }

    #[test]
    fn test_find_closest_index() {
        let x = [0.0, 1.0, 2.0, 4.0];
        assert_eq!(find_closest_index(&x, -3.0), Some(0));
        assert_eq!(find_closest_index(&x, 1.4), Some(1));
        assert_eq!(find_closest_index(&x, 1.5), Some(1));
        assert_eq!(find_closest_index(&x, 3.1), Some(3));
        assert_eq!(find_closest_index(&x, 10.0), Some(3));
        assert_eq!(find_closest_index(&[], 1.0), None);
    }

    #[test]
    fn test_find_sorted_extrema() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let mut y = vec![0.0; 10];
        y[2] = 1.0;
        y[6] = 5.0;
        assert_eq!(
            find_sorted_extrema(&x, &y, Extremum::Maxima).unwrap(),
            vec![(6.0, 5.0), (2.0, 1.0)]
        );

        let neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert_eq!(
            find_sorted_extrema(&x, &neg, Extremum::Minima).unwrap(),
            vec![(6.0, -5.0), (2.0, -1.0)]
        );
    }
}
