//! Lazily evaluated evenly spaced ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An evenly spaced sequence of `size` values from `start` towards `end`.
///
/// Values are computed on access, so a range over millions of timestamps
/// costs four words of memory. With `endpoint == true` the last value is
/// exactly `end`, otherwise `end` is one step past the last value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinRange {
    pub start: f64,
    pub end: f64,
    pub size: usize,
    pub endpoint: bool,
}

impl LinRange {
    pub fn new(start: f64, end: f64, size: usize, endpoint: bool) -> Self {
        Self {
            start,
            end,
            size,
            endpoint,
        }
    }

    /// Range from `start` (inclusive) to `end` (exclusive) in increments of `step`.
    ///
    /// Returns an empty range for a non-positive step or `end <= start`.
    pub fn range(start: f64, end: f64, step: f64) -> Self {
        let size = if step > 0.0 && end > start {
            ((end - start) / step).ceil() as usize
        } else {
            0
        };
        Self::new(start, start + size as f64 * step, size, false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between adjacent values.
    pub fn step(&self) -> f64 {
        let divisor = if self.endpoint {
            self.size.saturating_sub(1)
        } else {
            self.size
        };
        if divisor == 0 {
            0.0
        } else {
            (self.end - self.start) / divisor as f64
        }
    }

    /// Center between `start` and `end`.
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[inline]
    fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step()
    }

    /// Value at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.size).then(|| self.value(index))
    }

    /// Value `back` positions from the end; `get_from_end(1)` is the last value.
    pub fn get_from_end(&self, back: usize) -> Option<f64> {
        if back == 0 || back > self.size {
            return None;
        }
        self.get(self.size - back)
    }

    /// Sub-range covering `start..end` (`None` means up to the end).
    pub fn view(&self, start: usize, end: Option<usize>) -> Option<LinRange> {
        let end = end.unwrap_or(self.size);
        if start > end || end > self.size {
            return None;
        }
        let step = self.step();
        Some(LinRange::new(
            self.start + start as f64 * step,
            self.start + end as f64 * step,
            end - start,
            false,
        ))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.size).map(move |i| self.value(i))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl fmt::Display for LinRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinRange({:?}, {:?}, {:?})", self.start, self.end, self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linspace(start: f64, end: f64, n: usize, endpoint: bool) -> Vec<f64> {
        let div = (if endpoint { n - 1 } else { n }) as f64;
        (0..n).map(|i| start + (end - start) * i as f64 / div).collect()
    }

    #[test]
    fn test_matches_linspace() {
        for &(start, end, n, endpoint) in &[
            (0.0, 100.0, 101, true),
            (0.0, 100.0, 100, false),
            (-5.0, 7.5, 20, true),
            (1.0, 2.0, 3, false),
        ] {
            let spc = LinRange::new(start, end, n, endpoint);
            let expected = linspace(start, end, n, endpoint);
            assert_eq!(spc.len(), n);
            for (a, b) in spc.iter().zip(&expected) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }

            let (istart, iend) = (n / 3, n / 2);
            let view = spc.view(istart, Some(iend)).unwrap();
            assert_eq!(view.len(), iend - istart);
            for (a, b) in view.iter().zip(&expected[istart..iend]) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }

            assert_relative_eq!(
                spc.get_from_end(istart).unwrap(),
                expected[n - istart],
                epsilon = 1e-12
            );
            assert_eq!(spc.mid(), (start + end) / 2.0);

            let full = spc.view(0, None).unwrap();
            assert_eq!(full.len(), n);
            for (a, b) in full.to_vec().iter().zip(&expected) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_equality() {
        let l1 = LinRange::new(0.0, 100.0, 100, false);
        let l2 = LinRange::new(0.0, 100.0, 100, false);
        let l3 = LinRange::new(0.0, 100.0, 100, true);
        assert_eq!(l1, l2);
        assert_ne!(l1, l3);
    }

    #[test]
    fn test_display() {
        let l = LinRange::new(0.0, 100.0, 100, false);
        assert_eq!(l.to_string(), "LinRange(0.0, 100.0, 1.0)");
    }

    #[test]
    fn test_out_of_bounds() {
        let l = LinRange::new(0.0, 1.0, 5, true);
        assert_eq!(l.get(4), Some(1.0));
        assert_eq!(l.get(5), None);
        assert_eq!(l.get_from_end(0), None);
        assert_eq!(l.get_from_end(6), None);
        assert!(l.view(3, Some(2)).is_none());
        assert!(l.view(0, Some(6)).is_none());
    }

    #[test]
    fn test_range_from_step() {
        let l = LinRange::range(0.0, 10.0, 2.5);
        assert_eq!(l.len(), 4);
        assert_eq!(l.to_vec(), vec![0.0, 2.5, 5.0, 7.5]);

        let l = LinRange::range(0.0, 10.0, 3.0);
        assert_eq!(l.len(), 4);
        assert_relative_eq!(l.get(3).unwrap(), 9.0);

        assert!(LinRange::range(1.0, 0.0, 1.0).is_empty());
    }
}
