//! Weight distribution of sample windows.

/// Sum of the left and right half of `values`.
///
/// For odd lengths, half of the middle element counts towards each side.
/// Used to center the weight of sliding windows.
pub fn weigh_halves(values: &[f64]) -> (f64, f64) {
    weigh_halves_with(values, |half| half.iter().sum())
}

/// Like [`weigh_halves`] but summarizes each half with `op`.
pub fn weigh_halves_with<F>(values: &[f64], op: F) -> (f64, f64)
where
    F: Fn(&[f64]) -> f64,
{
    let pivot = values.len() / 2;
    if values.len() % 2 == 0 {
        (op(&values[..pivot]), op(&values[pivot..]))
    } else {
        let middle = values[pivot] / 2.0;
        (op(&values[..pivot]) + middle, op(&values[pivot + 1..]) + middle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weigh_halves() {
        assert_eq!(weigh_halves(&[]), (0.0, 0.0));
        assert_eq!(weigh_halves(&[0.0, 1.0, 2.0, 3.0]), (1.0, 5.0));
        assert_eq!(weigh_halves(&[0.0, 1.0, 2.0, 3.0, 4.0]), (2.0, 8.0));
    }

    #[test]
    fn test_custom_operator() {
        let max = |half: &[f64]| half.iter().copied().fold(0.0, f64::max);
        assert_eq!(weigh_halves_with(&[1.0, 5.0, 2.0, 4.0], max), (5.0, 4.0));
    }
}
