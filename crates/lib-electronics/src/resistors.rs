//! Resistor networks and standard E-series values.

use crate::error::{ElectronicsError, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::Ohms;

/// E96 series (1 % tolerance), one decade.
pub const E96: &[f64] = &[
    1.00, 1.02, 1.05, 1.07, 1.10, 1.13, 1.15, 1.18, 1.21, 1.24, 1.27, 1.30, 1.33, 1.37, 1.40,
    1.43, 1.47, 1.50, 1.54, 1.58, 1.62, 1.65, 1.69, 1.74, 1.78, 1.82, 1.87, 1.91, 1.96, 2.00,
    2.05, 2.10, 2.15, 2.21, 2.26, 2.32, 2.37, 2.43, 2.49, 2.55, 2.61, 2.67, 2.74, 2.80, 2.87,
    2.94, 3.01, 3.09, 3.16, 3.24, 3.32, 3.40, 3.48, 3.57, 3.65, 3.74, 3.83, 3.92, 4.02, 4.12,
    4.22, 4.32, 4.42, 4.53, 4.64, 4.75, 4.87, 4.99, 5.11, 5.23, 5.36, 5.49, 5.62, 5.76, 5.90,
    6.04, 6.19, 6.34, 6.49, 6.65, 6.81, 6.98, 7.15, 7.32, 7.50, 7.68, 7.87, 8.06, 8.25, 8.45,
    8.66, 8.87, 9.09, 9.31, 9.53, 9.76,
];

/// E48 series (2 % tolerance), one decade.
pub const E48: &[f64] = &[
    1.00, 1.05, 1.10, 1.15, 1.21, 1.27, 1.33, 1.40, 1.47, 1.54, 1.62, 1.69, 1.78, 1.87, 1.96,
    2.05, 2.15, 2.26, 2.37, 2.49, 2.61, 2.74, 2.87, 3.01, 3.16, 3.32, 3.48, 3.65, 3.83, 4.02,
    4.22, 4.42, 4.64, 4.87, 5.11, 5.36, 5.62, 5.90, 6.19, 6.49, 6.81, 7.15, 7.50, 7.87, 8.25,
    8.66, 9.09, 9.53,
];

/// E24 series (5 % tolerance), one decade.
pub const E24: &[f64] = &[
    1.0, 1.1, 1.2, 1.3, 1.5, 1.6, 1.8, 2.0, 2.2, 2.4, 2.7, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 5.1,
    5.6, 6.2, 6.8, 7.5, 8.2, 9.1,
];

/// E12 series (10 % tolerance), one decade.
pub const E12: &[f64] = &[1.0, 1.2, 1.5, 1.8, 2.2, 2.7, 3.3, 3.9, 4.7, 5.6, 6.8, 8.2];

/// Resistance of two resistors in parallel.
///
/// An infinite resistor (an open circuit) leaves the other one unchanged,
/// and a zero resistor shorts the combination.
pub fn parallel_resistors(r1: impl NumericInput, r2: impl NumericInput) -> ElectronicsResult<Ohms> {
    parallel_resistors_all([r1.to_numeric()?, r2.to_numeric()?])
}

/// Resistance of any number of resistors in parallel.
pub fn parallel_resistors_all<I>(resistors: I) -> ElectronicsResult<Ohms>
where
    I: IntoIterator,
    I::Item: NumericInput,
{
    let mut conductance = 0.0;
    let mut count = 0usize;
    for r in resistors {
        let r = r.to_numeric()?;
        if r < 0.0 {
            return Err(ElectronicsError::invalid_value(
                "resistor",
                format!("negative resistance {r} Ω"),
            ));
        }
        // 1/inf == 0, 1/0 == inf
        conductance += 1.0 / r;
        count += 1;
    }
    if count == 0 {
        return Err(ElectronicsError::invalid_value("resistors", "no resistors given"));
    }
    Ok(Ohms(1.0 / conductance))
}

/// Resistance of two resistors in series.
pub fn series_resistors(r1: impl NumericInput, r2: impl NumericInput) -> ElectronicsResult<Ohms> {
    series_resistors_all([r1.to_numeric()?, r2.to_numeric()?])
}

/// Resistance of any number of resistors in series.
pub fn series_resistors_all<I>(resistors: I) -> ElectronicsResult<Ohms>
where
    I: IntoIterator,
    I::Item: NumericInput,
{
    resistors
        .into_iter()
        .try_fold(0.0, |acc, r| -> ElectronicsResult<f64> {
            Ok(acc + r.to_numeric()?)
        })
        .map(Ohms)
}

/// Every standard value of `sequence` from `10^min_exp` up to the decade
/// starting at `10^(max_exp - 1)`.
pub fn standard_resistors(min_exp: i32, max_exp: i32, sequence: &[f64]) -> Vec<Ohms> {
    (min_exp..max_exp)
        .flat_map(|exp| {
            let multiplier = 10f64.powi(exp);
            sequence.iter().map(move |v| Ohms(v * multiplier))
        })
        .collect()
}

/// Standard resistor from `sequence` closest to `value`, between 100 mΩ and 976 MΩ.
pub fn nearest_resistor(value: impl NumericInput, sequence: &[f64]) -> ElectronicsResult<Ohms> {
    let value = value.to_numeric()?;
    standard_resistors(-1, 9, sequence)
        .into_iter()
        .min_by(|a, b| (value - a.0).abs().total_cmp(&(value - b.0).abs()))
        .ok_or_else(|| ElectronicsError::invalid_value("sequence", "empty E-series"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parallel_resistors() {
        assert_relative_eq!(parallel_resistors(1000.0, 1000.0).unwrap().0, 500.0);
        assert_relative_eq!(parallel_resistors("1kΩ", "1kΩ").unwrap().0, 500.0);
        assert_relative_eq!(
            parallel_resistors_all([1000.0, 1000.0, 500.0]).unwrap().0,
            250.0
        );
    }

    #[test]
    fn test_parallel_with_open_and_short() {
        assert_eq!(parallel_resistors(1000.0, f64::INFINITY).unwrap(), Ohms(1000.0));
        assert_eq!(parallel_resistors(1000.0, 0.0).unwrap(), Ohms(0.0));
        assert!(parallel_resistors(1000.0, -1.0).is_err());
        assert!(parallel_resistors_all(Vec::<f64>::new()).is_err());
    }

    #[test]
    fn test_series_resistors() {
        assert_relative_eq!(series_resistors(1000.0, 1000.0).unwrap().0, 2000.0);
        assert_relative_eq!(series_resistors("1kΩ", "1kΩ").unwrap().0, 2000.0);
        assert_relative_eq!(
            series_resistors_all(["1k", "1k", "500"]).unwrap().0,
            2500.0
        );
    }

    #[test]
    fn test_standard_resistors() {
        let values = standard_resistors(-1, 9, E96);
        assert!(values.len() > 500);
        assert_relative_eq!(values[0].0, 0.1);
    }

    #[test]
    fn test_nearest_resistor() {
        assert_relative_eq!(nearest_resistor(5000.0, E48).unwrap().0, 5110.0, epsilon = 1e-6);
        assert_relative_eq!(nearest_resistor("4.998k", E96).unwrap().0, 4990.0, epsilon = 1e-6);
        assert!(nearest_resistor(1.0, &[]).is_err());
    }
}
