//! Decibel conversions for field (amplitude) and power quantities.

use crate::error::{require_positive, ElectronicsResult};
use lib_engio::NumericInput;

/// `20 log10(ratio)`, for voltages, currents and other field quantities.
pub fn ratio_to_db_field(ratio: impl NumericInput) -> ElectronicsResult<f64> {
    let ratio = require_positive("ratio", ratio.to_numeric()?)?;
    Ok(20.0 * ratio.log10())
}

/// `10 log10(ratio)`, for power quantities.
pub fn ratio_to_db_power(ratio: impl NumericInput) -> ElectronicsResult<f64> {
    let ratio = require_positive("ratio", ratio.to_numeric()?)?;
    Ok(10.0 * ratio.log10())
}

/// Level of field quantity `v` relative to the reference `v0`, in dB.
pub fn value_to_db_field(v: impl NumericInput, v0: impl NumericInput) -> ElectronicsResult<f64> {
    let v0 = require_positive("v0", v0.to_numeric()?)?;
    ratio_to_db_field(v.to_numeric()? / v0)
}

/// Level of power quantity `p` relative to the reference `p0`, in dB.
pub fn value_to_db_power(p: impl NumericInput, p0: impl NumericInput) -> ElectronicsResult<f64> {
    let p0 = require_positive("p0", p0.to_numeric()?)?;
    ratio_to_db_power(p.to_numeric()? / p0)
}

/// Inverse of [`ratio_to_db_field`].
pub fn db_field_to_ratio(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Inverse of [`ratio_to_db_power`].
pub fn db_power_to_ratio(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ratio_to_db() {
        assert_relative_eq!(ratio_to_db_field(2.0).unwrap(), 6.0206, epsilon = 1e-4);
        assert_relative_eq!(ratio_to_db_field(1.0).unwrap(), 0.0);
        assert_relative_eq!(ratio_to_db_power(0.5).unwrap(), -3.0103, epsilon = 1e-4);
        assert!(ratio_to_db_field(0.0).is_err());
        assert!(ratio_to_db_power(-1.0).is_err());
    }

    #[test]
    fn test_value_to_db() {
        assert_relative_eq!(value_to_db_field("10 V", "1 V").unwrap(), 20.0, epsilon = 1e-12);
        assert_relative_eq!(value_to_db_power("1 W", "1 mW").unwrap(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse() {
        assert_relative_eq!(db_field_to_ratio(ratio_to_db_field(3.0).unwrap()), 3.0, epsilon = 1e-12);
        assert_relative_eq!(db_power_to_ratio(-10.0), 0.1, epsilon = 1e-12);
    }
}
