//! Resonant circuits.

use crate::error::{require_positive, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::{Ohms, Ratio};

/// Quality factor assumed by [`resonant_impedance_default`].
pub const DEFAULT_QUALITY_FACTOR: f64 = 100.0;

/// Quality factor of a resonator from its center frequency and bandwidth.
pub fn quality_factor(
    frequency: impl NumericInput,
    bandwidth: impl NumericInput,
) -> ElectronicsResult<Ratio> {
    let frequency = frequency.to_numeric()?;
    let bandwidth = require_positive("bandwidth", bandwidth.to_numeric()?)?;
    Ok(Ratio(frequency / bandwidth))
}

/// Impedance of an LC tank at resonance: `sqrt(L / C) / Q`.
pub fn resonant_impedance(
    inductance: impl NumericInput,
    capacitance: impl NumericInput,
    q: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let l = inductance.to_numeric()?;
    let c = require_positive("capacitance", capacitance.to_numeric()?)?;
    let q = require_positive("q", q.to_numeric()?)?;
    Ok(Ohms((l / c).sqrt() / q))
}

/// [`resonant_impedance`] with `Q = 100`.
pub fn resonant_impedance_default(
    inductance: impl NumericInput,
    capacitance: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    resonant_impedance(inductance, capacitance, DEFAULT_QUALITY_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lib_engio::auto_format;

    #[test]
    fn test_quality_factor() {
        assert_relative_eq!(quality_factor("8.000 MHz", "1 kHz").unwrap().0, 8000.0);
        assert_relative_eq!(quality_factor("8.000 MHz", "1 MHz").unwrap().0, 8.0);
        assert!(quality_factor("8 MHz", 0.0).is_err());
    }

    #[test]
    fn test_resonant_impedance() {
        let z = resonant_impedance("100 uH", "10 nF", 30.0).unwrap();
        assert_relative_eq!(z.0, 10.0 / 3.0, epsilon = 1e-9);
        assert_eq!(auto_format(z).unwrap(), "3.33 Ω");

        let z = resonant_impedance_default("100 uH", "10 nF").unwrap();
        assert_relative_eq!(z.0, 1.0, epsilon = 1e-9);
    }
}
