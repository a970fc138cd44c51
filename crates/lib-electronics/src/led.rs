//! LED current limiting.

use crate::error::{require_nonzero, ElectronicsError, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::Ohms;

/// Series resistor that sets the LED current to `current`: `(Vsupply - Vf) / I`.
pub fn led_series_resistor(
    vsupply: impl NumericInput,
    current: impl NumericInput,
    vforward: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let vsupply = vsupply.to_numeric()?;
    let current = require_nonzero("current", current.to_numeric()?)?;
    let vforward = vforward.to_numeric()?;
    if vforward > vsupply {
        return Err(ElectronicsError::invalid_value(
            "vforward",
            format!("forward voltage {vforward} V exceeds the supply voltage {vsupply} V"),
        ));
    }
    Ok(Ohms((vsupply - vforward) / current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_led_series_resistor() {
        assert_relative_eq!(led_series_resistor(12.0, 20e-3, 1.6).unwrap().0, 520.0, epsilon = 1e-9);
        assert_relative_eq!(
            led_series_resistor("12V", "20 mA", "1.6V").unwrap().0,
            520.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_led_series_resistor_errors() {
        assert!(led_series_resistor(5.0, 0.0, 2.0).is_err());
        assert!(led_series_resistor(1.8, 0.01, 2.0).is_err());
    }
}
