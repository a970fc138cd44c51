//! Temperature scales.
//!
//! Temperatures are accepted as plain numbers or strings such as `25 °C`,
//! `298.15 K` or `77 °F`, and are normalized to Kelvin. Plain numbers
//! without a unit are interpreted in degrees Celsius unless another
//! default scale is requested.

use crate::error::{ElectronicsError, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::Kelvin;

/// A temperature scale recognized by [`normalize_temperature`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TemperatureScale {
    #[default]
    Celsius,
    Kelvin,
    Fahrenheit,
}

impl TemperatureScale {
    /// Scale denoted by a unit symbol (without the `°` prefix).
    pub fn from_unit(unit: &str) -> Option<Self> {
        match unit {
            "C" => Some(Self::Celsius),
            "K" => Some(Self::Kelvin),
            "F" => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    /// Convert a value on this scale to Kelvin.
    pub fn to_kelvin(self, value: f64) -> Kelvin {
        match self {
            Self::Celsius => celsius_to_kelvin(value),
            Self::Kelvin => Kelvin(value),
            Self::Fahrenheit => fahrenheit_to_kelvin(value),
        }
    }
}

#[inline]
pub fn celsius_to_kelvin(celsius: f64) -> Kelvin {
    Kelvin::from_celsius(celsius)
}

#[inline]
pub fn fahrenheit_to_kelvin(fahrenheit: f64) -> Kelvin {
    Kelvin::from_fahrenheit(fahrenheit)
}

/// Normalize a temperature to Kelvin, reading unitless values as °C.
pub fn normalize_temperature(t: impl NumericInput) -> ElectronicsResult<Kelvin> {
    normalize_temperature_with_default(t, TemperatureScale::Celsius)
}

/// Normalize a temperature to Kelvin, reading unitless values on `default_scale`.
pub fn normalize_temperature_with_default(
    t: impl NumericInput,
    default_scale: TemperatureScale,
) -> ElectronicsResult<Kelvin> {
    let normalized = t.normalize()?;
    let scale = if normalized.unit.is_empty() {
        default_scale
    } else {
        TemperatureScale::from_unit(&normalized.unit)
            .ok_or_else(|| ElectronicsError::InvalidTemperatureUnit(normalized.unit.clone()))?
    };

    let kelvin = scale.to_kelvin(normalized.value);
    if kelvin.0 < 0.0 {
        return Err(ElectronicsError::BelowAbsoluteZero(kelvin.0));
    }
    Ok(kelvin)
}

/// Normalize a temperature to degrees Celsius.
pub fn normalize_temperature_celsius(t: impl NumericInput) -> ElectronicsResult<f64> {
    Ok(normalize_temperature(t)?.as_celsius())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lib_engio::EngIoError;

    fn kelvin(t: impl NumericInput) -> f64 {
        normalize_temperature(t).unwrap().0
    }

    #[test]
    fn test_plain_numbers_are_celsius() {
        assert_relative_eq!(kelvin("0"), 273.15);
        assert_relative_eq!(kelvin("1"), 274.15);
        assert_relative_eq!(kelvin(1.0), 274.15);
        let k = normalize_temperature_with_default(1.0, TemperatureScale::Kelvin).unwrap();
        assert_relative_eq!(k.0, 1.0);
    }

    #[test]
    fn test_with_units() {
        assert_relative_eq!(kelvin("1 C"), 274.15);
        assert_relative_eq!(kelvin("1 °C"), 274.15);
        assert_relative_eq!(kelvin("1°C"), 274.15);
        assert_relative_eq!(kelvin("1 K"), 1.0);
        assert_relative_eq!(kelvin("60 F"), 288.7055, max_relative = 1e-6);
        assert_relative_eq!(kelvin(Kelvin(300.0)), 300.0);
    }

    #[test]
    fn test_signs() {
        assert_relative_eq!(kelvin("-1°C"), 272.15, epsilon = 1e-9);
        assert_relative_eq!(kelvin("-200°C"), 73.15, epsilon = 1e-9);
    }

    #[test]
    fn test_celsius() {
        let celsius = |t: &str| normalize_temperature_celsius(t).unwrap();
        assert_relative_eq!(celsius("-200°C"), -200.0, epsilon = 1e-9);
        assert_relative_eq!(celsius("273.15 °K"), 0.0, epsilon = 1e-9);
        assert_relative_eq!(celsius("0 °K"), -273.15, epsilon = 1e-9);
    }

    #[test]
    fn test_wrong_unit() {
        assert_eq!(
            normalize_temperature("150V"),
            Err(ElectronicsError::InvalidTemperatureUnit("V".to_string()))
        );
    }

    #[test]
    fn test_invalid_value() {
        let err = normalize_temperature("150°G").unwrap_err();
        assert!(matches!(err, ElectronicsError::Input(EngIoError::InvalidFormat { .. })));
    }

    #[test]
    fn test_below_absolute_zero() {
        assert!(matches!(
            normalize_temperature("-300 °C"),
            Err(ElectronicsError::BelowAbsoluteZero(_))
        ));
    }
}
