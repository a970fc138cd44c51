//! Values that can be supplied either as numbers or as engineering strings.

use crate::engineer_io::{EngineerIo, NormalizedValue};
use crate::error::EngIoResult;
use lib_types::units::{
    Amperes, Coulombs, Farads, Henries, Hertz, Joules, Kelvin, NoiseDensity, Ohms, Ratio, Seconds,
    Volts, Watts,
};
use lib_types::Quantity;

/// A numeric argument: a plain number, a typed quantity or an engineering string.
///
/// ```
/// use lib_engio::NumericInput;
/// assert_eq!("2.2 kΩ".to_numeric().unwrap(), 2200.0);
/// assert_eq!(3.0_f64.to_numeric().unwrap(), 3.0);
/// ```
pub trait NumericInput {
    /// Resolve to a value in base units plus the unit it carried, if any.
    fn normalize_with(&self, io: &EngineerIo) -> EngIoResult<NormalizedValue>;

    /// Resolve with the shared default [`EngineerIo`].
    fn normalize(&self) -> EngIoResult<NormalizedValue> {
        self.normalize_with(EngineerIo::instance())
    }

    /// Resolve to a plain number with the shared default [`EngineerIo`].
    fn to_numeric(&self) -> EngIoResult<f64> {
        self.normalize().map(|v| v.value)
    }
}

fn unitless(value: f64) -> NormalizedValue {
    NormalizedValue {
        value,
        unit: String::new(),
    }
}

macro_rules! numeric_input_for_primitive {
    ($($t:ty),*) => {
        $(
            impl NumericInput for $t {
                fn normalize_with(&self, _io: &EngineerIo) -> EngIoResult<NormalizedValue> {
                    Ok(unitless(*self as f64))
                }
            }
        )*
    };
}

numeric_input_for_primitive!(f64, f32, i32, i64, u32, u64, usize);

macro_rules! numeric_input_for_quantity {
    ($($t:ty),*) => {
        $(
            impl NumericInput for $t {
                fn normalize_with(&self, _io: &EngineerIo) -> EngIoResult<NormalizedValue> {
                    Ok(NormalizedValue {
                        value: self.value(),
                        unit: <$t as Quantity>::UNIT.to_string(),
                    })
                }
            }
        )*
    };
}

numeric_input_for_quantity!(
    Seconds, Hertz, Volts, Amperes, Ohms, Farads, Henries, Watts, Joules, Coulombs, Kelvin, Ratio,
    NoiseDensity
);

impl NumericInput for str {
    fn normalize_with(&self, io: &EngineerIo) -> EngIoResult<NormalizedValue> {
        io.normalize(self)
    }
}

impl NumericInput for String {
    fn normalize_with(&self, io: &EngineerIo) -> EngIoResult<NormalizedValue> {
        io.normalize(self)
    }
}

impl<T: NumericInput + ?Sized> NumericInput for &T {
    fn normalize_with(&self, io: &EngineerIo) -> EngIoResult<NormalizedValue> {
        (**self).normalize_with(io)
    }
}

/// Resolve any [`NumericInput`] to a plain number.
pub fn normalize_numeric(value: impl NumericInput) -> EngIoResult<f64> {
    value.to_numeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngIoError;

    #[test]
    fn test_primitives_pass_through() {
        assert_eq!(normalize_numeric(1.5).unwrap(), 1.5);
        assert_eq!(normalize_numeric(42).unwrap(), 42.0);
        assert_eq!(normalize_numeric(7usize).unwrap(), 7.0);
        assert_eq!(1.5f64.normalize().unwrap().unit, "");
    }

    #[test]
    fn test_strings_are_parsed() {
        assert_eq!(normalize_numeric("6 pF").unwrap(), 6.0 / 1e12);
        assert_eq!(normalize_numeric(String::from("100 mV")).unwrap(), 100.0 / 1e3);

        let owned = String::from("2 kHz");
        assert_eq!(normalize_numeric(&owned).unwrap(), 2000.0);
    }

    #[test]
    fn test_quantities_carry_unit() {
        let v = Farads::from_pf(3.0).normalize().unwrap();
        assert_eq!(v.unit, "F");
        assert!((v.value - 3e-12).abs() < 1e-24);
    }

    #[test]
    fn test_invalid_string_errors() {
        assert!(matches!(
            normalize_numeric("abc"),
            Err(EngIoError::InvalidFormat { .. })
        ));
    }
}
