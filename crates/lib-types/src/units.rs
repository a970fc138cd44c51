//! Physical units with type safety.
//!
//! These newtypes provide compile-time unit checking to prevent
//! mixing incompatible quantities (e.g., adding Farads to Ohms).
//! Every newtype implements [`Quantity`], which carries the unit symbol
//! used when a value is rendered in engineering notation.

use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Defines a `f64` newtype with arithmetic and a [`Quantity`] impl.
macro_rules! quantity_newtype {
    ($(#[$meta:meta])* $name:ident, $unit:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);
        }

        impl Quantity for $name {
            const UNIT: &'static str = $unit;

            #[inline]
            fn value(&self) -> f64 {
                self.0
            }

            #[inline]
            fn from_value(value: f64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f64 {
            fn from(q: $name) -> f64 {
                q.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if $unit.is_empty() {
                    write!(f, "{}", self.0)
                } else {
                    write!(f, "{} {}", self.0, $unit)
                }
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Div<$name> for $name {
            type Output = f64;
            fn div(self, rhs: $name) -> f64 {
                self.0 / rhs.0
            }
        }
    };
}

quantity_newtype!(
    /// Time duration in seconds.
    Seconds,
    "s"
);

quantity_newtype!(
    /// Frequency in Hertz.
    Hertz,
    "Hz"
);

quantity_newtype!(
    /// Voltage in Volts.
    Volts,
    "V"
);

quantity_newtype!(
    /// Current in Amperes.
    Amperes,
    "A"
);

quantity_newtype!(
    /// Resistance, reactance or impedance magnitude in Ohms.
    Ohms,
    "Ω"
);

quantity_newtype!(
    /// Capacitance in Farads.
    Farads,
    "F"
);

quantity_newtype!(
    /// Inductance in Henries.
    Henries,
    "H"
);

quantity_newtype!(
    /// Power in Watts.
    Watts,
    "W"
);

quantity_newtype!(
    /// Energy in Joules.
    Joules,
    "J"
);

quantity_newtype!(
    /// Electric charge in Coulombs.
    Coulombs,
    "C"
);

quantity_newtype!(
    /// Absolute temperature in Kelvin.
    Kelvin,
    "K"
);

quantity_newtype!(
    /// Voltage noise spectral density in V/√Hz.
    NoiseDensity,
    "V/√Hz"
);

quantity_newtype!(
    /// Dimensionless ratio (division ratios, quality factors).
    Ratio,
    ""
);

impl Seconds {
    pub const MINUTE: Self = Self(60.0);
    pub const HOUR: Self = Self(3600.0);
    pub const DAY: Self = Self(86_400.0);
    /// Julian year (365.25 days).
    pub const YEAR: Self = Self(365.25 * 86_400.0);

    #[inline]
    pub fn from_ns(ns: f64) -> Self {
        Self(ns * 1e-9)
    }

    #[inline]
    pub fn from_us(us: f64) -> Self {
        Self(us * 1e-6)
    }

    #[inline]
    pub fn from_ms(ms: f64) -> Self {
        Self(ms * 1e-3)
    }

    #[inline]
    pub fn from_days(days: f64) -> Self {
        Self(days * Self::DAY.0)
    }

    #[inline]
    pub fn as_ms(&self) -> f64 {
        self.0 * 1e3
    }

    #[inline]
    pub fn as_us(&self) -> f64 {
        self.0 * 1e6
    }

    /// Convert to frequency (reciprocal).
    #[inline]
    pub fn to_frequency(&self) -> Hertz {
        Hertz(1.0 / self.0)
    }
}

impl Hertz {
    #[inline]
    pub fn from_khz(khz: f64) -> Self {
        Self(khz * 1e3)
    }

    #[inline]
    pub fn from_mhz(mhz: f64) -> Self {
        Self(mhz * 1e6)
    }

    #[inline]
    pub fn as_khz(&self) -> f64 {
        self.0 * 1e-3
    }

    #[inline]
    pub fn as_mhz(&self) -> f64 {
        self.0 * 1e-6
    }

    /// Convert to period (reciprocal).
    #[inline]
    pub fn to_period(&self) -> Seconds {
        Seconds(1.0 / self.0)
    }

    /// Angular frequency (omega = 2 * pi * f).
    #[inline]
    pub fn angular(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.0
    }
}

impl Volts {
    #[inline]
    pub fn from_mv(mv: f64) -> Self {
        Self(mv * 1e-3)
    }

    #[inline]
    pub fn as_mv(&self) -> f64 {
        self.0 * 1e3
    }
}

impl Ohms {
    #[inline]
    pub fn from_kohm(kohm: f64) -> Self {
        Self(kohm * 1e3)
    }

    /// Conductance in Siemens.
    #[inline]
    pub fn conductance(&self) -> f64 {
        1.0 / self.0
    }
}

impl Farads {
    #[inline]
    pub fn from_pf(pf: f64) -> Self {
        Self(pf * 1e-12)
    }

    #[inline]
    pub fn from_nf(nf: f64) -> Self {
        Self(nf * 1e-9)
    }

    #[inline]
    pub fn from_uf(uf: f64) -> Self {
        Self(uf * 1e-6)
    }

    #[inline]
    pub fn as_pf(&self) -> f64 {
        self.0 * 1e12
    }
}

impl Henries {
    #[inline]
    pub fn from_uh(uh: f64) -> Self {
        Self(uh * 1e-6)
    }
}

impl Kelvin {
    /// 0 °C expressed in Kelvin.
    pub const ZERO_CELSIUS: Self = Self(273.15);

    #[inline]
    pub fn from_celsius(c: f64) -> Self {
        Self(c + Self::ZERO_CELSIUS.0)
    }

    #[inline]
    pub fn from_fahrenheit(f: f64) -> Self {
        Self((f + 459.67) * 5.0 / 9.0)
    }

    #[inline]
    pub fn as_celsius(&self) -> f64 {
        self.0 - Self::ZERO_CELSIUS.0
    }
}

impl Ratio {
    pub const UNITY: Self = Self(1.0);
}

impl Mul<Seconds> for Hertz {
    type Output = f64;
    fn mul(self, rhs: Seconds) -> f64 {
        self.0 * rhs.0
    }
}

impl Mul<Ohms> for Amperes {
    type Output = Volts;
    fn mul(self, rhs: Ohms) -> Volts {
        Volts(self.0 * rhs.0)
    }
}

impl Mul<Volts> for Farads {
    type Output = Coulombs;
    fn mul(self, rhs: Volts) -> Coulombs {
        Coulombs(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_period_reciprocal() {
        let freq = Hertz::from_mhz(16.0);
        let period = freq.to_period();

        assert!((period.as_us() - 0.0625).abs() < 1e-12);
        assert!((period.to_frequency().0 - freq.0).abs() < 1e-6);
    }

    #[test]
    fn test_temperature_scales() {
        assert!((Kelvin::from_celsius(25.0).0 - 298.15).abs() < 1e-12);
        assert!((Kelvin::from_fahrenheit(32.0).0 - 273.15).abs() < 1e-9);
        assert!((Kelvin(300.0).as_celsius() - 26.85).abs() < 1e-9);
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Farads::UNIT, "F");
        assert_eq!(Ohms::UNIT, "Ω");
        assert_eq!(Ratio::UNIT, "");
        assert_eq!(NoiseDensity::UNIT, "V/√Hz");
        assert_eq!(Farads::from_pf(5.0).to_string(), format!("{} F", 5e-12));
    }

    #[test]
    fn test_cross_unit_products() {
        let v = Amperes(0.5) * Ohms(10.0);
        assert_eq!(v, Volts(5.0));

        let q = Farads::from_uf(10.0) * Volts(5.0);
        assert!((q.0 - 50e-6).abs() < 1e-18);

        let cycles = Hertz(1000.0) * Seconds(2.0);
        assert_eq!(cycles, 2000.0);
    }

    #[test]
    fn test_year_is_julian() {
        assert_eq!(Seconds::YEAR.0, 31_557_600.0);
        assert_eq!(Seconds::from_days(1.0), Seconds::DAY);
    }
}
