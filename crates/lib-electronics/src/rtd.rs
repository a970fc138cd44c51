//! Platinum RTDs (PT100, PT1000) via the Callendar-Van Dusen equation.
//!
//! ```text
//! R(t) = R0 (1 + A t + B t² + C (t - 100) t³),  t in °C
//! ```
//!
//! The `C` term only applies below 0 °C.

use crate::error::{require_positive, ElectronicsError, ElectronicsResult};
use crate::temperature::{celsius_to_kelvin, normalize_temperature};
use lib_engio::NumericInput;
use lib_types::{Kelvin, Ohms};
use tracing::warn;

/// Callendar-Van Dusen coefficients of a platinum sensor standard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PtCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// ITS-90 coefficients (IEC 60751).
pub const PT_ITS90: PtCoefficients = PtCoefficients {
    a: 3.9083e-3,
    b: -5.7750e-7,
    c: -4.1830e-12,
};

/// IPTS-68 coefficients.
pub const PT_IPTS68: PtCoefficients = PtCoefficients {
    a: 3.90802e-3,
    b: -5.80195e-7,
    c: -4.27350e-12,
};

impl PtCoefficients {
    fn resistance_ratio(&self, celsius: f64) -> f64 {
        let c = if celsius < 0.0 { self.c } else { 0.0 };
        1.0 + self.a * celsius
            + self.b * celsius * celsius
            + c * (celsius - 100.0) * celsius.powi(3)
    }

    fn resistance_ratio_slope(&self, celsius: f64) -> f64 {
        let c = if celsius < 0.0 { self.c } else { 0.0 };
        self.a + 2.0 * self.b * celsius + c * (4.0 * celsius.powi(3) - 300.0 * celsius * celsius)
    }
}

/// Resistance of a platinum RTD with nominal resistance `r0` at temperature `t`.
pub fn ptx_resistance(
    r0: impl NumericInput,
    t: impl NumericInput,
    standard: &PtCoefficients,
) -> ElectronicsResult<Ohms> {
    let r0 = r0.to_numeric()?;
    let celsius = normalize_temperature(t)?.as_celsius();
    Ok(Ohms(r0 * standard.resistance_ratio(celsius)))
}

/// Temperature of a platinum RTD with nominal resistance `r0` reading `r`.
///
/// Above 0 °C the quadratic is solved directly. Below, the quadratic
/// solution seeds a Newton iteration on the full equation.
pub fn ptx_temperature(
    r0: impl NumericInput,
    r: impl NumericInput,
    standard: &PtCoefficients,
) -> ElectronicsResult<Kelvin> {
    let r0 = require_positive("r0", r0.to_numeric()?)?;
    let r = require_positive("r", r.to_numeric()?)?;
    let ratio = r / r0;

    let (a, b) = (standard.a, standard.b);
    let discriminant = a * a - 4.0 * b * (1.0 - ratio);
    if discriminant < 0.0 {
        return Err(ElectronicsError::invalid_value(
            "r",
            format!("{r} Ω is outside the range of the sensor"),
        ));
    }
    let mut t = (-a + discriminant.sqrt()) / (2.0 * b);

    if t < 0.0 {
        const MAX_ITERATIONS: usize = 50;
        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let step = (standard.resistance_ratio(t) - ratio) / standard.resistance_ratio_slope(t);
            t -= step;
            if step.abs() < 1e-9 {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(r, r0, t, "RTD temperature did not converge");
        }
    }
    Ok(celsius_to_kelvin(t))
}

pub fn pt100_resistance(t: impl NumericInput) -> ElectronicsResult<Ohms> {
    ptx_resistance(100.0, t, &PT_ITS90)
}

pub fn pt1000_resistance(t: impl NumericInput) -> ElectronicsResult<Ohms> {
    ptx_resistance(1000.0, t, &PT_ITS90)
}

pub fn pt100_temperature(r: impl NumericInput) -> ElectronicsResult<Kelvin> {
    ptx_temperature(100.0, r, &PT_ITS90)
}

pub fn pt1000_temperature(r: impl NumericInput) -> ElectronicsResult<Kelvin> {
    ptx_temperature(1000.0, r, &PT_ITS90)
}
