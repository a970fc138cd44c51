//! NTC thermistors described by the B-parameter equation.
//!
//! ```text
//! R(T) = R25 * exp(B * (1/T - 1/T25)),  T25 = 298.15 K
//! ```

use crate::error::{require_positive, ElectronicsResult};
use crate::temperature::normalize_temperature;
use lib_engio::NumericInput;
use lib_types::{Kelvin, Ohms};

/// Reference temperature of the nominal resistance (25 °C).
pub const NTC_REFERENCE_TEMPERATURE: Kelvin = Kelvin(298.15);

/// Resistance of an NTC at temperature `t`.
///
/// `r25` is the nominal resistance at 25 °C and `b25` the B constant
/// (`B25/50`, `B25/85`, ...), which may be written with a `K` unit.
pub fn ntc_resistance(
    r25: impl NumericInput,
    b25: impl NumericInput,
    t: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let r25 = r25.to_numeric()?;
    let b25 = b25.to_numeric()?;
    let t = require_positive("temperature", normalize_temperature(t)?.0)?;
    Ok(Ohms(
        r25 * (b25 * (1.0 / t - 1.0 / NTC_REFERENCE_TEMPERATURE.0)).exp(),
    ))
}

/// Temperature at which an NTC has resistance `r`.
pub fn ntc_temperature(
    r25: impl NumericInput,
    b25: impl NumericInput,
    r: impl NumericInput,
) -> ElectronicsResult<Kelvin> {
    let r25 = require_positive("r25", r25.to_numeric()?)?;
    let b25 = require_positive("b25", b25.to_numeric()?)?;
    let r = require_positive("r", r.to_numeric()?)?;
    let inverse = 1.0 / NTC_REFERENCE_TEMPERATURE.0 + (r / r25).ln() / b25;
    Ok(Kelvin(1.0 / require_positive("1/T", inverse)?))
}
