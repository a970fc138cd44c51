//! Reactance of ideal capacitors and inductors.

use crate::error::{require_positive, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::Ohms;
use std::f64::consts::PI;

/// Reactance of a capacitor at `frequency`: `1 / (2π f C)`.
pub fn capacitive_reactance(
    capacitance: impl NumericInput,
    frequency: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let c = require_positive("capacitance", capacitance.to_numeric()?)?;
    let f = require_positive("frequency", frequency.to_numeric()?)?;
    Ok(Ohms(1.0 / (2.0 * PI * f * c)))
}

/// Reactance of an inductor at `frequency`: `2π f L`.
pub fn inductive_reactance(
    inductance: impl NumericInput,
    frequency: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let l = inductance.to_numeric()?;
    let f = frequency.to_numeric()?;
    Ok(Ohms(2.0 * PI * f * l))
}
