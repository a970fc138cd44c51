//! Operational amplifier circuits.

use crate::error::{require_nonzero, require_positive, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::Volts;

/// Output of a non-inverting summing amplifier.
///
/// `v1` connects through `r1` and `v2` through `r2` to the non-inverting
/// input. The inverting input connects through `rfb1` to ground and through
/// `rfb2` to the output.
pub fn summing_amplifier_noninv(
    v1: impl NumericInput,
    v2: impl NumericInput,
    r1: impl NumericInput,
    r2: impl NumericInput,
    rfb1: impl NumericInput,
    rfb2: impl NumericInput,
) -> ElectronicsResult<Volts> {
    let v1 = v1.to_numeric()?;
    let v2 = v2.to_numeric()?;
    let r1 = r1.to_numeric()?;
    let r2 = r2.to_numeric()?;
    let rfb1 = require_nonzero("rfb1", rfb1.to_numeric()?)?;
    let rfb2 = rfb2.to_numeric()?;

    let rsum = require_positive("r1 + r2", r1 + r2)?;
    let gain = 1.0 + rfb2 / rfb1;
    Ok(Volts(gain * (v1 * (r2 / rsum) + v2 * (r1 / rsum))))
}
