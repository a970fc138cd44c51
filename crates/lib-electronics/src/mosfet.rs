//! MOSFET switching losses.

use crate::error::ElectronicsResult;
use lib_engio::NumericInput;
use lib_types::Watts;

/// Power lost charging and discharging the gate every switching cycle: `Qg V f`.
///
/// For several MOSFETs switched together (synchronous converters) pass the
/// sum of their gate charges.
pub fn mosfet_gate_charge_losses(
    total_gate_charge: impl NumericInput,
    vsupply: impl NumericInput,
    frequency: impl NumericInput,
) -> ElectronicsResult<Watts> {
    let qg = total_gate_charge.to_numeric()?;
    let v = vsupply.to_numeric()?;
    let f = frequency.to_numeric()?;
    Ok(Watts(qg * v * f))
}
