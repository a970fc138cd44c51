//! Voltage dividers and regulator feedback networks.
//!
//! `r1` (or `rtop`) is always the resistor between the input and the
//! output node, `r2` (or `rbottom`) the one between the output node and ground.

use crate::error::{require_nonzero, require_positive, ElectronicsError, ElectronicsResult};
use crate::resistors::parallel_resistors;
use lib_engio::NumericInput;
use lib_types::{Ohms, Ratio, Volts};

/// Division ratio `Vout / Vin` of an unloaded divider.
pub fn voltage_divider_ratio(
    r1: impl NumericInput,
    r2: impl NumericInput,
) -> ElectronicsResult<Ratio> {
    let r1 = r1.to_numeric()?;
    let r2 = r2.to_numeric()?;
    unloaded_ratio(r1, r2)
}

/// Division ratio of a divider whose output drives `rload` (parallel to `r2`).
pub fn loaded_voltage_divider_ratio(
    r1: impl NumericInput,
    r2: impl NumericInput,
    rload: impl NumericInput,
) -> ElectronicsResult<Ratio> {
    let r1 = r1.to_numeric()?;
    let r2 = parallel_resistors(r2, rload)?;
    unloaded_ratio(r1, r2.0)
}

pub(crate) fn unloaded_ratio(r1: f64, r2: f64) -> ElectronicsResult<Ratio> {
    let total = require_positive("r1 + r2", r1 + r2)?;
    Ok(Ratio(r2 / total))
}

/// Top resistor that yields `ratio` together with `rbottom`.
pub fn top_resistor_by_ratio(
    rbottom: impl NumericInput,
    ratio: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let rbottom = rbottom.to_numeric()?;
    let ratio = check_ratio(ratio.to_numeric()?)?;
    Ok(Ohms(rbottom * (1.0 / ratio - 1.0)))
}

/// Bottom resistor that yields `ratio` together with `rtop`.
pub fn bottom_resistor_by_ratio(
    rtop: impl NumericInput,
    ratio: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let rtop = rtop.to_numeric()?;
    let ratio = check_ratio(ratio.to_numeric()?)?;
    if ratio == 1.0 {
        return Err(ElectronicsError::invalid_value(
            "ratio",
            "a ratio of 1 needs an infinite bottom resistor",
        ));
    }
    Ok(Ohms(-(rtop * ratio) / (ratio - 1.0)))
}

fn check_ratio(ratio: f64) -> ElectronicsResult<f64> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(ratio)
    } else {
        Err(ElectronicsError::invalid_value(
            "ratio",
            format!("{ratio} is outside (0, 1]"),
        ))
    }
}

/// Top feedback resistor for a regulator that servos its feedback pin to `vfb`.
///
/// `vexp` is the desired output voltage, `rbot` the known bottom resistor.
pub fn feedback_top_resistor(
    vexp: impl NumericInput,
    rbot: impl NumericInput,
    vfb: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let vexp = vexp.to_numeric()?;
    let rbot = rbot.to_numeric()?;
    let vfb = require_nonzero("vfb", vfb.to_numeric()?)?;
    Ok(Ohms(rbot * (vexp - vfb) / vfb))
}

/// Bottom feedback resistor for a regulator that servos its feedback pin to `vfb`.
pub fn feedback_bottom_resistor(
    vexp: impl NumericInput,
    rtop: impl NumericInput,
    vfb: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let vexp = vexp.to_numeric()?;
    let rtop = rtop.to_numeric()?;
    let vfb = vfb.to_numeric()?;
    let headroom = require_nonzero("vexp - vfb", vexp - vfb)?;
    Ok(Ohms(vfb * rtop / headroom))
}

/// Output voltage a regulator settles at with the given feedback divider.
pub fn feedback_actual_voltage(
    rtop: impl NumericInput,
    rbot: impl NumericInput,
    vfb: impl NumericInput,
) -> ElectronicsResult<Volts> {
    let ratio = voltage_divider_ratio(rtop, rbot)?;
    let ratio = require_nonzero("divider ratio", ratio.0)?;
    let vfb = vfb.to_numeric()?;
    Ok(Volts(vfb / ratio))
}
