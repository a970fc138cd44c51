//! Comparator hysteresis set by a resistor divider and a feedback resistor.
//!
//! `r1` and `r2` divide Vcc into the comparator threshold. The hysteresis
//! resistor `rh` connects the comparator output to the threshold node. With
//! the output high, `rh` is effectively in parallel with `r1` (upper
//! threshold). With the output low it is in parallel with `r2` (lower
//! threshold). The same Vcc is assumed to feed both the divider and the
//! comparator output stage.
//!
//! Thresholds are returned as `(lower, upper)`.

use crate::error::ElectronicsResult;
use crate::resistors::parallel_resistors;
use crate::voltage_divider::unloaded_ratio;
use lib_engio::NumericInput;
use lib_types::{Ratio, Volts};

/// Threshold division ratios for a push-pull comparator output.
pub fn hysteresis_threshold_ratios(
    r1: impl NumericInput,
    r2: impl NumericInput,
    rh: impl NumericInput,
) -> ElectronicsResult<(Ratio, Ratio)> {
    let r1 = r1.to_numeric()?;
    let r2 = r2.to_numeric()?;
    let rh = rh.to_numeric()?;

    let r1rh = parallel_resistors(r1, rh)?.0;
    let r2rh = parallel_resistors(r2, rh)?.0;
    Ok((unloaded_ratio(r1, r2rh)?, unloaded_ratio(r1rh, r2)?))
}

/// Threshold division ratios for an open-drain comparator output.
///
/// An open-drain output never sources current, so `rh` only affects the
/// lower threshold.
pub fn hysteresis_threshold_ratios_opendrain(
    r1: impl NumericInput,
    r2: impl NumericInput,
    rh: impl NumericInput,
) -> ElectronicsResult<(Ratio, Ratio)> {
    let r1 = r1.to_numeric()?;
    let r2 = r2.to_numeric()?;
    let rh = rh.to_numeric()?;

    let r2rh = parallel_resistors(r2, rh)?.0;
    Ok((unloaded_ratio(r1, r2rh)?, unloaded_ratio(r1, r2)?))
}

/// Threshold voltages for a push-pull comparator output.
pub fn hysteresis_threshold_voltages(
    r1: impl NumericInput,
    r2: impl NumericInput,
    rh: impl NumericInput,
    vcc: impl NumericInput,
) -> ElectronicsResult<(Volts, Volts)> {
    let vcc = vcc.to_numeric()?;
    let (lower, upper) = hysteresis_threshold_ratios(r1, r2, rh)?;
    Ok((Volts(lower.0 * vcc), Volts(upper.0 * vcc)))
}

/// Threshold voltages for an open-drain comparator output.
pub fn hysteresis_threshold_voltages_opendrain(
    r1: impl NumericInput,
    r2: impl NumericInput,
    rh: impl NumericInput,
    vcc: impl NumericInput,
) -> ElectronicsResult<(Volts, Volts)> {
    let vcc = vcc.to_numeric()?;
    let (lower, upper) = hysteresis_threshold_ratios_opendrain(r1, r2, rh)?;
    Ok((Volts(lower.0 * vcc), Volts(upper.0 * vcc)))
}
