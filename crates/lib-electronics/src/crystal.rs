//! Crystal oscillator load capacitance and frequency deviation.
//!
//! A Pierce oscillator sees its two load capacitors in series, each one in
//! parallel with the pin capacitance of the driving IC, plus the board's stray
//! capacitance:
//!
//! ```text
//! Cload = (C1 + Cpin) * (C2 + Cpin) / (C1 + C2 + 2 Cpin) + Cstray
//! ```
//!
//! With symmetric capacitors (`C1 == C2 == Cext`) this reduces to
//! `Cload = (Cext + Cpin) / 2 + Cstray`. The stray value must not include
//! the pin capacitance.

use crate::error::{ElectronicsError, ElectronicsResult};
use lib_engio::NumericInput;
use lib_types::{Farads, Hertz, Seconds};
use tracing::debug;

/// Typical pin capacitance of a microcontroller oscillator pin.
pub const DEFAULT_PIN_CAPACITANCE: &str = "3 pF";

/// Typical stray capacitance of a compact PCB layout.
pub const DEFAULT_STRAY_CAPACITANCE: &str = "2 pF";

/// Value of each of the two symmetric load capacitors for a crystal.
///
/// `cload` is the load capacitance from the crystal datasheet.
///
/// Returns an error if the pin and stray capacitance alone already exceed
/// the requested load, as no external capacitor could compensate.
pub fn load_capacitors(
    cload: impl NumericInput,
    cpin: impl NumericInput,
    cstray: impl NumericInput,
) -> ElectronicsResult<Farads> {
    let cload = cload.to_numeric()?;
    let cpin = cpin.to_numeric()?;
    let cstray = cstray.to_numeric()?;

    let cext = 2.0 * (cload - cstray) - cpin;
    if cext < 0.0 {
        return Err(ElectronicsError::invalid_value(
            "cload",
            format!("{cload} F is below the parasitic capacitance of the circuit"),
        ));
    }
    debug!(cload, cpin, cstray, cext, "computed crystal load capacitors");
    Ok(Farads(cext))
}

/// [`load_capacitors`] with the default pin and stray capacitance.
pub fn load_capacitors_default(cload: impl NumericInput) -> ElectronicsResult<Farads> {
    load_capacitors(cload, DEFAULT_PIN_CAPACITANCE, DEFAULT_STRAY_CAPACITANCE)
}

/// Load capacitance the crystal actually sees with `cext` on each pin.
///
/// The result should match the load capacitance in the crystal datasheet.
pub fn actual_load_capacitance(
    cext: impl NumericInput,
    cpin: impl NumericInput,
    cstray: impl NumericInput,
) -> ElectronicsResult<Farads> {
    let cext = cext.to_numeric()?;
    let cpin = cpin.to_numeric()?;
    let cstray = cstray.to_numeric()?;

    // Series combination of two equal capacitors: ctotal² / (2 ctotal).
    let ctotal = cext + cpin;
    Ok(Farads(cstray + ctotal / 2.0))
}

/// [`actual_load_capacitance`] with the default pin and stray capacitance.
pub fn actual_load_capacitance_default(cext: impl NumericInput) -> ElectronicsResult<Farads> {
    actual_load_capacitance(cext, DEFAULT_PIN_CAPACITANCE, DEFAULT_STRAY_CAPACITANCE)
}

/// Worst-case clock drift over `timespan` for a frequency deviation in ppm.
///
/// `deviation_ppm` accepts plain numbers as well as strings like `"20 ppm"`.
pub fn deviation_in_time(
    deviation_ppm: impl NumericInput,
    timespan: impl NumericInput,
) -> ElectronicsResult<Seconds> {
    let ppm = deviation_ppm.to_numeric()?;
    let timespan = timespan.to_numeric()?;
    Ok(Seconds(timespan * ppm * 1e-6))
}

/// Clock drift accumulated over one day.
pub fn deviation_per_day(deviation_ppm: impl NumericInput) -> ElectronicsResult<Seconds> {
    deviation_in_time(deviation_ppm, Seconds::DAY)
}

/// Clock drift accumulated over one Julian year (365.25 days).
pub fn deviation_per_year(deviation_ppm: impl NumericInput) -> ElectronicsResult<Seconds> {
    deviation_in_time(deviation_ppm, Seconds::YEAR)
}

/// Absolute frequency error of an oscillator with the given ppm tolerance.
pub fn frequency_deviation(
    frequency: impl NumericInput,
    deviation_ppm: impl NumericInput,
) -> ElectronicsResult<Hertz> {
    let frequency = frequency.to_numeric()?;
    let ppm = deviation_ppm.to_numeric()?;
    Ok(Hertz(frequency * ppm * 1e-6))
}

/// Deviation in ppm of a measured frequency from its nominal value.
pub fn frequency_deviation_ppm(
    nominal: impl NumericInput,
    actual: impl NumericInput,
) -> ElectronicsResult<f64> {
    let nominal = crate::error::require_nonzero("nominal", nominal.to_numeric()?)?;
    let actual = actual.to_numeric()?;
    Ok((actual - nominal) / nominal * 1e6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lib_engio::auto_format;

    #[test]
    fn test_load_capacitors() {
        let c = load_capacitors("6 pF", "3 pF", "2pF").unwrap();
        assert_eq!(auto_format(c).unwrap(), "5.00 pF");
    }

    #[test]
    fn test_load_capacitors_default() {
        let c = load_capacitors_default("12.5 pF").unwrap();
        assert_relative_eq!(c.as_pf(), 18.0, epsilon = 1e-9);
    }

    #[test]
    fn test_load_capacitors_too_small() {
        let err = load_capacitors("2 pF", "3 pF", "2 pF").unwrap_err();
        assert!(matches!(err, ElectronicsError::InvalidValue { name: "cload", .. }));
    }

    #[test]
    fn test_actual_load_capacitance() {
        let c = actual_load_capacitance("5 pF", "3 pF", "2pF").unwrap();
        assert_eq!(auto_format(c).unwrap(), "6.00 pF");
    }

    #[test]
    fn test_load_capacitance_inverse() {
        let cext = load_capacitors_default("9 pF").unwrap();
        let cload = actual_load_capacitance_default(cext).unwrap();
        assert_relative_eq!(cload.as_pf(), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_input() {
        assert!(load_capacitors_default("six pF").is_err());
    }

    #[test]
    fn test_deviation_in_time() {
        let d = deviation_in_time("20 ppm", "1 s").unwrap();
        assert_relative_eq!(d.0, 20e-6);

        let day = deviation_per_day(20.0).unwrap();
        assert_relative_eq!(day.0, 1.728, epsilon = 1e-12);

        let year = deviation_per_year("1 ppm").unwrap();
        assert_relative_eq!(year.0, 31.5576, epsilon = 1e-9);
    }

    #[test]
    fn test_frequency_deviation() {
        let df = frequency_deviation("16 MHz", "20 ppm").unwrap();
        assert_relative_eq!(df.0, 320.0, epsilon = 1e-9);

        let ppm = frequency_deviation_ppm("16 MHz", 16_000_320.0).unwrap();
        assert_relative_eq!(ppm, 20.0, epsilon = 1e-6);
        assert!(frequency_deviation_ppm(0.0, 1.0).is_err());
    }
}
