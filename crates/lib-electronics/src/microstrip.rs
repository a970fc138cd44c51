//! Outer-layer microstrip impedance.
//!
//! Lengths are accepted as plain numbers in meters or as strings with the
//! unit `m` (`"140 µm"`, `"0.3 mm"`). With a unit present, `"5m"` is five
//! meters, not five milli.

use crate::error::{require_positive, ElectronicsError, ElectronicsResult};
use lib_engio::{EngineerIo, NumericInput};
use lib_types::Ohms;
use std::f64::consts::{E, PI};

/// Characteristic impedance of vacuum in Ω (CODATA 2018).
pub const VACUUM_IMPEDANCE: f64 = 376.730_313_668;

/// Relative permittivity of FR4.
pub const FR4_PERMITTIVITY: f64 = 4.8;

/// Prepreg height of a 1.6 mm four-layer stackup.
pub const DEFAULT_DIELECTRIC_HEIGHT: &str = "140 µm";

/// 1 oz copper.
pub const DEFAULT_TRACE_THICKNESS: &str = "35 µm";

fn normalize_length(name: &'static str, value: impl NumericInput) -> ElectronicsResult<f64> {
    let io = EngineerIo::instance().with_extra_units(["m"])?;
    let normalized = value.normalize_with(&io)?;
    if !normalized.unit.is_empty() && normalized.unit != "m" {
        return Err(ElectronicsError::invalid_value(
            name,
            format!("expected a length, got unit '{}'", normalized.unit),
        ));
    }
    require_positive(name, normalized.value)
}

/// Impedance of a microstrip of width `w` and thickness `t` at height `h`
/// above the ground plane, on a dielectric with relative permittivity `e_r`.
///
/// Uses the Wheeler-type closed form that accounts for the trace thickness.
pub fn microstrip_impedance(
    w: impl NumericInput,
    h: impl NumericInput,
    t: impl NumericInput,
    e_r: impl NumericInput,
) -> ElectronicsResult<Ohms> {
    let w = normalize_length("w", w)?;
    let h = normalize_length("h", h)?;
    let t = normalize_length("t", t)?;
    let e_r = require_positive("e_r", e_r.to_numeric()?)?;

    let y0 = (t / (w * PI + 1.1 * t * PI)).powi(2);
    let y1 = ((t / h).powi(2) + y0).sqrt();
    let y2 = (e_r + 1.0) / (2.0 * e_r);
    let w_eff = w + (t / PI) * ((4.0 * E) / y1).ln() * y2;
    let h_over_w = h / w_eff;

    let x0 = (14.0 * e_r + 8.0) / (11.0 * e_r);
    let x1 = 4.0 * x0 * h_over_w;
    let x2 = (16.0 * h_over_w.powi(2) * x0.powi(2) + y2 * PI * PI).sqrt();

    let z = VACUUM_IMPEDANCE / (2.0 * PI * 2f64.sqrt() * (e_r + 1.0).sqrt())
        * (1.0 + 4.0 * h_over_w * (x1 + x2)).ln();
    Ok(Ohms(z))
}

/// [`microstrip_impedance`] on an outer layer of a 1.6 mm four-layer FR4 board.
pub fn microstrip_impedance_default(w: impl NumericInput) -> ElectronicsResult<Ohms> {
    microstrip_impedance(
        w,
        DEFAULT_DIELECTRIC_HEIGHT,
        DEFAULT_TRACE_THICKNESS,
        FR4_PERMITTIVITY,
    )
}
