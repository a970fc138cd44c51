//! Thermal noise and noise density conversions.

use crate::error::{require_positive, ElectronicsResult};
use crate::temperature::normalize_temperature;
use lib_engio::NumericInput;
use lib_types::{Amperes, NoiseDensity, Volts};

/// Boltzmann constant in J/K (exact since the 2019 SI redefinition).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// RMS thermal noise voltage of a resistor: `sqrt(4 k T Δf R)`.
///
/// `temperature` is read by [`normalize_temperature`], so unitless values
/// are degrees Celsius.
pub fn johnson_nyquist_noise_voltage(
    r: impl NumericInput,
    delta_f: impl NumericInput,
    temperature: impl NumericInput,
) -> ElectronicsResult<Volts> {
    let r = r.to_numeric()?;
    let delta_f = delta_f.to_numeric()?;
    let t = normalize_temperature(temperature)?;
    Ok(Volts((4.0 * BOLTZMANN * t.0 * delta_f * r).sqrt()))
}

/// RMS thermal noise current of a resistor: `sqrt(4 k T Δf / R)`.
pub fn johnson_nyquist_noise_current(
    r: impl NumericInput,
    delta_f: impl NumericInput,
    temperature: impl NumericInput,
) -> ElectronicsResult<Amperes> {
    let r = require_positive("r", r.to_numeric()?)?;
    let delta_f = delta_f.to_numeric()?;
    let t = normalize_temperature(temperature)?;
    Ok(Amperes((4.0 * BOLTZMANN * t.0 * delta_f / r).sqrt()))
}

/// Total RMS noise over `bandwidth` for a flat noise `density` in V/√Hz.
pub fn actual_noise(
    density: impl NumericInput,
    bandwidth: impl NumericInput,
) -> ElectronicsResult<Volts> {
    let density = density.to_numeric()?;
    let bandwidth = require_positive("bandwidth", bandwidth.to_numeric()?)?;
    Ok(Volts(density * bandwidth.sqrt()))
}

/// Flat noise density that yields `noise` RMS over `bandwidth`.
pub fn noise_density(
    noise: impl NumericInput,
    bandwidth: impl NumericInput,
) -> ElectronicsResult<NoiseDensity> {
    let noise = noise.to_numeric()?;
    let bandwidth = require_positive("bandwidth", bandwidth.to_numeric()?)?;
    Ok(NoiseDensity(noise / bandwidth.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lib_engio::auto_format;

    #[test]
    fn test_johnson_nyquist_noise_voltage() {
        let v = johnson_nyquist_noise_voltage("20 MΩ", "10000 ΔHz", "20 °C").unwrap();
        assert_relative_eq!(v.0, 56.9025e-6, max_relative = 1e-5);
    }

    #[test]
    fn test_johnson_nyquist_noise_current() {
        let i = johnson_nyquist_noise_current("20 MΩ", "10000 ΔHz", "20 °C").unwrap();
        assert_relative_eq!(i.0, 2.84512e-12, max_relative = 1e-5);
        assert!(johnson_nyquist_noise_current(0.0, 1.0, 20.0).is_err());
    }

    #[test]
    fn test_actual_noise() {
        assert_relative_eq!(actual_noise("100 µV", "100 Hz").unwrap().0, 1e-3, max_relative = 1e-12);
        assert_relative_eq!(actual_noise(1e-4, 100.0).unwrap().0, 1e-3, max_relative = 1e-12);
        let v = actual_noise("100 µV", "100 Hz").unwrap();
        assert_eq!(auto_format(v).unwrap(), "1.00 mV");
    }

    #[test]
    fn test_noise_density() {
        assert_relative_eq!(noise_density("1.0 mV", "100 Hz").unwrap().0, 1e-4, max_relative = 1e-12);
        let d = noise_density("1.0 mV", "100 Hz").unwrap();
        assert_eq!(auto_format(d).unwrap(), "100 µV/√Hz");
        assert!(noise_density(1e-3, 0.0).is_err());
    }
}
