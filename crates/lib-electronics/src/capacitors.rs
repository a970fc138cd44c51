//! Energy and charge stored in a capacitor.

use crate::error::ElectronicsResult;
use lib_engio::NumericInput;
use lib_types::{Coulombs, Joules};

/// Energy stored in a capacitor charged to `voltage`: `½ C V²`.
pub fn capacitor_energy(
    capacitance: impl NumericInput,
    voltage: impl NumericInput,
) -> ElectronicsResult<Joules> {
    let c = capacitance.to_numeric()?;
    let v = voltage.to_numeric()?;
    Ok(Joules(0.5 * c * v * v))
}

/// Charge held by a capacitor charged to `voltage`: `C V`.
pub fn capacitor_charge(
    capacitance: impl NumericInput,
    voltage: impl NumericInput,
) -> ElectronicsResult<Coulombs> {
    let c = capacitance.to_numeric()?;
    let v = voltage.to_numeric()?;
    Ok(Coulombs(c * v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lib_engio::auto_format;
    use lib_types::{Farads, Volts};

    #[test]
    fn test_capacitor_energy() {
        assert_relative_eq!(capacitor_energy("1.5 F", "5.0 V").unwrap().0, 18.75);
        assert_eq!(capacitor_energy("1.5 F", "0.0 V").unwrap(), Joules(0.0));
        let e = capacitor_energy("100 mF", "1.2 V").unwrap();
        assert_eq!(auto_format(e).unwrap(), "72.0 mJ");
    }

    #[test]
    fn test_capacitor_charge() {
        assert_relative_eq!(capacitor_charge("1.5 F", "5.0 V").unwrap().0, 7.5);
        let q = capacitor_charge(Farads::from_uf(10.0), Volts(5.0)).unwrap();
        assert_relative_eq!(q.0, 50e-6, epsilon = 1e-18);
    }
}
