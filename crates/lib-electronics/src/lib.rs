//! # lib-electronics
//!
//! Closed-form electronics and physics formulas for the engcalc workspace.
//!
//! Every physical argument accepts an [`NumericInput`](lib_engio::NumericInput):
//! a plain number in base units, a typed quantity such as
//! [`Farads`](lib_types::Farads), or an engineering string such as `"3 pF"`.
//! Results are typed quantities that can be rendered with
//! [`auto_format`](lib_engio::auto_format).
//!
//! - **Crystal oscillators**: load capacitors, frequency and time deviation
//! - **Resistor networks**: parallel/series, E-series, dividers, feedback networks
//! - **Comparator hysteresis**: push-pull and open-drain thresholds
//! - **Passives and power**: capacitor energy, reactance, MOSFET gate losses,
//!   LED series resistors
//! - **PCB traces**: microstrip impedance
//! - **Physics**: temperature scales, thermal noise, NTC and RTD sensors,
//!   resonators, decibels
//!
//! ```
//! use lib_electronics::crystal::load_capacitors;
//! use lib_engio::auto_format;
//!
//! let c = load_capacitors("6 pF", "3 pF", "2 pF").unwrap();
//! assert_eq!(auto_format(c).unwrap(), "5.00 pF");
//! ```

pub mod capacitors;
pub mod crystal;
pub mod decibel;
pub mod error;
pub mod hysteresis;
pub mod led;
pub mod microstrip;
pub mod mosfet;
pub mod noise;
pub mod ntc;
pub mod opamp;
pub mod reactance;
pub mod resistors;
pub mod rf;
pub mod rtd;
pub mod temperature;
pub mod voltage_divider;

pub use error::{ElectronicsError, ElectronicsResult};
pub use temperature::{normalize_temperature, TemperatureScale};
