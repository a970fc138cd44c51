//! # lib-engio
//!
//! Engineering-notation input and output for the engcalc workspace.
//!
//! This crate provides:
//! - Parsing of values such as `1,234.56kΩ`, `1k234`, `4e6nA` or `3.2 ΔMHz`
//!   into a number in base units and a unit string
//! - Formatting of numbers with SI prefixes and three visible digits
//! - [`NumericInput`], which lets formula functions accept plain numbers,
//!   typed quantities and engineering strings alike
//!
//! The numeric part of a value is parsed with the `nom` parser combinator
//! library.

pub mod engineer_io;
pub mod error;
pub mod format;
pub mod input;
pub mod number;

pub use engineer_io::{normalize_comma_to_point, EngineerIo, NormalizedValue, SplitValue};
pub use error::{EngIoError, EngIoResult};
pub use format::{auto_format, auto_format_result, format_value};
pub use input::{normalize_numeric, NumericInput};

/// Parse an engineering string with the shared default [`EngineerIo`].
pub fn normalize(s: &str) -> EngIoResult<NormalizedValue> {
    EngineerIo::instance().normalize(s)
}

/// Split an engineering string with the shared default [`EngineerIo`].
pub fn split_suffix_separator(s: &str) -> EngIoResult<SplitValue> {
    EngineerIo::instance().split_suffix_separator(s)
}

/// Best common suffix for a set of values, see [`EngineerIo::auto_suffix_1d`].
pub fn auto_suffix_1d(values: &[f64]) -> EngIoResult<(f64, String)> {
    EngineerIo::instance().auto_suffix_1d(values)
}
