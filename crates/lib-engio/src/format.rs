//! Formatting helpers driven by the unit carried in a quantity's type.

use crate::engineer_io::EngineerIo;
use crate::error::EngIoResult;
use lib_types::Quantity;

/// Format a typed quantity with its own unit symbol.
///
/// ```
/// use lib_engio::auto_format;
/// use lib_types::Farads;
/// assert_eq!(auto_format(Farads::from_pf(5.0)).unwrap(), "5.00 pF");
/// ```
pub fn auto_format<Q: Quantity>(quantity: Q) -> EngIoResult<String> {
    EngineerIo::instance().format_value(quantity.value(), Q::UNIT)
}

/// Format the result of a fallible computation returning a typed quantity.
///
/// Errors from the computation are converted into `E` alongside any
/// formatting error.
pub fn auto_format_result<Q, E>(result: Result<Q, E>) -> Result<String, E>
where
    Q: Quantity,
    E: From<crate::error::EngIoError>,
{
    let quantity = result?;
    Ok(auto_format(quantity)?)
}

/// Format a plain value with an explicit unit using the shared instance.
pub fn format_value(value: f64, unit: &str) -> EngIoResult<String> {
    EngineerIo::instance().format_value(value, unit)
}
