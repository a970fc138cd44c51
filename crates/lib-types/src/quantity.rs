//! The [`Quantity`] trait shared by all unit newtypes.

/// A scalar physical quantity with a fixed SI unit.
///
/// `UNIT` is the bare unit symbol (`"F"`, `"Ω"`, ...) without any SI prefix.
/// Formatting code combines it with the prefix chosen for the magnitude,
/// so a function returning `Farads` can be rendered as `"5.00 pF"` without
/// the caller naming the unit.
pub trait Quantity: Copy {
    /// Unit symbol, empty for dimensionless quantities.
    const UNIT: &'static str;

    /// Raw value in base SI units.
    fn value(&self) -> f64;

    /// Wrap a raw value in base SI units.
    fn from_value(value: f64) -> Self;

    /// Unit symbol of this quantity.
    #[inline]
    fn unit(&self) -> &'static str {
        Self::UNIT
    }

    /// Apply `f` to the raw value, keeping the unit.
    #[inline]
    fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        Self::from_value(f(self.value()))
    }
}
