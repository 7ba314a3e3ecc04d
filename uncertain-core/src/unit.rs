//! Unit and dimension traits.

use core::fmt::Debug;

/// Marker trait for **dimensions** (Length, Time, Mass …).
///
/// ```rust
/// use uncertain_core::Dimension;
/// pub enum Luminosity {}
/// impl Dimension for Luminosity {}
/// ```
pub trait Dimension {}

/// Trait implemented by every **unit** type.
///
/// * `RATIO` is the conversion factor from this unit to the canonical unit of the same dimension (`Foot::RATIO ==
///   0.3048` with metres canonical).
/// * `SYMBOL` is fused with SI prefix symbols when scaled values are printed (`km`), `NAME` with prefix names
///   (`kilometre`).
/// * `Dim` ties the unit to its [`Dimension`].
///
/// Units are zero-sized markers, usually declared with `#[derive(Unit)]`.
pub trait Unit: Copy + PartialEq + Debug + 'static {
    /// Unit-to-canonical conversion factor.
    const RATIO: f64;

    /// Dimension to which this unit belongs.
    type Dim: Dimension;

    /// Printable symbol.
    const SYMBOL: &'static str;

    /// Long name.
    const NAME: &'static str;
}

/// The textual side of a unit, as used by the formatter and parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitLabel<'a> {
    /// Symbol (`m`).
    pub symbol: &'a str,
    /// Name (`metre`).
    pub name: &'a str,
}

impl<'a> UnitLabel<'a> {
    /// Label from explicit strings.
    pub const fn new(symbol: &'a str, name: &'a str) -> Self {
        Self { symbol, name }
    }

    /// Label of a [`Unit`] type.
    pub const fn of<U: Unit>() -> UnitLabel<'static> {
        UnitLabel {
            symbol: U::SYMBOL,
            name: U::NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::length::Meter;

    #[test]
    fn label_of_unit() {
        let label = UnitLabel::of::<Meter>();
        assert_eq!(label, UnitLabel::new("m", "metre"));
    }
}
