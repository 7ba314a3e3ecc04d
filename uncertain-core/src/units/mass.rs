//! Mass units.
//!
//! The canonical scaling unit for this dimension is [`Gram`] (`Gram::RATIO == 1.0`), so SI scaling of grams yields
//! kilograms and milligrams.

use crate::{Dimension, Measured, Unit};
use uncertain_derive::Unit;

/// Dimension tag for mass.
pub enum Mass {}
impl Dimension for Mass {}

/// Marker trait for any [`Unit`] whose dimension is [`Mass`].
pub trait MassUnit: Unit<Dim = Mass> {}
impl<T: Unit<Dim = Mass>> MassUnit for T {}

/// Gram.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "g", name = "gram", dimension = Mass, ratio = 1.0)]
pub struct Gram;
/// A measurement in grams.
pub type Grams = Measured<Gram>;

/// Avoirdupois pound (`453.59237 g`, exact).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "lb", name = "pound", dimension = Mass, ratio = 453.592_37)]
pub struct Pound;
/// A measurement in pounds.
pub type Pounds = Measured<Pound>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormatOptions, ScaleMode};
    use approx::assert_relative_eq;

    #[test]
    fn pound_in_kilograms() {
        let opts = FormatOptions::default()
            .with_plus_minus(true)
            .with_scale(ScaleMode::AutoSiPrefix);
        let grams = Pounds::new(10.0, 0.2).to::<Gram>();
        assert_relative_eq!(grams.mean(), 4535.9237, max_relative = 1e-12);
        assert_eq!(grams.format(&opts), "4.54 +/-0.091 kg");
    }
}
