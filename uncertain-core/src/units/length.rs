//! Length units.
//!
//! The canonical scaling unit for this dimension is [`Meter`] (`Meter::RATIO == 1.0`). Imperial units use their
//! exact international definitions (the inch is exactly `0.0254 m`).
//!
//! ```rust
//! use uncertain_core::length::{Inch, Inches};
//!
//! let d = Inches::new(12.0, 0.5);
//! let m = d.to::<uncertain_core::length::Meter>();
//! assert!((m.mean() - 0.3048).abs() < 1e-12);
//! ```

use crate::{Dimension, Measured, Unit};
use uncertain_derive::Unit;

/// Dimension tag for length.
pub enum Length {}
impl Dimension for Length {}

/// Marker trait for any [`Unit`] whose dimension is [`Length`].
pub trait LengthUnit: Unit<Dim = Length> {}
impl<T: Unit<Dim = Length>> LengthUnit for T {}

/// Metre (SI base unit).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "m", name = "metre", dimension = Length, ratio = 1.0)]
pub struct Meter;
/// A measurement in metres.
pub type Meters = Measured<Meter>;

/// International inch (`0.0254 m`).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "in", name = "inch", dimension = Length, ratio = 0.0254)]
pub struct Inch;
/// A measurement in inches.
pub type Inches = Measured<Inch>;

/// International foot (`12 in`).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "ft", name = "foot", dimension = Length, ratio = 0.3048)]
pub struct Foot;
/// A measurement in feet.
pub type Feet = Measured<Foot>;
