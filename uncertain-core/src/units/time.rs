//! Time units.
//!
//! The canonical scaling unit for this dimension is [`Second`] (`Second::RATIO == 1.0`).

use crate::{Dimension, Measured, Unit};
use uncertain_derive::Unit;

/// Dimension tag for time.
pub enum Time {}
impl Dimension for Time {}

/// Marker trait for any [`Unit`] whose dimension is [`Time`].
pub trait TimeUnit: Unit<Dim = Time> {}
impl<T: Unit<Dim = Time>> TimeUnit for T {}

/// Second (SI base unit).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "s", name = "second", dimension = Time, ratio = 1.0)]
pub struct Second;
/// A measurement in seconds.
pub type Seconds = Measured<Second>;

/// Minute (`60 s`).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "min", name = "minute", dimension = Time, ratio = 60.0)]
pub struct Minute;
/// A measurement in minutes.
pub type Minutes = Measured<Minute>;

/// Hour (`3600 s`).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "h", name = "hour", dimension = Time, ratio = 3600.0)]
pub struct Hour;
/// A measurement in hours.
pub type Hours = Measured<Hour>;
