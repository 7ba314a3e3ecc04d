//! Uncertain values tagged with a unit.

use crate::error::ParseError;
use crate::format::format_with_unit;
use crate::options::FormatOptions;
use crate::parse::{parse_with_unit, Parsed};
use crate::unit::{Unit, UnitLabel};
use crate::value::{UncertainValue, DOF_UNKNOWN};
use core::marker::PhantomData;

/// An [`UncertainValue`] expressed in unit `U`.
///
/// Formatting appends the unit and fuses it with SI prefixes; conversion scales the mean and the standard deviation.
///
/// ```rust
/// use uncertain_core::length::Meters;
/// use uncertain_core::{FormatOptions, ScaleMode};
///
/// let d = Meters::new(9876.0, 321.0);
/// let opts = FormatOptions::default()
///     .with_plus_minus(true)
///     .with_scale(ScaleMode::AutoSiPrefix);
/// assert_eq!(d.format(&opts), "9.9 +/-0.32 km");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measured<U: Unit>(UncertainValue, PhantomData<U>);

impl<U: Unit> Measured<U> {
    /// A measurement with standard deviation `std_dev` and unknown degrees of freedom.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self::from_value(UncertainValue::new(mean, std_dev, DOF_UNKNOWN))
    }

    /// A measurement without uncertainty.
    pub fn exact(mean: f64) -> Self {
        Self::from_value(UncertainValue::exact(mean))
    }

    /// Tags an existing value with `U`.
    #[inline]
    pub const fn from_value(value: UncertainValue) -> Self {
        Self(value, PhantomData)
    }

    /// The untagged value.
    #[inline]
    pub const fn value(&self) -> UncertainValue {
        self.0
    }

    /// Mean in `U`.
    #[inline]
    pub const fn mean(&self) -> f64 {
        self.0.mean()
    }

    /// Standard deviation in `U`.
    pub fn std_dev(&self) -> f64 {
        self.0.std_dev()
    }

    /// Converts to another unit of the same dimension.
    ///
    /// ```rust
    /// use uncertain_core::length::{Foot, Meters};
    ///
    /// let m = Meters::new(3.048, 0.3048).to::<Foot>();
    /// assert!((m.mean() - 10.0).abs() < 1e-12);
    /// assert!((m.std_dev() - 1.0).abs() < 1e-6);
    /// ```
    pub fn to<T: Unit<Dim = U::Dim>>(self) -> Measured<T> {
        Measured::from_value(self.0.rescaled(U::RATIO / T::RATIO))
    }

    /// Formats the value followed by the unit.
    pub fn format(&self, options: &FormatOptions) -> String {
        format_with_unit(&self.0, options, &UnitLabel::of::<U>())
    }

    /// Parses a value expressed in `U`, with or without an SI prefix on the unit.
    ///
    /// # Errors
    ///
    /// As [`crate::parse::parse`].
    pub fn parse(text: &str, options: &FormatOptions) -> Result<(Self, Parsed), ParseError> {
        let parsed = parse_with_unit(text, options, &UnitLabel::of::<U>())?;
        Ok((Self::from_value(parsed.value), parsed))
    }
}

impl<U: Unit> From<UncertainValue> for Measured<U> {
    fn from(value: UncertainValue) -> Self {
        Self::from_value(value)
    }
}
