//! The uncertain value record.

use crate::flags::{classify, Distribution, SignHint, TypeFlags};
use crate::format;
use crate::options::FormatOptions;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Degrees of freedom not known.
pub const DOF_UNKNOWN: u16 = 0xFFFF;

/// A mean with its standard deviation, degrees of freedom and [`TypeFlags`].
///
/// Values are immutable records; the `with_*` methods return modified copies.
///
/// ```rust
/// use uncertain_core::{FormatOptions, UncertainValue};
///
/// let v = UncertainValue::new(1.23, 0.45, 12);
/// let opts = FormatOptions::default().with_plus_minus(true);
/// assert_eq!(v.display(&opts).to_string(), "1.2 +/-0.45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UncertainValue {
    mean: f64,
    std_dev: f32,
    degrees_of_freedom: u16,
    flags: TypeFlags,
}

impl UncertainValue {
    /// Builds a value from a mean, standard deviation and degrees of freedom, deriving its flags.
    ///
    /// Pass [`DOF_UNKNOWN`] when the degrees of freedom are not known. A zero standard deviation on an integral mean
    /// makes the value an exact integer.
    pub fn new(mean: f64, std_dev: f64, degrees_of_freedom: u16) -> Self {
        Self::with_hint(mean, std_dev, degrees_of_freedom, SignHint::Unrestricted)
    }

    /// Like [`new`](Self::new) with knowledge about the admissible sign of the quantity.
    pub fn with_hint(mean: f64, std_dev: f64, degrees_of_freedom: u16, hint: SignHint) -> Self {
        let std_dev = std_dev as f32;
        Self {
            mean,
            std_dev,
            degrees_of_freedom,
            flags: classify(mean, widen(std_dev), degrees_of_freedom, hint),
        }
    }

    /// A value without uncertainty.
    pub fn exact(mean: f64) -> Self {
        Self::new(mean, 0.0, DOF_UNKNOWN)
    }

    /// Assembles a value from raw parts without classification.
    pub const fn from_parts(
        mean: f64,
        std_dev: f32,
        degrees_of_freedom: u16,
        flags: TypeFlags,
    ) -> Self {
        Self {
            mean,
            std_dev,
            degrees_of_freedom,
            flags,
        }
    }

    /// The all-unknown value reported by failed parses.
    pub const fn unknown() -> Self {
        Self::from_parts(f64::NAN, f32::NAN, 0, TypeFlags::empty())
    }

    /// Marks `degrees_of_freedom` as a counted number of observations.
    pub fn with_exact_dof(mut self, degrees_of_freedom: u16) -> Self {
        self.degrees_of_freedom = degrees_of_freedom;
        if degrees_of_freedom == DOF_UNKNOWN {
            self.flags.remove(TypeFlags::DEG_FREE_KNOWN | TypeFlags::DEG_FREE_EXACT);
        } else {
            self.flags.insert(TypeFlags::DEG_FREE_KNOWN | TypeFlags::DEG_FREE_EXACT);
        }
        self
    }

    /// Restates the distribution the standard deviation describes.
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.flags = self.flags.with_distribution(distribution);
        self
    }

    /// Multiplies mean and standard deviation by `factor`, keeping degrees of freedom.
    ///
    /// A mean that stops being integral loses its integer flags; zero is re-derived from the scaled mean.
    pub(crate) fn rescaled(self, factor: f64) -> Self {
        let mean = self.mean * factor;
        let mut flags = self.flags;
        if mean.fract() != 0.0 {
            flags.remove(TypeFlags::VALUE_INTEGER | TypeFlags::VALUE_RATIONAL);
        }
        flags.set(TypeFlags::VALUE_ZERO, mean == 0.0);
        Self {
            mean,
            std_dev: (self.std_dev() * factor.abs()) as f32,
            flags,
            ..self
        }
    }

    /// Mean.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation, widened through its shortest decimal form (`0.01f32` reads back as `0.01`).
    pub fn std_dev(&self) -> f64 {
        widen(self.std_dev)
    }

    /// Standard deviation as stored.
    pub const fn std_dev_f32(&self) -> f32 {
        self.std_dev
    }

    /// Degrees of freedom, [`DOF_UNKNOWN`] when not known.
    pub const fn degrees_of_freedom(&self) -> u16 {
        self.degrees_of_freedom
    }

    /// Degrees of freedom if known.
    pub fn known_dof(&self) -> Option<u16> {
        (self.degrees_of_freedom != DOF_UNKNOWN).then_some(self.degrees_of_freedom)
    }

    /// Type flags.
    pub const fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// `Display` adapter rendering the value with `options`.
    pub fn display<'a>(&'a self, options: &'a FormatOptions) -> DisplayValue<'a> {
        DisplayValue {
            value: self,
            options,
        }
    }
}

impl fmt::Display for UncertainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format(self, &FormatOptions::default()))
    }
}

/// Renders an [`UncertainValue`] with borrowed [`FormatOptions`]; see [`UncertainValue::display`].
#[derive(Debug, Clone, Copy)]
pub struct DisplayValue<'a> {
    value: &'a UncertainValue,
    options: &'a FormatOptions,
}

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format(self.value, self.options))
    }
}

fn widen(std_dev: f32) -> f64 {
    if !std_dev.is_finite() {
        return f64::from(std_dev);
    }
    std_dev
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(std_dev))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_widens_through_decimal() {
        let v = UncertainValue::new(1.0, 0.01, DOF_UNKNOWN);
        assert_eq!(v.std_dev(), 0.01);
        assert_eq!(v.std_dev_f32(), 0.01f32);
    }

    #[test]
    fn new_classifies() {
        let v = UncertainValue::new(1.23, 0.45, 12);
        assert!(v.flags().is_explicit());
        assert!(v.flags().contains(TypeFlags::DEG_FREE_KNOWN));
        assert_eq!(v.known_dof(), Some(12));
        assert_eq!(UncertainValue::new(1.0, 0.1, DOF_UNKNOWN).known_dof(), None);
    }

    #[test]
    fn exact_values() {
        assert!(UncertainValue::exact(12.0).flags().is_exact_integer());
        let half = UncertainValue::exact(0.5);
        assert!(!half.flags().is_exact());
        assert!(half.flags().uncertainty_known());
    }

    #[test]
    fn counted_dof() {
        let v = UncertainValue::new(127.835, 15.287, DOF_UNKNOWN).with_exact_dof(0);
        assert!(v.flags().dof_counted());
        assert_eq!(v.degrees_of_freedom(), 0);

        let cleared = v.with_exact_dof(DOF_UNKNOWN);
        assert!(!cleared.flags().dof_counted());
        assert!(!cleared.flags().contains(TypeFlags::DEG_FREE_KNOWN));
    }

    #[test]
    fn unknown_sentinel() {
        let v = UncertainValue::unknown();
        assert!(v.mean().is_nan());
        assert!(v.std_dev().is_nan());
        assert_eq!(v.degrees_of_freedom(), 0);
        assert_eq!(v.flags().to_string(), "unknown");
    }

    #[test]
    fn rescaling_keeps_flags() {
        let v = UncertainValue::new(-2.5, 0.25, 4).rescaled(1000.0);
        assert_eq!(v.mean(), -2500.0);
        assert_eq!(v.std_dev(), 250.0);
        assert_eq!(v.degrees_of_freedom(), 4);
        assert!(v.flags().is_explicit());
    }

    #[test]
    fn rescaling_rederives_integer_flags() {
        let v = UncertainValue::exact(2.0).rescaled(0.25);
        assert_eq!(v.mean(), 0.5);
        assert!(!v.flags().contains(TypeFlags::VALUE_INTEGER));
        assert!(!v.flags().contains(TypeFlags::VALUE_RATIONAL));
        assert!(!v.flags().is_exact_integer());
        assert!(v.flags().is_exact());

        let whole = UncertainValue::exact(2.0).rescaled(60.0);
        assert_eq!(whole.mean(), 120.0);
        assert!(whole.flags().is_exact_integer());

        let zero = UncertainValue::new(2.0, 0.5, DOF_UNKNOWN).rescaled(0.0);
        assert!(zero.flags().contains(TypeFlags::VALUE_ZERO));
    }

    #[test]
    fn sign_hint_and_distribution() {
        let v = UncertainValue::with_hint(3.0, 0.5, DOF_UNKNOWN, SignHint::NonNegative)
            .with_distribution(Distribution::Rectangular);
        assert!(v.flags().contains(TypeFlags::VALUE_POSITIVE_ONLY));
        assert_eq!(v.flags().distribution(), Distribution::Rectangular);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let v = UncertainValue::new(9.87, 0.25, 7);
        let json = serde_json::to_string(&v).unwrap();
        let back: UncertainValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
