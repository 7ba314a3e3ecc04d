//! Type flags describing what is known about an uncertain value.
//!
//! [`classify`] is the single place where flags are derived from raw data; the formatter and parser only read the
//! predicates exposed on [`TypeFlags`].

use crate::value::DOF_UNKNOWN;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Independent facets of an uncertain value, in declaration order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct TypeFlags: u16 {
        /// The mean is exactly zero.
        const VALUE_ZERO = 1 << 0;
        /// The mean is an integer.
        const VALUE_INTEGER = 1 << 1;
        /// The mean is a rational number (always set alongside `VALUE_INTEGER`).
        const VALUE_RATIONAL = 1 << 2;
        /// The quantity can never be positive.
        const VALUE_NEGATIVE_ONLY = 1 << 3;
        /// The quantity can never be negative.
        const VALUE_POSITIVE_ONLY = 1 << 4;
        /// The standard deviation is meaningful.
        const UNC_KNOWN = 1 << 5;
        /// No uncertainty above the mean.
        const UNC_NOPLUS = 1 << 6;
        /// No uncertainty below the mean.
        const UNC_NOMINUS = 1 << 7;
        /// Quantized by the least significant decimal digit.
        const UNC_QUAN_DECIMAL = 1 << 8;
        /// Quantized by the least significant binary digit.
        const UNC_QUAN_BINARY = 1 << 9;
        /// The uncertainty was stated, not inferred from the digits shown.
        const UNC_EXPLICIT = 1 << 10;
        /// Rectangular (uniform) distribution.
        const UNC_UNIFORM = 1 << 11;
        /// Triangular distribution.
        const UNC_TRIANGULAR = 1 << 12;
        /// The degrees of freedom are a counted number of observations.
        const DEG_FREE_EXACT = 1 << 13;
        /// The degrees of freedom are known.
        const DEG_FREE_KNOWN = 1 << 14;
    }
}

const WORDS: [(TypeFlags, &str); 15] = [
    (TypeFlags::VALUE_ZERO, "zero"),
    (TypeFlags::VALUE_INTEGER, "integer"),
    (TypeFlags::VALUE_RATIONAL, "rational"),
    (TypeFlags::VALUE_NEGATIVE_ONLY, "neg_only"),
    (TypeFlags::VALUE_POSITIVE_ONLY, "pos_only"),
    (TypeFlags::UNC_KNOWN, "uncKnown"),
    (TypeFlags::UNC_NOPLUS, "noPlus"),
    (TypeFlags::UNC_NOMINUS, "noMinus"),
    (TypeFlags::UNC_QUAN_DECIMAL, "quantize10"),
    (TypeFlags::UNC_QUAN_BINARY, "quantize2"),
    (TypeFlags::UNC_EXPLICIT, "explicit"),
    (TypeFlags::UNC_UNIFORM, "uniform"),
    (TypeFlags::UNC_TRIANGULAR, "triangular"),
    (TypeFlags::DEG_FREE_EXACT, "df_exact"),
    (TypeFlags::DEG_FREE_KNOWN, "df_known"),
];

/// Shape of the distribution the standard deviation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distribution {
    /// Normal (the default).
    #[default]
    Gaussian,
    /// Uniform over a finite range.
    Rectangular,
    /// Symmetric triangular.
    Triangular,
}

/// Caller knowledge about the admissible sign of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignHint {
    /// Any sign.
    #[default]
    Unrestricted,
    /// The quantity is never negative (a length, a count).
    NonNegative,
    /// The quantity is never positive.
    NonPositive,
}

impl TypeFlags {
    /// Both one-sided bits: the canonical encoding of an exact value.
    pub const EXACT: Self = Self::UNC_NOPLUS.union(Self::UNC_NOMINUS);

    /// No uncertainty interval at all.
    pub const fn is_exact(self) -> bool {
        self.contains(Self::EXACT)
    }

    /// An exact integer: shown without a decimal point or uncertainty.
    pub const fn is_exact_integer(self) -> bool {
        self.contains(Self::VALUE_INTEGER) && self.is_exact()
    }

    /// Exactly one of the one-sided bits is set.
    pub const fn is_one_sided(self) -> bool {
        self.contains(Self::UNC_NOPLUS) != self.contains(Self::UNC_NOMINUS)
    }

    /// The standard deviation may be used for formatting.
    pub const fn uncertainty_known(self) -> bool {
        self.contains(Self::UNC_KNOWN)
    }

    /// The uncertainty was stated rather than implied by the digits.
    pub const fn is_explicit(self) -> bool {
        self.contains(Self::UNC_EXPLICIT)
    }

    /// Degrees of freedom are a counted number of observations.
    pub const fn dof_counted(self) -> bool {
        self.contains(Self::DEG_FREE_EXACT)
    }

    /// Distribution shape encoded by the flags. Rectangular wins if both shape bits are set.
    pub const fn distribution(self) -> Distribution {
        if self.contains(Self::UNC_UNIFORM) {
            Distribution::Rectangular
        } else if self.contains(Self::UNC_TRIANGULAR) {
            Distribution::Triangular
        } else {
            Distribution::Gaussian
        }
    }

    /// Replaces the distribution shape bits.
    pub fn with_distribution(self, distribution: Distribution) -> Self {
        let cleared = self.difference(Self::UNC_UNIFORM | Self::UNC_TRIANGULAR);
        match distribution {
            Distribution::Gaussian => cleared,
            Distribution::Rectangular => cleared | Self::UNC_UNIFORM,
            Distribution::Triangular => cleared | Self::UNC_TRIANGULAR,
        }
    }

    /// Short tokens for every set bit, in declaration order.
    ///
    /// ```rust
    /// use uncertain_core::TypeFlags;
    /// let flags = TypeFlags::UNC_KNOWN | TypeFlags::DEG_FREE_EXACT;
    /// assert_eq!(flags.to_words(), vec!["uncKnown", "df_exact"]);
    /// ```
    pub fn to_words(self) -> Vec<&'static str> {
        WORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, word)| *word)
            .collect()
    }
}

impl fmt::Display for TypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("unknown");
        }
        f.write_str(&self.to_words().join(" "))
    }
}

/// Derives the flags of a raw `(mean, std_dev, dof)` triple.
///
/// Rules run in order, later ones refining earlier ones:
///
/// 1. a zero mean is `VALUE_ZERO`;
/// 2. an integral mean with zero standard deviation is an exact integer (`VALUE_INTEGER`, `VALUE_RATIONAL`, both
///    one-sided bits, `UNC_KNOWN`);
/// 3. otherwise a finite, non-negative standard deviation is `UNC_KNOWN`, and a positive one is `UNC_EXPLICIT`;
/// 4. a sign hint the mean agrees with sets `VALUE_POSITIVE_ONLY` or `VALUE_NEGATIVE_ONLY`;
/// 5. degrees of freedom other than [`DOF_UNKNOWN`] are `DEG_FREE_KNOWN`.
pub fn classify(mean: f64, std_dev: f64, dof: u16, hint: SignHint) -> TypeFlags {
    let mut flags = TypeFlags::empty();

    if mean == 0.0 {
        flags |= TypeFlags::VALUE_ZERO;
    }

    if mean.is_finite() && mean.fract() == 0.0 && std_dev == 0.0 {
        flags |= TypeFlags::VALUE_INTEGER
            | TypeFlags::VALUE_RATIONAL
            | TypeFlags::EXACT
            | TypeFlags::UNC_KNOWN;
    } else if std_dev.is_finite() && std_dev >= 0.0 {
        flags |= TypeFlags::UNC_KNOWN;
        if std_dev > 0.0 {
            flags |= TypeFlags::UNC_EXPLICIT;
        }
    }

    match hint {
        SignHint::Unrestricted => {}
        SignHint::NonNegative if mean >= 0.0 => flags |= TypeFlags::VALUE_POSITIVE_ONLY,
        SignHint::NonPositive if mean <= 0.0 => flags |= TypeFlags::VALUE_NEGATIVE_ONLY,
        _ => log::debug!("sign hint {:?} contradicted by mean {}; ignored", hint, mean),
    }

    if dof != DOF_UNKNOWN {
        flags |= TypeFlags::DEG_FREE_KNOWN;
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_exact_integer() {
        let flags = classify(0.0, 0.0, DOF_UNKNOWN, SignHint::Unrestricted);
        assert!(flags.contains(TypeFlags::VALUE_ZERO));
        assert!(flags.is_exact_integer());
    }

    #[test]
    fn integral_mean_without_uncertainty_is_exact() {
        let flags = classify(12.0, 0.0, DOF_UNKNOWN, SignHint::Unrestricted);
        assert!(flags.contains(TypeFlags::VALUE_INTEGER | TypeFlags::VALUE_RATIONAL));
        assert!(flags.is_exact());
        assert!(!flags.is_explicit());
        assert!(!flags.contains(TypeFlags::VALUE_ZERO));
    }

    #[test]
    fn fractional_mean_without_uncertainty_is_known_but_not_exact() {
        let flags = classify(1.5, 0.0, DOF_UNKNOWN, SignHint::Unrestricted);
        assert!(flags.uncertainty_known());
        assert!(!flags.is_exact());
        assert!(!flags.is_explicit());
    }

    #[test]
    fn positive_std_dev_is_explicit() {
        let flags = classify(1.23, 0.45, 12, SignHint::Unrestricted);
        assert!(flags.uncertainty_known());
        assert!(flags.is_explicit());
        assert!(flags.contains(TypeFlags::DEG_FREE_KNOWN));
        assert!(!flags.dof_counted());
    }

    #[test]
    fn integral_mean_with_uncertainty_is_not_integer() {
        let flags = classify(9876.0, 321.0, DOF_UNKNOWN, SignHint::Unrestricted);
        assert!(!flags.contains(TypeFlags::VALUE_INTEGER));
        assert!(flags.is_explicit());
    }

    #[test]
    fn unusable_std_dev_leaves_uncertainty_unknown() {
        assert!(!classify(1.0, f64::NAN, 3, SignHint::Unrestricted).uncertainty_known());
        assert!(!classify(1.0, -0.5, 3, SignHint::Unrestricted).uncertainty_known());
        assert!(!classify(1.0, f64::INFINITY, 3, SignHint::Unrestricted).uncertainty_known());
    }

    #[test]
    fn sign_hints() {
        let pos = classify(3.0, 0.1, DOF_UNKNOWN, SignHint::NonNegative);
        assert!(pos.contains(TypeFlags::VALUE_POSITIVE_ONLY));
        let neg = classify(-3.0, 0.1, DOF_UNKNOWN, SignHint::NonPositive);
        assert!(neg.contains(TypeFlags::VALUE_NEGATIVE_ONLY));
        let contradicted = classify(-3.0, 0.1, DOF_UNKNOWN, SignHint::NonNegative);
        assert!(!contradicted.contains(TypeFlags::VALUE_POSITIVE_ONLY));
    }

    #[test]
    fn one_sided_predicates() {
        assert!(TypeFlags::UNC_NOPLUS.is_one_sided());
        assert!(TypeFlags::UNC_NOMINUS.is_one_sided());
        assert!(!TypeFlags::EXACT.is_one_sided());
        assert!(!TypeFlags::empty().is_one_sided());
    }

    #[test]
    fn distribution_bits() {
        let flags = TypeFlags::UNC_KNOWN.with_distribution(Distribution::Triangular);
        assert_eq!(flags.distribution(), Distribution::Triangular);
        let flags = flags.with_distribution(Distribution::Rectangular);
        assert_eq!(flags.distribution(), Distribution::Rectangular);
        assert!(!flags.contains(TypeFlags::UNC_TRIANGULAR));
        assert_eq!(
            flags.with_distribution(Distribution::Gaussian),
            TypeFlags::UNC_KNOWN
        );
    }

    #[test]
    fn words_follow_declaration_order() {
        let flags = TypeFlags::DEG_FREE_KNOWN
            | TypeFlags::VALUE_ZERO
            | TypeFlags::UNC_EXPLICIT
            | TypeFlags::UNC_KNOWN;
        assert_eq!(flags.to_string(), "zero uncKnown explicit df_known");
        assert_eq!(TypeFlags::empty().to_string(), "unknown");
        assert_eq!(TypeFlags::all().to_words().len(), 15);
    }
}
