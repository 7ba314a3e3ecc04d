//! Error and diagnostic types.
//!
//! Only configuration mistakes are returned as hard errors. Formatting degrades to diagnostic tokens and reports
//! [`FormatWarning`]s, and parsing returns a [`ParseError`] that still carries a well-defined (all unknown) value.

use crate::value::UncertainValue;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid [`FormatOptions`](crate::FormatOptions) values, reported at the setter or loader call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Confidence level outside the open interval `(0, 1)`.
    #[error("confidence level must lie in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),

    /// Negative or NaN rounding-loss tolerance.
    #[error("rounding-loss tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// Options file could not be read.
    #[error("failed to read options file: {0}")]
    Io(String),

    /// Options file could not be parsed.
    #[error("failed to parse options: {0}")]
    Parse(String),
}

/// Failures of the digit-count computation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DigitError {
    /// No digit count up to the double precision limit meets the tolerance.
    #[error("rounding-loss tolerance {tolerance} too small to resolve a rounding digit")]
    ToleranceTooSmall {
        /// Requested tolerance.
        tolerance: f64,
    },

    /// The standard deviation is non-finite or not positive.
    #[error("standard deviation is indeterminate")]
    Indeterminate,
}

/// Non-fatal conditions met while formatting.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatWarning {
    /// The tolerance could not be satisfied; the maximum safe digit count was used.
    #[error("rounding-loss tolerance {tolerance} too small for standard deviation {std_dev}; using 17 digits")]
    RoundingToleranceTooSmall {
        /// Tolerance in effect.
        tolerance: f64,
        /// Standard deviation being rounded.
        std_dev: f64,
    },
}

/// Reason a parse failed, or (for [`ParseFailure::MalformedTrailer`]) partially succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseFailure {
    /// Nothing but whitespace was available.
    #[error("no input")]
    NoInput,

    /// The mandatory leading number could not be read.
    #[error("malformed value")]
    MalformedValue,

    /// A degrees-of-freedom trailer was present but broken.
    #[error("malformed degrees-of-freedom trailer")]
    MalformedTrailer,
}

/// A failed parse.
///
/// `value` is [`UncertainValue::unknown`]: mean and standard deviation NaN, zero degrees of freedom and no type flags.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{kind} at byte {position}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseFailure,
    /// Byte offset where reading stopped.
    pub position: usize,
    /// The all-unknown value reported in place of a result.
    pub value: UncertainValue,
}

impl ParseError {
    pub(crate) fn new(kind: ParseFailure, position: usize) -> Self {
        Self {
            kind,
            position,
            value: UncertainValue::unknown(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages() {
        let err = ConfigError::InvalidConfidenceLevel(-0.1);
        assert_eq!(err.to_string(), "confidence level must lie in (0, 1), got -0.1");

        let err = ConfigError::Io("missing".into());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn parse_error_carries_unknown_value() {
        let err = ParseError::new(ParseFailure::MalformedValue, 3);
        assert_eq!(err.to_string(), "malformed value at byte 3");
        assert!(err.value.mean().is_nan());
        assert!(err.value.std_dev().is_nan());
        assert_eq!(err.value.degrees_of_freedom(), 0);
        assert!(err.value.flags().is_empty());
    }
}
