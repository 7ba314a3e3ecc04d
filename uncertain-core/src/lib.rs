//! Text encoding and decoding of uncertain values.
//!
//! `uncertain-core` formats a mean with its standard deviation, degrees of freedom and type flags as text, and parses
//! that text back:
//!
//! - An *uncertain value* is an [`UncertainValue`]: `f64` mean, `f32` standard deviation, `u16` degrees of freedom
//!   and [`TypeFlags`].
//! - How many digits are shown follows from the uncertainty and the rounding-loss tolerance in [`FormatOptions`].
//! - Parsing reads the same grammar and infers an implicit uncertainty from the last digit shown.
//! - A value tagged with a unit is a [`Measured<U>`]; SI prefixes are fused with the unit symbol or name.
//!
//! Most users should depend on `uncertain` (the facade crate).
//!
//! # Quick start
//!
//! ```rust
//! use uncertain_core::{FormatOptions, UncertainValue};
//!
//! let v = UncertainValue::new(1.23, 0.45, 12);
//! let opts = FormatOptions::default()
//!     .with_plus_minus(true)
//!     .with_confidence_limits(true);
//! assert_eq!(v.display(&opts).to_string(), "1.2 +/-0.45 <0.35, 2.11>");
//!
//! let back: UncertainValue = "1.2 +/-0.45".parse().unwrap();
//! assert_eq!(back.std_dev(), 0.45);
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for values, flags and options.
//! - `config` (default): loading [`FormatOptions`] from TOML; implies `serde`.
//!
//! # Panics and errors
//!
//! Formatting never fails: sub-fields that cannot be computed render as `NaN`, `inf` or `?`, and unmet rounding
//! tolerances are reported as [`FormatWarning`]s (and logged through the `log` facade). Parsing returns
//! [`ParseError`]; invalid option values return [`ConfigError`].

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod digits;
pub mod error;
pub mod flags;
pub mod format;
pub mod parse;
pub mod prefix;
pub mod stats;

mod context;
mod measured;
mod options;
mod unit;
mod value;

#[cfg(feature = "config")]
mod config;

pub use context::FormatContext;
pub use error::{ConfigError, ConfigResult, DigitError, FormatWarning, ParseError, ParseFailure};
pub use flags::{classify, Distribution, SignHint, TypeFlags};
pub use format::{format_with_diagnostics, format_with_unit, Formatted};
pub use measured::Measured;
pub use options::{
    FormatOptions, ScaleMode, SigDigits, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_ROUNDING_LOSS_TOLERANCE,
};
pub use parse::{parse_with_unit, Parsed};
pub use prefix::SiPrefix;
pub use unit::{Dimension, Unit, UnitLabel};
pub use value::{DisplayValue, UncertainValue, DOF_UNKNOWN};

/// Predefined units grouped by dimension.
pub mod units;

pub use units::length;
pub use units::mass;
pub use units::potential;
pub use units::time;
