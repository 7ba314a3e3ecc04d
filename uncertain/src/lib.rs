//! Measurements with uncertainty, as text.
//!
//! `uncertain` is the user-facing crate in this workspace. It re-exports the full API from `uncertain-core` plus a
//! small set of predefined units (length, mass, time, electric potential).
//!
//! A value is an [`UncertainValue`]: a mean, a standard deviation, a degrees-of-freedom count and [`TypeFlags`]
//! describing what is known about it. The formatter chooses how many digits to print from the uncertainty, so that
//! rounding never hides more than a configurable fraction of it; the parser reads the same text back and infers an
//! implicit uncertainty from the last digit shown.
//!
//! # What this crate solves
//!
//! - Printing `1.2 +/-0.45 <0.35, 2.11>` rather than `1.2345678 ± 0.4512`.
//! - Reading measurement text back without losing the precision it implies (`2.50` means `±0.005`).
//! - SI prefixes fused with unit symbols or names (`9.9 +/-0.32 km`, `12.5 millimetre`).
//!
//! # What this crate does not try to solve
//!
//! - Arithmetic or error propagation on uncertain values.
//! - Locale-specific number formatting; the decimal separator is always `.`.
//!
//! # Quick start
//!
//! ```rust
//! use uncertain::{FormatOptions, UncertainValue};
//!
//! let v = UncertainValue::new(1.23, 0.45, 12);
//! let opts = FormatOptions::default()
//!     .with_plus_minus(true)
//!     .with_degrees_of_freedom(true)
//!     .with_confidence_limits(true);
//! assert_eq!(v.display(&opts).to_string(), "1.2 +/-0.45 (12) <0.35, 2.11>");
//!
//! let parsed = uncertain::parse::parse("2.50", &opts).unwrap();
//! assert!((parsed.value.std_dev() - 0.005).abs() < 1e-6);
//! ```
//!
//! With units:
//!
//! ```rust
//! use uncertain::{FormatOptions, Meters, ScaleMode};
//!
//! let opts = FormatOptions::default()
//!     .with_plus_minus(true)
//!     .with_scale(ScaleMode::AutoSiPrefix);
//! let d = Meters::new(9876.0, 321.0);
//! assert_eq!(d.format(&opts), "9.9 +/-0.32 km");
//! ```
//!
//! # Incorrect usage (type error)
//!
//! ```compile_fail
//! use uncertain::{Meters, Second};
//!
//! let d = Meters::new(1.0, 0.1);
//! let _ = d.to::<Second>(); // mismatched dimensions
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for values, flags and options.
//! - `config` (default): [`FormatOptions::from_file`] and friends for TOML configuration.

#![forbid(unsafe_code)]

pub use uncertain_core::*;

/// Derive macro used by `uncertain-core` to define unit marker types.
///
/// This macro expands in terms of `crate::Unit` and `crate::Measured`, so it is intended for use inside
/// `uncertain-core` (or crates exposing the same crate-root API). Most users should not need this.
pub use uncertain_derive::Unit;

pub use uncertain_core::units::length;
pub use uncertain_core::units::mass;
pub use uncertain_core::units::potential;
pub use uncertain_core::units::time;

pub use uncertain_core::units::length::*;
pub use uncertain_core::units::mass::*;
pub use uncertain_core::units::potential::*;
pub use uncertain_core::units::time::*;
