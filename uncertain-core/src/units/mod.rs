//! Predefined units grouped by dimension.
//!
//! Units live in `uncertain-core` so that the `Display` impls generated for [`Measured`](crate::Measured) do not
//! run into Rust's orphan rules.
//!
//! ## Modules
//!
//! - [`length`]: metre (canonical), inch, foot.
//! - [`mass`]: gram (canonical), pound.
//! - [`time`]: second (canonical), minute, hour.
//! - [`potential`]: volt.
//!
//! Prefixed multiples (`km`, `mV`) are not separate types; they are produced by SI scaling at format time.

pub mod length;
pub mod mass;
pub mod potential;
pub mod time;
