//! Electric potential.

use crate::{Dimension, Measured, Unit};
use uncertain_derive::Unit;

/// Dimension tag for electric potential.
pub enum Potential {}
impl Dimension for Potential {}

/// Volt.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Unit)]
#[unit(symbol = "V", name = "volt", dimension = Potential, ratio = 1.0)]
pub struct Volt;
/// A measurement in volts.
pub type Volts = Measured<Volt>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormatOptions, ScaleMode};

    #[test]
    fn millivolts_by_name() {
        let opts = FormatOptions::default()
            .with_plus_minus(true)
            .with_scale(ScaleMode::AutoSiPrefix)
            .with_si_prefix(true);
        let v = Volts::new(0.01234, 0.00056);
        assert_eq!(v.format(&opts), "12.3 +/-0.56 millivolt");
        let (back, _) = Volts::parse("12.3 +/-0.56 millivolt", &opts).unwrap();
        assert_eq!(back.format(&opts), "12.3 +/-0.56 millivolt");
    }
}
