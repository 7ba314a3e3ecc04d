//! Per-channel formatting state.

use crate::error::{ConfigResult, ParseError};
use crate::format;
use crate::options::{check_confidence_level, check_tolerance, FormatOptions, ScaleMode, SigDigits};
use crate::parse::{self, Parsed};
use crate::value::UncertainValue;
use core::fmt;

/// Owns the [`FormatOptions`] of one output or input channel.
///
/// Setters affect later calls only. Each channel should hold its own context; nothing here is global.
///
/// ```rust
/// use uncertain_core::{FormatContext, UncertainValue};
///
/// let mut ctx = FormatContext::new();
/// ctx.set_plus_minus(true);
/// assert_eq!(ctx.format(&UncertainValue::new(1.23, 0.45, 12)), "1.2 +/-0.45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormatContext {
    options: FormatOptions,
}

impl FormatContext {
    /// Context with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context using `options`.
    ///
    /// # Errors
    ///
    /// Propagates [`FormatOptions::validate`].
    pub fn with_options(options: FormatOptions) -> ConfigResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Restores every option to its default.
    pub fn reset_to_defaults(&mut self) {
        self.options = FormatOptions::default();
    }

    /// Current options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Current significant digits setting.
    pub fn significant_digits(&self) -> SigDigits {
        self.options.significant_digits
    }

    /// Digits of the mean; fixed counts outside `1..=17` are clamped.
    pub fn set_significant_digits(&mut self, digits: SigDigits) {
        self.options.significant_digits = clamp_logged(digits, "significant digits");
    }

    /// Current uncertainty significant digits setting.
    pub fn uncertainty_significant_digits(&self) -> SigDigits {
        self.options.uncertainty_significant_digits
    }

    /// Digits of the ± term; fixed counts outside `1..=17` are clamped.
    pub fn set_uncertainty_significant_digits(&mut self, digits: SigDigits) {
        self.options.uncertainty_significant_digits =
            clamp_logged(digits, "uncertainty significant digits");
    }

    /// Current scale setting.
    pub fn scale(&self) -> ScaleMode {
        self.options.scale
    }

    /// Changes the scale setting.
    pub fn set_scale(&mut self, scale: ScaleMode) {
        self.options.scale = scale;
    }

    /// Current plus/minus setting.
    pub fn plus_minus(&self) -> bool {
        self.options.show_plus_minus
    }

    /// Changes the plus/minus setting.
    pub fn set_plus_minus(&mut self, on: bool) {
        self.options.show_plus_minus = on;
    }

    /// Current degrees of freedom setting.
    pub fn degrees_of_freedom(&self) -> bool {
        self.options.show_degrees_of_freedom
    }

    /// Changes the degrees of freedom setting.
    pub fn set_degrees_of_freedom(&mut self, on: bool) {
        self.options.show_degrees_of_freedom = on;
    }

    /// Current confidence limits setting.
    pub fn confidence_limits(&self) -> bool {
        self.options.show_confidence_limits
    }

    /// Changes the confidence limits setting.
    pub fn set_confidence_limits(&mut self, on: bool) {
        self.options.show_confidence_limits = on;
    }

    /// Current noisy digit setting.
    pub fn noisy_digit(&self) -> bool {
        self.options.show_noisy_digit
    }

    /// Changes the noisy digit setting.
    pub fn set_noisy_digit(&mut self, on: bool) {
        self.options.show_noisy_digit = on;
    }

    /// Current SI symbol setting.
    pub fn si_symbol(&self) -> bool {
        self.options.show_si_symbol
    }

    /// Changes the SI symbol setting.
    pub fn set_si_symbol(&mut self, on: bool) {
        self.options.show_si_symbol = on;
    }

    /// Current SI prefix setting.
    pub fn si_prefix(&self) -> bool {
        self.options.show_si_prefix
    }

    /// Changes the SI prefix setting.
    pub fn set_si_prefix(&mut self, on: bool) {
        self.options.show_si_prefix = on;
    }

    /// Current rounding loss tolerance setting.
    pub fn rounding_loss_tolerance(&self) -> f64 {
        self.options.rounding_loss_tolerance
    }

    /// Changes the rounding-loss tolerance.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTolerance`](crate::ConfigError::InvalidTolerance) for a negative or NaN tolerance; the
    /// previous tolerance stays in effect.
    pub fn set_rounding_loss_tolerance(&mut self, tolerance: f64) -> ConfigResult<()> {
        check_tolerance(tolerance)?;
        self.options.rounding_loss_tolerance = tolerance;
        Ok(())
    }

    /// Current confidence level setting.
    pub fn confidence_level(&self) -> f64 {
        self.options.confidence_level
    }

    /// Changes the confidence level of the limits.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidConfidenceLevel`](crate::ConfigError::InvalidConfidenceLevel) unless `0 < level < 1`;
    /// the previous level stays in effect.
    pub fn set_confidence_level(&mut self, level: f64) -> ConfigResult<()> {
        check_confidence_level(level)?;
        self.options.confidence_level = level;
        Ok(())
    }

    /// Formats `value` with this context's options.
    pub fn format(&self, value: &UncertainValue) -> String {
        format::format(value, &self.options)
    }

    /// Parses `text` with this context's options.
    ///
    /// # Errors
    ///
    /// See [`parse::parse`].
    pub fn parse(&self, text: &str) -> Result<Parsed, ParseError> {
        parse::parse(text, &self.options)
    }

    /// Writes the formatted value to `out`.
    pub fn write_value<W: fmt::Write>(&self, out: &mut W, value: &UncertainValue) -> fmt::Result {
        out.write_str(&self.format(value))
    }
}

fn clamp_logged(digits: SigDigits, what: &str) -> SigDigits {
    let clamped = digits.clamped();
    if clamped != digits {
        log::warn!("{} {:?} clamped to {:?}", what, digits, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::value::DOF_UNKNOWN;

    #[test]
    fn setters_apply_to_later_calls() {
        let mut ctx = FormatContext::new();
        let v = UncertainValue::new(1.23, 0.45, 12);
        assert_eq!(ctx.format(&v), "1.2");
        ctx.set_degrees_of_freedom(true);
        assert_eq!(ctx.format(&v), "1.2 (12)");
        ctx.reset_to_defaults();
        assert_eq!(ctx.format(&v), "1.2");
    }

    #[test]
    fn digit_setters_clamp() {
        let mut ctx = FormatContext::new();
        ctx.set_significant_digits(SigDigits::Fixed(0));
        assert_eq!(ctx.significant_digits(), SigDigits::Fixed(1));
        ctx.set_uncertainty_significant_digits(SigDigits::Fixed(99));
        assert_eq!(ctx.uncertainty_significant_digits(), SigDigits::Fixed(17));
    }

    #[test]
    fn invalid_settings_are_rejected_and_ignored() {
        let mut ctx = FormatContext::new();
        assert_eq!(
            ctx.set_confidence_level(1.0),
            Err(ConfigError::InvalidConfidenceLevel(1.0))
        );
        assert_eq!(ctx.confidence_level(), 0.05);
        assert!(ctx.set_rounding_loss_tolerance(-0.1).is_err());
        assert!(ctx.set_rounding_loss_tolerance(f64::NAN).is_err());
        assert_eq!(ctx.rounding_loss_tolerance(), 0.05);
        assert!(ctx.set_confidence_level(0.01).is_ok());
        assert_eq!(ctx.confidence_level(), 0.01);
    }

    #[test]
    fn with_options_validates() {
        let mut opts = FormatOptions::default();
        opts.confidence_level = 2.0;
        assert!(FormatContext::with_options(opts).is_err());
    }

    #[test]
    fn writes_into_any_writer() {
        let mut ctx = FormatContext::new();
        ctx.set_plus_minus(true);
        let mut out = String::from("x = ");
        ctx.write_value(&mut out, &UncertainValue::new(9.87, 0.25, DOF_UNKNOWN))
            .unwrap();
        assert_eq!(out, "x = 9.9 +/-0.25");
    }

    #[test]
    fn parses_with_context_options() {
        let ctx = FormatContext::new();
        let parsed = ctx.parse("  9.9").unwrap();
        assert_eq!(parsed.value.mean(), 9.9);
        assert_eq!(parsed.consumed, 5);
    }
}
