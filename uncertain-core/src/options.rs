//! Formatting and parsing options.
//!
//! [`FormatOptions`] is a plain `Copy` record passed to every format and parse call. The builder methods return
//! modified copies, so one set of defaults can be specialized per call site without shared state.

use crate::digits::MAX_SIGNIFICANT_DIGITS;
use crate::error::{ConfigError, ConfigResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default relative rounding loss accepted when choosing uncertainty digits.
pub const DEFAULT_ROUNDING_LOSS_TOLERANCE: f64 = 0.05;

/// Default two-sided confidence level (95 %).
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.05;

/// How many significant digits to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SigDigits {
    /// Derived from the uncertainty.
    #[default]
    Auto,
    /// A fixed count, `1..=17`.
    Fixed(u8),
}

impl SigDigits {
    /// Same mode with a fixed count clamped to `1..=17`.
    pub fn clamped(self) -> Self {
        match self {
            SigDigits::Auto => SigDigits::Auto,
            SigDigits::Fixed(n) => SigDigits::Fixed(n.clamp(1, MAX_SIGNIFICANT_DIGITS as u8)),
        }
    }

    /// The fixed count, if any.
    pub fn fixed(self) -> Option<u32> {
        match self {
            SigDigits::Auto => None,
            SigDigits::Fixed(n) => Some(u32::from(n).clamp(1, MAX_SIGNIFICANT_DIGITS)),
        }
    }
}

/// Power-of-ten scaling applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScaleMode {
    /// No scaling.
    #[default]
    None,
    /// Always divide by `10^p`.
    FixedPower(i32),
    /// Pick the SI prefix that puts the mean in `[1, 1000)`.
    AutoSiPrefix,
}

/// Options shared by the formatter and parser.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Digits of the mean.
    pub significant_digits: SigDigits,
    /// Digits of the ± term.
    pub uncertainty_significant_digits: SigDigits,
    /// Scaling of mean and uncertainty.
    pub scale: ScaleMode,
    /// Emit the ± term.
    pub show_plus_minus: bool,
    /// Emit `(dof)`.
    pub show_degrees_of_freedom: bool,
    /// Emit `<lo, hi>`.
    pub show_confidence_limits: bool,
    /// Keep one digit beyond the clean count.
    pub show_noisy_digit: bool,
    /// Mark scaling with the prefix symbol (`k`).
    pub show_si_symbol: bool,
    /// Mark scaling with the prefix name (`kilo`); wins over the symbol.
    pub show_si_prefix: bool,
    /// Largest relative error rounding may introduce into the uncertainty.
    pub rounding_loss_tolerance: f64,
    /// Two-sided significance of the confidence limits, in `(0, 1)`.
    pub confidence_level: f64,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            significant_digits: SigDigits::Auto,
            uncertainty_significant_digits: SigDigits::Auto,
            scale: ScaleMode::None,
            show_plus_minus: false,
            show_degrees_of_freedom: false,
            show_confidence_limits: false,
            show_noisy_digit: false,
            show_si_symbol: true,
            show_si_prefix: false,
            rounding_loss_tolerance: DEFAULT_ROUNDING_LOSS_TOLERANCE,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl FormatOptions {
    /// Emit the ± term.
    pub fn with_plus_minus(mut self, on: bool) -> Self {
        self.show_plus_minus = on;
        self
    }

    /// Emit the degrees of freedom.
    pub fn with_degrees_of_freedom(mut self, on: bool) -> Self {
        self.show_degrees_of_freedom = on;
        self
    }

    /// Emit confidence limits.
    pub fn with_confidence_limits(mut self, on: bool) -> Self {
        self.show_confidence_limits = on;
        self
    }

    /// Keep the noisy digit.
    pub fn with_noisy_digit(mut self, on: bool) -> Self {
        self.show_noisy_digit = on;
        self
    }

    /// Mark scaling with prefix symbols.
    pub fn with_si_symbol(mut self, on: bool) -> Self {
        self.show_si_symbol = on;
        self
    }

    /// Mark scaling with prefix names.
    pub fn with_si_prefix(mut self, on: bool) -> Self {
        self.show_si_prefix = on;
        self
    }

    /// Scaling mode.
    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }

    /// Digits of the mean; fixed counts are clamped to `1..=17`.
    pub fn with_significant_digits(mut self, digits: SigDigits) -> Self {
        self.significant_digits = digits.clamped();
        self
    }

    /// Digits of the ± term; fixed counts are clamped to `1..=17`.
    pub fn with_uncertainty_significant_digits(mut self, digits: SigDigits) -> Self {
        self.uncertainty_significant_digits = digits.clamped();
        self
    }

    /// Rounding-loss tolerance. Negative values become `0`; NaN keeps the current tolerance.
    ///
    /// Both corrections are logged at warn level. Use
    /// [`try_with_rounding_loss_tolerance`](Self::try_with_rounding_loss_tolerance) to reject such values instead,
    /// as [`FormatContext::set_rounding_loss_tolerance`](crate::FormatContext::set_rounding_loss_tolerance) does.
    pub fn with_rounding_loss_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_nan() {
            log::warn!("ignoring NaN rounding-loss tolerance");
        } else if tolerance < 0.0 {
            log::warn!("negative rounding-loss tolerance {} clamped to 0", tolerance);
            self.rounding_loss_tolerance = 0.0;
        } else {
            self.rounding_loss_tolerance = tolerance;
        }
        self
    }

    /// Rounding-loss tolerance, rejecting values the lenient builder would correct.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTolerance`] for a negative or NaN tolerance.
    pub fn try_with_rounding_loss_tolerance(mut self, tolerance: f64) -> ConfigResult<Self> {
        check_tolerance(tolerance)?;
        self.rounding_loss_tolerance = tolerance;
        Ok(self)
    }

    /// Confidence level for the limits.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidConfidenceLevel`] unless `0 < level < 1`.
    pub fn try_with_confidence_level(mut self, level: f64) -> ConfigResult<Self> {
        check_confidence_level(level)?;
        self.confidence_level = level;
        Ok(self)
    }

    /// Checks fields that may have been set directly or loaded from a file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidConfidenceLevel`] or [`ConfigError::InvalidTolerance`].
    pub fn validate(&self) -> ConfigResult<()> {
        check_confidence_level(self.confidence_level)?;
        check_tolerance(self.rounding_loss_tolerance)
    }
}

pub(crate) fn check_confidence_level(level: f64) -> ConfigResult<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidConfidenceLevel(level))
    }
}

pub(crate) fn check_tolerance(tolerance: f64) -> ConfigResult<()> {
    if tolerance >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance(tolerance))
    }
}
