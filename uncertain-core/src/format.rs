//! Rendering uncertain values as text.
//!
//! Output is assembled in a fixed order:
//!
//! ```text
//! mean [±sd] [scale marker / unit] [(dof)] [<lo, hi>] [(1)]
//! ```
//!
//! Formatting never fails. Sub-fields that cannot be computed render as `NaN`, `inf` or `?`, and a tolerance that
//! cannot be met is reported through [`Formatted::warnings`].

use crate::digits::{
    decimal_exponent, implicit_position, non_finite_token, position_for_digits, render_at,
    render_significant, round_to_significant_digits, shift_decimal, significant_digits_for,
    DEFAULT_PRECISION, MAX_SIGNIFICANT_DIGITS,
};
use crate::error::{DigitError, FormatWarning};
use crate::flags::TypeFlags;
use crate::options::{FormatOptions, ScaleMode};
use crate::prefix::{self, auto_exponent};
use crate::stats::interval_half_width;
use crate::unit::UnitLabel;
use crate::value::UncertainValue;
use core::fmt::Write;

/// Formatted text plus the non-fatal conditions met while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    /// Rendered value.
    pub text: String,
    /// Warnings, in the order they occurred.
    pub warnings: Vec<FormatWarning>,
}

/// Formats `value` with `options`.
///
/// ```rust
/// use uncertain_core::{format, FormatOptions, UncertainValue};
///
/// let v = UncertainValue::new(1.23, 0.45, 12);
/// assert_eq!(format::format(&v, &FormatOptions::default()), "1.2");
/// ```
pub fn format(value: &UncertainValue, options: &FormatOptions) -> String {
    render(value, options, None).text
}

/// Formats `value` and reports warnings alongside the text.
pub fn format_with_diagnostics(value: &UncertainValue, options: &FormatOptions) -> Formatted {
    render(value, options, None)
}

/// Formats `value` followed by `unit`, fusing any SI prefix with the unit (`km`, `kilometre`).
pub fn format_with_unit(
    value: &UncertainValue,
    options: &FormatOptions,
    unit: &UnitLabel<'_>,
) -> String {
    render(value, options, Some(unit)).text
}

/// Power of ten the value is divided by before rendering.
pub fn scale_exponent(mean: f64, scale: ScaleMode) -> i32 {
    match scale {
        ScaleMode::None => 0,
        ScaleMode::FixedPower(power) => power,
        ScaleMode::AutoSiPrefix => auto_exponent(mean),
    }
}

fn render(
    value: &UncertainValue,
    options: &FormatOptions,
    unit: Option<&UnitLabel<'_>>,
) -> Formatted {
    let mean = value.mean();
    let flags = value.flags();

    if !mean.is_finite() {
        return plain(non_finite_token(mean).to_string());
    }

    if flags.is_exact_integer() {
        let mut text = render_at(mean, 0);
        if let Some(marker) = scale_marker(0, options, unit) {
            text.push(' ');
            text.push_str(&marker);
        }
        return plain(text);
    }

    let scale = scale_exponent(mean, options.scale);
    let shift = scale.saturating_neg();
    let mean = shift_decimal(mean, shift);
    if !mean.is_finite() {
        return plain(non_finite_token(mean).to_string());
    }
    let std_dev = shift_decimal(value.std_dev(), shift);

    let mut warnings = Vec::new();
    let noisy = i32::from(options.show_noisy_digit);
    let usable = flags.uncertainty_known() && std_dev.is_finite() && std_dev > 0.0;
    let counted_dof = if flags.dof_counted() {
        value.known_dof()
    } else {
        None
    };

    let sd_digits = (usable && flags.is_explicit())
        .then(|| uncertainty_digits(std_dev, counted_dof, options, &mut warnings));

    let (position, mut text) = match options.significant_digits.fixed() {
        Some(digits) => {
            let rounded = round_to_significant_digits(mean, digits);
            let position = position_for_digits(rounded, digits) - noisy;
            (position, render_at(mean, position))
        }
        None => match sd_digits {
            Some(digits) => {
                let leading = decimal_exponent(round_to_significant_digits(std_dev, digits));
                let position = leading - (digits as i32 - 2).max(0) - noisy;
                (position, render_at(mean, position))
            }
            None if usable => {
                let position = implicit_position(std_dev) - noisy;
                (position, render_at(mean, position))
            }
            None => {
                let digits = DEFAULT_PRECISION + noisy as u32;
                let rounded = round_to_significant_digits(mean, digits);
                let position = position_for_digits(rounded, digits);
                (position, render_significant(mean, digits))
            }
        },
    };
    let mean_digits = text.clone();
    if !text.contains('.') {
        text.push('.');
    }

    let dof_alone = options.show_degrees_of_freedom
        && value.known_dof().is_some()
        && !options.show_noisy_digit
        && !options.show_confidence_limits;

    if options.show_plus_minus && flags.uncertainty_known() && flags.is_explicit() && !dof_alone {
        text.push_str(sign_token(flags));
        let digits = sd_digits.unwrap_or(2) + noisy as u32;
        text.push_str(&render_std_dev(std_dev, digits));
    }

    if let Some(marker) = scale_marker(scale, options, unit) {
        text.push(' ');
        text.push_str(&marker);
    }

    if options.show_degrees_of_freedom {
        if let Some(dof) = value.known_dof() {
            let _ = write!(text, " ({})", dof);
        }
    }

    if options.show_confidence_limits {
        text.push_str(&limits(mean, std_dev, &mean_digits, position, flags, counted_dof, options));
        if !options.show_degrees_of_freedom && value.degrees_of_freedom() == 0 {
            text.push_str(" (1)");
        }
    }

    Formatted { text, warnings }
}

fn plain(text: String) -> Formatted {
    Formatted {
        text,
        warnings: Vec::new(),
    }
}

fn uncertainty_digits(
    std_dev: f64,
    counted_dof: Option<u16>,
    options: &FormatOptions,
    warnings: &mut Vec<FormatWarning>,
) -> u32 {
    if let Some(digits) = options.uncertainty_significant_digits.fixed() {
        return digits;
    }
    match significant_digits_for(std_dev, counted_dof, options.rounding_loss_tolerance) {
        Ok(digits) => digits,
        Err(DigitError::ToleranceTooSmall { tolerance }) => {
            log::warn!(
                "rounding-loss tolerance {} cannot be met for standard deviation {}; using {} digits",
                tolerance,
                std_dev,
                MAX_SIGNIFICANT_DIGITS
            );
            warnings.push(FormatWarning::RoundingToleranceTooSmall { tolerance, std_dev });
            MAX_SIGNIFICANT_DIGITS
        }
        Err(DigitError::Indeterminate) => 2,
    }
}

fn sign_token(flags: TypeFlags) -> &'static str {
    if !flags.is_one_sided() {
        " +/-"
    } else if flags.contains(TypeFlags::UNC_NOMINUS) {
        " +"
    } else {
        " -"
    }
}

fn render_std_dev(std_dev: f64, digits: u32) -> String {
    if !std_dev.is_finite() {
        return non_finite_token(std_dev).to_string();
    }
    if std_dev < 0.0 {
        return "?".to_string();
    }
    if std_dev == 0.0 {
        return "0".to_string();
    }
    let rounded = round_to_significant_digits(std_dev, digits);
    render_at(rounded, position_for_digits(rounded, digits))
}

fn scale_marker(
    scale: i32,
    options: &FormatOptions,
    unit: Option<&UnitLabel<'_>>,
) -> Option<String> {
    let unit = unit.filter(|u| !u.symbol.is_empty());
    if scale == 0 {
        return unit.map(|u| {
            if options.show_si_prefix && !u.name.is_empty() {
                u.name.to_string()
            } else {
                u.symbol.to_string()
            }
        });
    }

    match prefix::by_exponent(scale) {
        Some(p) if options.show_si_prefix => {
            Some(format!("{}{}", p.name, unit.map_or("", |u| u.name)))
        }
        Some(p) if options.show_si_symbol => {
            Some(format!("{}{}", p.symbol, unit.map_or("", |u| u.symbol)))
        }
        _ => Some(match unit {
            Some(u) => format!("e{} {}", scale, u.symbol),
            None => format!("e{}", scale),
        }),
    }
}

fn limits(
    mean: f64,
    std_dev: f64,
    mean_digits: &str,
    position: i32,
    flags: TypeFlags,
    counted_dof: Option<u16>,
    options: &FormatOptions,
) -> String {
    if !flags.uncertainty_known() || !std_dev.is_finite() || std_dev < 0.0 {
        return " <?, ?>".to_string();
    }
    if std_dev == 0.0 {
        return format!(" <{}, {}>", mean_digits, mean_digits);
    }

    // A single observation has no t distribution; its limits use the normal quantile.
    let dof = counted_dof.filter(|&d| d > 0);
    let Some(half_width) =
        interval_half_width(std_dev, dof, options.confidence_level, flags.distribution())
    else {
        return " <?, ?>".to_string();
    };

    let mut low = if flags.contains(TypeFlags::UNC_NOMINUS) {
        mean
    } else {
        mean - half_width
    };
    let mut high = if flags.contains(TypeFlags::UNC_NOPLUS) {
        mean
    } else {
        mean + half_width
    };
    if flags.contains(TypeFlags::VALUE_POSITIVE_ONLY) {
        low = low.max(0.0);
    }
    if flags.contains(TypeFlags::VALUE_NEGATIVE_ONLY) {
        high = high.min(0.0);
    }

    format!(
        " <{}, {}>",
        render_at(low, position - 1),
        render_at(high, position - 1)
    )
}
