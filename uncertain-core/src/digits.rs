//! Significant-digit counting and decimal rounding.
//!
//! Every routine here is pure. Decimal exponents and roundings are read from Rust's correctly rounded `{:e}`
//! rendering instead of `log10`/`10^k` arithmetic, so exact powers of ten, subnormals and values near `f64::MAX`
//! never drift or overflow.

use crate::error::DigitError;
use crate::value::DOF_UNKNOWN;

/// Most significant digits a `f64` can meaningfully carry.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Significant digits used when a value carries no usable uncertainty (the classic stream default).
pub const DEFAULT_PRECISION: u32 = 6;

/// Counted degrees of freedom above which one more digit is kept.
pub const NOISY_DOF_THRESHOLD: u16 = 10;

/// Decimal exponent of the leading significant digit of `x` (`1234.5 → 3`, `0.045 → -2`).
///
/// Zero and non-finite values yield `0`.
pub fn decimal_exponent(x: f64) -> i32 {
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let text = format!("{:e}", x.abs());
    text.split_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0)
}

/// Rounds `value` half-to-even at its `n`-th significant digit.
///
/// `n` is clamped to `1..=17`. Zero and non-finite values are returned unchanged, as is a value whose rounded form
/// would no longer be representable (`f64::MAX` to one digit).
///
/// ```rust
/// use uncertain_core::digits::round_to_significant_digits;
/// assert_eq!(round_to_significant_digits(1234.5678, 3), 1230.0);
/// assert_eq!(round_to_significant_digits(0.0, 4), 0.0);
/// ```
pub fn round_to_significant_digits(value: f64, n: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let n = n.clamp(1, MAX_SIGNIFICANT_DIGITS);
    match format!("{:.*e}", (n - 1) as usize, value).parse::<f64>() {
        Ok(rounded) if rounded.is_finite() => rounded,
        _ => value,
    }
}

/// How many significant digits an explicit standard deviation should be shown with.
///
/// Returns the smallest `n` whose worst-case relative rounding loss `0.5 * 10^(e - n + 1) / |sd|` does not exceed
/// `tolerance`. When the degrees of freedom are a counted number of observations above ten, the estimate is
/// trustworthy enough to carry one more digit.
///
/// The mean is then rounded at the same decimal place as the uncertainty's leading digit (plus any digits beyond the
/// second that the tolerance demanded).
///
/// # Errors
///
/// - [`DigitError::Indeterminate`] for a non-finite or non-positive standard deviation.
/// - [`DigitError::ToleranceTooSmall`] when no digit count up to 17 satisfies `tolerance`.
pub fn significant_digits_for(
    std_dev: f64,
    counted_dof: Option<u16>,
    tolerance: f64,
) -> Result<u32, DigitError> {
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return Err(DigitError::Indeterminate);
    }
    if !(tolerance > 0.0) {
        return Err(DigitError::ToleranceTooSmall { tolerance });
    }

    let mantissa = shift_decimal(std_dev, -decimal_exponent(std_dev));
    let digits = (1..=MAX_SIGNIFICANT_DIGITS)
        .find(|&n| worst_case_loss(mantissa, n) <= tolerance)
        .ok_or(DigitError::ToleranceTooSmall { tolerance })?;

    let counted = counted_dof
        .filter(|&dof| dof != DOF_UNKNOWN)
        .is_some_and(|dof| dof > NOISY_DOF_THRESHOLD);

    Ok((digits + u32::from(counted)).min(MAX_SIGNIFICANT_DIGITS))
}

// Relative loss from the decimal mantissa in [1, 10), so that `0.010` and `1.0` meet the same bound.
fn worst_case_loss(mantissa: f64, digits: u32) -> f64 {
    0.5 * 10f64.powi(1 - digits as i32) / mantissa
}

/// Decimal position quantized by an implicit uncertainty: the digit whose half-unit equals `std_dev`.
///
/// `0.5 → 0`, `0.05 → -1`, `50.0 → 2`.
pub fn implicit_position(std_dev: f64) -> i32 {
    (2.0 * std_dev).log10().round() as i32
}

/// Renders `x` rounded at decimal `position` (the exponent of the last kept digit).
///
/// Positions at or below zero keep `-position` fractional digits; positive positions round to tens, hundreds, ….
/// Negative zero is rendered without its sign.
///
/// ```rust
/// use uncertain_core::digits::render_at;
/// assert_eq!(render_at(1.23, -1), "1.2");
/// assert_eq!(render_at(127.835, 1), "130");
/// assert_eq!(render_at(-0.004, -2), "0.00");
/// ```
pub fn render_at(x: f64, position: i32) -> String {
    if !x.is_finite() {
        return non_finite_token(x).to_string();
    }
    let text = if position <= 0 {
        format!("{:.*}", position.unsigned_abs() as usize, x)
    } else {
        let step = 10f64.powi(position);
        let rounded = if step.is_finite() {
            (x / step).round_ties_even() * step
        } else {
            0.0
        };
        format!("{:.0}", rounded)
    };
    drop_negative_zero(text)
}

/// Renders `x` with `digits` significant digits, trailing fractional zeros removed (`1000 → "1000."`).
pub fn render_significant(x: f64, digits: u32) -> String {
    if !x.is_finite() {
        return non_finite_token(x).to_string();
    }
    let rounded = round_to_significant_digits(x, digits);
    let position = decimal_exponent(rounded) - digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as i32 + 1;
    trim_fraction(render_at(rounded, position))
}

/// Decimal position of the last digit kept when `x` shows `digits` significant digits.
pub fn position_for_digits(x: f64, digits: u32) -> i32 {
    decimal_exponent(x) - digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as i32 + 1
}

/// `x * 10^shift`, computed on the shortest decimal form of `x` so that `9876.5432 → 9.8765432` exactly.
///
/// Zero and non-finite values are returned unchanged; results beyond the `f64` range become infinite or zero.
pub fn shift_decimal(x: f64, shift: i32) -> f64 {
    if shift == 0 || x == 0.0 || !x.is_finite() {
        return x;
    }
    let text = format!("{:e}", x);
    let shifted = text.split_once('e').and_then(|(mantissa, exponent)| {
        let exponent: i32 = exponent.parse().ok()?;
        format!("{}e{}", mantissa, exponent.saturating_add(shift))
            .parse::<f64>()
            .ok()
    });
    shifted.unwrap_or(x * 10f64.powi(shift))
}

/// Diagnostic token standing in for a non-finite number.
pub fn non_finite_token(x: f64) -> &'static str {
    if x.is_nan() {
        "NaN"
    } else if x > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').to_string()
    } else {
        text
    }
}

fn drop_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}
