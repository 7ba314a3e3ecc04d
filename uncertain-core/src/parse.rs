//! Reading uncertain values back from text.
//!
//! Accepted grammar (whitespace may separate every element):
//!
//! ```text
//! value [uncertainty] [scale] [(dof)] [<lo, hi>] [(count)]
//! value       := ["-"] digits ["." [digits]] [("e"|"E") ["+"|"-"] digits]
//! uncertainty := ("+/-" | "-/+" | "+|-" | "-|+" | "+-" | "±" | "+" | "-") number
//! scale       := prefix symbol | prefix name | "e" int      (fused with the unit, if any)
//! ```
//!
//! A value without point, exponent or explicit uncertainty is an exact integer. Otherwise the last digit shown
//! quantizes the value: `9.9` carries an implicit standard deviation of `0.05`. A `(count)` after the limits is a
//! number of observations, one more than the degrees of freedom.

use crate::digits::shift_decimal;
use crate::error::{ParseError, ParseFailure};
use crate::flags::TypeFlags;
use crate::options::{FormatOptions, ScaleMode};
use crate::prefix;
use crate::unit::UnitLabel;
use crate::value::{UncertainValue, DOF_UNKNOWN};
use core::ops::RangeInclusive;
use core::str::FromStr;

/// Result of a successful parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed {
    /// Decoded value.
    pub value: UncertainValue,
    /// Bytes of input consumed, including leading whitespace.
    pub consumed: usize,
    /// Set when a trailer was present but broken and therefore left unconsumed.
    pub trailer: Option<ParseFailure>,
}

/// Parses the leading uncertain value of `text`.
///
/// Scale tokens are only recognized when `options.scale` is not [`ScaleMode::None`].
///
/// ```rust
/// use uncertain_core::{parse, FormatOptions};
///
/// let parsed = parse::parse("1.2 +/-0.45 (12)", &FormatOptions::default()).unwrap();
/// assert_eq!(parsed.value.mean(), 1.2);
/// assert_eq!(parsed.value.std_dev(), 0.45);
/// assert_eq!(parsed.value.degrees_of_freedom(), 12);
/// ```
///
/// # Errors
///
/// [`ParseFailure::NoInput`] for blank input and [`ParseFailure::MalformedValue`] when no number starts the text.
pub fn parse(text: &str, options: &FormatOptions) -> Result<Parsed, ParseError> {
    Parser::new(text, options, None).run()
}

/// Parses a value followed by `unit`, optionally carrying an SI prefix (`km`, `kilometre`).
///
/// # Errors
///
/// As [`parse`].
pub fn parse_with_unit(
    text: &str,
    options: &FormatOptions,
    unit: &UnitLabel<'_>,
) -> Result<Parsed, ParseError> {
    Parser::new(text, options, Some(unit)).run()
}

impl FromStr for UncertainValue {
    type Err = ParseError;

    /// Parses with default options; anything but whitespace after the value is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse(s, &FormatOptions::default())?;
        if let Some(kind) = parsed.trailer {
            return Err(ParseError::new(kind, parsed.consumed));
        }
        if !s[parsed.consumed..].trim().is_empty() {
            return Err(ParseError::new(ParseFailure::MalformedTrailer, parsed.consumed));
        }
        Ok(parsed.value)
    }
}

#[derive(Debug, Clone, Copy)]
struct Number {
    value: f64,
    has_point: bool,
    has_exponent: bool,
    fraction_digits: i32,
    exponent: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Both,
    AboveOnly,
    BelowOnly,
}

const UNCERTAINTY_SIGNS: [(&str, Side); 8] = [
    ("+/-", Side::Both),
    ("-/+", Side::Both),
    ("+|-", Side::Both),
    ("-|+", Side::Both),
    ("+-", Side::Both),
    ("\u{b1}", Side::Both),
    ("+", Side::AboveOnly),
    ("-", Side::BelowOnly),
];

enum Trailer {
    Absent,
    Count(u32),
    Broken,
}

struct Parser<'a, 'u> {
    text: &'a str,
    pos: usize,
    options: &'a FormatOptions,
    unit: Option<&'a UnitLabel<'u>>,
}

impl<'a, 'u> Parser<'a, 'u> {
    fn new(text: &'a str, options: &'a FormatOptions, unit: Option<&'a UnitLabel<'u>>) -> Self {
        Self {
            text,
            pos: 0,
            options,
            unit,
        }
    }

    fn run(mut self) -> Result<Parsed, ParseError> {
        self.skip_whitespace();
        if self.rest().is_empty() {
            return Err(ParseError::new(ParseFailure::NoInput, self.pos));
        }

        let start = self.pos;
        let number = self
            .number(true)
            .ok_or_else(|| ParseError::new(ParseFailure::MalformedValue, start))?;

        let mut mean = number.value;
        let (mut std_dev, mut flags) = match self.uncertainty() {
            Some((std_dev, side)) => {
                let mut flags = TypeFlags::UNC_KNOWN | TypeFlags::UNC_EXPLICIT;
                match side {
                    Side::Both => {}
                    Side::AboveOnly => flags |= TypeFlags::UNC_NOMINUS,
                    Side::BelowOnly => flags |= TypeFlags::UNC_NOPLUS,
                }
                (std_dev, flags)
            }
            None if !number.has_point && !number.has_exponent => (
                0.0,
                TypeFlags::VALUE_INTEGER
                    | TypeFlags::VALUE_RATIONAL
                    | TypeFlags::EXACT
                    | TypeFlags::UNC_KNOWN,
            ),
            None => (
                implicit_std_dev(&number),
                TypeFlags::UNC_KNOWN | TypeFlags::UNC_QUAN_DECIMAL,
            ),
        };

        if let Some(power) = self.scale() {
            mean = shift_decimal(mean, power);
            std_dev = shift_decimal(std_dev, power);
        }

        let mut dof = DOF_UNKNOWN;
        let mut trailer = None;
        match self.bracketed(0..=u32::from(DOF_UNKNOWN) - 1) {
            Trailer::Count(n) => dof = n as u16,
            Trailer::Absent => {}
            Trailer::Broken => trailer = Some(ParseFailure::MalformedTrailer),
        }

        if trailer.is_none() && self.limits() {
            match self.bracketed(1..=u32::from(DOF_UNKNOWN)) {
                Trailer::Count(observations) if dof == DOF_UNKNOWN => {
                    dof = (observations - 1) as u16
                }
                Trailer::Count(_) | Trailer::Absent => {}
                Trailer::Broken => trailer = Some(ParseFailure::MalformedTrailer),
            }
        }

        if dof != DOF_UNKNOWN {
            flags |= TypeFlags::DEG_FREE_KNOWN | TypeFlags::DEG_FREE_EXACT;
        }
        if mean == 0.0 {
            flags |= TypeFlags::VALUE_ZERO;
        }
        if trailer.is_some() {
            log::debug!("ignoring malformed trailer at byte {} of {:?}", self.pos, self.text);
        }

        Ok(Parsed {
            value: UncertainValue::from_parts(mean, std_dev as f32, dof, flags),
            consumed: self.pos,
            trailer,
        })
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if !token.is_empty() && self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn at_boundary(&self) -> bool {
        self.rest()
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '(' || c == '<')
    }

    fn number(&mut self, signed: bool) -> Option<Number> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let digits_from = |mut i: usize| {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            i
        };

        let mut i = usize::from(signed && bytes.first() == Some(&b'-'));
        let integer_end = digits_from(i);
        if integer_end == i {
            return None;
        }
        i = integer_end;

        let has_point = bytes.get(i) == Some(&b'.');
        let mut fraction_digits = 0;
        if has_point {
            let fraction_end = digits_from(i + 1);
            fraction_digits = (fraction_end - i - 1) as i32;
            i = fraction_end;
        }

        let mut exponent = 0;
        let mut has_exponent = false;
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(i + 1), Some(b'+' | b'-')));
            let exponent_end = digits_from(i + 1 + sign);
            if exponent_end > i + 1 + sign {
                exponent = saturating_exponent(&rest[i + 1..exponent_end]);
                has_exponent = true;
                i = exponent_end;
            }
        }

        let value = rest[..i].parse().ok()?;
        self.pos += i;
        Some(Number {
            value,
            has_point,
            has_exponent,
            fraction_digits,
            exponent,
        })
    }

    fn uncertainty(&mut self) -> Option<(f64, Side)> {
        let save = self.pos;
        self.skip_whitespace();
        if let Some(&(_, side)) = UNCERTAINTY_SIGNS.iter().find(|(sign, _)| self.eat(sign)) {
            self.skip_whitespace();
            if let Some(number) = self.number(false) {
                return Some((number.value, side));
            }
            log::debug!("sign at byte {} not followed by a number; left unread", save);
        }
        self.pos = save;
        None
    }

    fn scale(&mut self) -> Option<i32> {
        if self.options.scale == ScaleMode::None && self.unit.is_none() {
            return None;
        }
        let save = self.pos;
        self.skip_whitespace();
        match self.scale_token() {
            Some(power) if self.at_boundary() => Some(power),
            _ => {
                self.pos = save;
                None
            }
        }
    }

    fn scale_token(&mut self) -> Option<i32> {
        if let Some(power) = self.exponent_marker() {
            if let Some(unit) = self.unit {
                let save = self.pos;
                self.skip_whitespace();
                if !(self.eat(unit.name) || self.eat(unit.symbol)) {
                    self.pos = save;
                }
            }
            return Some(power);
        }

        let rest = self.rest();
        let Some(unit) = self.unit else {
            let (p, len) = prefix::leading(rest)?;
            self.pos += len;
            return Some(p.exponent);
        };

        if let Some((p, len)) = prefix::leading(rest) {
            let after = &rest[len..];
            for label in [unit.name, unit.symbol] {
                if !label.is_empty() && after.starts_with(label) {
                    let end = self.pos + len + label.len();
                    let saved = core::mem::replace(&mut self.pos, end);
                    if self.at_boundary() {
                        return Some(p.exponent);
                    }
                    self.pos = saved;
                }
            }
        }
        if self.eat(unit.name) || self.eat(unit.symbol) {
            return Some(0);
        }
        None
    }

    fn exponent_marker(&mut self) -> Option<i32> {
        let rest = self.rest();
        let body = rest.strip_prefix('e')?;
        let sign = usize::from(body.starts_with(['+', '-']));
        let digits = body[sign..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let power = saturating_exponent(&body[..sign + digits]);
        self.pos += 1 + sign + digits;
        Some(power)
    }

    fn bracketed(&mut self, accepted: RangeInclusive<u32>) -> Trailer {
        let save = self.pos;
        self.skip_whitespace();
        if !self.eat("(") {
            self.pos = save;
            return Trailer::Absent;
        }
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        let count = self.rest()[..digits].parse::<u32>().ok();
        self.pos += digits;
        match count {
            Some(n) if accepted.contains(&n) && self.eat(")") => Trailer::Count(n),
            _ => {
                self.pos = save;
                Trailer::Broken
            }
        }
    }

    fn limits(&mut self) -> bool {
        let save = self.pos;
        self.skip_whitespace();
        let ok = self.eat("<")
            && self.limit()
            && {
                self.skip_whitespace();
                self.eat(",")
            }
            && self.limit()
            && {
                self.skip_whitespace();
                self.eat(">")
            };
        if !ok {
            self.pos = save;
        }
        ok
    }

    fn limit(&mut self) -> bool {
        self.skip_whitespace();
        self.eat("?") || self.number(true).is_some()
    }
}

/// Reads an optionally signed run of digits, saturating at the `i32` range so that huge exponents behave like
/// `1e400` does.
fn saturating_exponent(digits: &str) -> i32 {
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i32::MIN
    } else {
        i32::MAX
    })
}

/// Half a unit of the last digit shown: `9.9 → 0.05`, `1.2e3 → 50`.
fn implicit_std_dev(number: &Number) -> f64 {
    let power = number
        .exponent
        .saturating_sub(number.fraction_digits)
        .saturating_sub(1);
    format!("5e{}", power).parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Parsed {
        parse(text, &FormatOptions::default()).unwrap()
    }

    #[test]
    fn exact_integers() {
        let parsed = read("12");
        assert_eq!(parsed.value.mean(), 12.0);
        assert!(parsed.value.flags().is_exact_integer());
        assert_eq!(parsed.value.std_dev(), 0.0);
        assert_eq!(parsed.consumed, 2);

        let zero = read("0").value;
        assert!(zero.flags().contains(TypeFlags::VALUE_ZERO));
        assert!(zero.flags().is_exact_integer());
    }

    #[test]
    fn implicit_uncertainty_from_last_digit() {
        for (text, expected) in [("9.", 0.5), ("9.9", 0.05), ("9.99", 0.005), ("1.5e3", 50.0)] {
            let value = read(text).value;
            assert_eq!(value.std_dev(), expected, "{}", text);
            assert!(value.flags().contains(TypeFlags::UNC_QUAN_DECIMAL));
            assert!(!value.flags().is_explicit());
        }
        assert_eq!(read("1.5e3").value.mean(), 1500.0);
    }

    #[test]
    fn overflowing_exponents_saturate() {
        let huge = read("1e99999999999");
        assert_eq!(huge.consumed, 13);
        assert!(huge.value.mean().is_infinite());
        assert_eq!(read("1e400").value.mean(), huge.value.mean());

        let tiny = read("1e-99999999999");
        assert_eq!(tiny.consumed, 14);
        assert_eq!(tiny.value.mean(), 0.0);
        assert_eq!(tiny.value.std_dev(), 0.0);

        assert_eq!(saturating_exponent("+99999999999"), i32::MAX);
        assert_eq!(saturating_exponent("-99999999999"), i32::MIN);
        assert_eq!(saturating_exponent("-12"), -12);
    }

    #[test]
    fn explicit_uncertainty_tokens() {
        let texts = [
            "1.2 +/-0.45",
            "1.2-/+0.45",
            "1.2 +|- 0.45",
            "1.2 -|+0.45",
            "1.2+-0.45",
            "1.2 \u{b1}0.45",
        ];
        for text in texts {
            let value = read(text).value;
            assert_eq!(value.std_dev(), 0.45, "{}", text);
            assert!(value.flags().is_explicit());
            assert!(!value.flags().is_one_sided());
        }
    }

    #[test]
    fn one_sided_uncertainty() {
        let plus = read("5+0.2").value;
        assert_eq!(plus.mean(), 5.0);
        assert_eq!(plus.std_dev(), 0.2);
        assert!(plus.flags().contains(TypeFlags::UNC_NOMINUS));
        assert!(!plus.flags().contains(TypeFlags::UNC_NOPLUS));

        let minus = read("5-0.3").value;
        assert_eq!(minus.std_dev(), 0.3);
        assert!(minus.flags().contains(TypeFlags::UNC_NOPLUS));
    }

    #[test]
    fn sign_without_number_is_left_unread() {
        let parsed = read("5 +x");
        assert_eq!(parsed.consumed, 1);
        assert!(parsed.value.flags().is_exact_integer());
    }

    #[test]
    fn degrees_of_freedom() {
        let parsed = read("1.2 +/-0.45 (12)");
        assert_eq!(parsed.value.degrees_of_freedom(), 12);
        assert!(parsed.value.flags().dof_counted());
        assert_eq!(parsed.consumed, 16);
        assert_eq!(parsed.trailer, None);
    }

    #[test]
    fn broken_trailer_is_reported_not_consumed() {
        for text in ["1.2 (12", "1.2 (x)", "1.2 (65535)", "1.2 ()"] {
            let parsed = read(text);
            assert_eq!(parsed.consumed, 3, "{}", text);
            assert_eq!(parsed.trailer, Some(ParseFailure::MalformedTrailer));
            assert_eq!(parsed.value.degrees_of_freedom(), DOF_UNKNOWN);
        }
    }

    #[test]
    fn limits_and_observation_count() {
        let text = "130. +/-15 <98, 158> (1)";
        let parsed = read(text);
        assert_eq!(parsed.consumed, text.len());
        assert_eq!(parsed.value.mean(), 130.0);
        assert_eq!(parsed.value.std_dev(), 15.0);
        assert_eq!(parsed.value.degrees_of_freedom(), 0);

        let parsed = read("4. <?, ?>");
        assert_eq!(parsed.consumed, 9);
    }

    #[test]
    fn malformed_limits_stay_unread() {
        let parsed = read("1.2 <0.3 2.1>");
        assert_eq!(parsed.consumed, 3);
        assert_eq!(parsed.trailer, None);
    }

    #[test]
    fn failures_carry_unknown_value() {
        let err = parse("   ", &FormatOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseFailure::NoInput);
        assert!(err.value.mean().is_nan());

        let err = parse("  abc", &FormatOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseFailure::MalformedValue);
        assert_eq!(err.position, 2);
        assert!(err.value.std_dev().is_nan());

        assert_eq!(
            parse("-", &FormatOptions::default()).unwrap_err().kind,
            ParseFailure::MalformedValue
        );
    }

    #[test]
    fn scale_tokens_need_a_scale_mode() {
        assert_eq!(read("9.9 k").consumed, 3);

        let opts = FormatOptions::default().with_scale(ScaleMode::AutoSiPrefix);
        let parsed = parse("9.9 +/-0.32 k", &opts).unwrap();
        assert_eq!(parsed.value.mean(), 9900.0);
        assert_eq!(parsed.value.std_dev(), 320.0);

        let parsed = parse("2.5 kilo", &opts).unwrap();
        assert_eq!(parsed.value.mean(), 2500.0);

        let parsed = parse("9.9 +/-0.43 e4", &opts).unwrap();
        assert_eq!(parsed.value.mean(), 99000.0);
        assert_eq!(parsed.value.std_dev(), 4300.0);
    }

    #[test]
    fn scale_needs_a_token_boundary() {
        let opts = FormatOptions::default().with_scale(ScaleMode::AutoSiPrefix);
        let parsed = parse("1.5 kg", &opts).unwrap();
        assert_eq!(parsed.value.mean(), 1.5);
        assert_eq!(parsed.consumed, 3);
    }

    #[test]
    fn units_with_prefixes() {
        let opts = FormatOptions::default();
        let metre = UnitLabel::new("m", "metre");

        let parsed = parse_with_unit("9.9 +/-0.32 km", &opts, &metre).unwrap();
        assert_eq!(parsed.value.mean(), 9900.0);
        assert_eq!(parsed.consumed, 14);

        assert_eq!(parse_with_unit("1. km", &opts, &metre).unwrap().value.mean(), 1000.0);
        assert_eq!(parse_with_unit("3. kilometre", &opts, &metre).unwrap().value.mean(), 3000.0);
        assert_eq!(parse_with_unit("999.999 m", &opts, &metre).unwrap().value.mean(), 999.999);
        assert_eq!(parse_with_unit("2.0 metre", &opts, &metre).unwrap().consumed, 9);
        assert_eq!(parse_with_unit("7.5 mm", &opts, &metre).unwrap().value.mean(), 0.0075);

        let minute = UnitLabel::new("min", "minute");
        assert_eq!(parse_with_unit("4.0 min", &opts, &minute).unwrap().value.mean(), 4.0);
    }

    #[test]
    fn from_str_requires_full_consumption() {
        let value: UncertainValue = "1.2 +/-0.45".parse().unwrap();
        assert_eq!(value.mean(), 1.2);

        let err = "1.2 apples".parse::<UncertainValue>().unwrap_err();
        assert_eq!(err.kind, ParseFailure::MalformedTrailer);
        assert_eq!(err.position, 3);

        assert!(" 7 ".parse::<UncertainValue>().is_ok());
    }

    #[test]
    fn negative_values() {
        let value = read("-0.5").value;
        assert_eq!(value.mean(), -0.5);
        assert_eq!(value.std_dev(), 0.05);
    }
}
