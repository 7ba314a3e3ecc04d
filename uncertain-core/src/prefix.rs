//! SI prefixes from yocto to yotta.

use crate::digits::decimal_exponent;

/// A decimal SI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiPrefix {
    /// Power of ten the prefix stands for.
    pub exponent: i32,
    /// Abbreviation (`k`).
    pub symbol: &'static str,
    /// Full name (`kilo`).
    pub name: &'static str,
}

const fn prefix(exponent: i32, symbol: &'static str, name: &'static str) -> SiPrefix {
    SiPrefix {
        exponent,
        symbol,
        name,
    }
}

/// Every power-of-1000 prefix, ascending.
pub const PREFIXES: [SiPrefix; 16] = [
    prefix(-24, "y", "yocto"),
    prefix(-21, "z", "zepto"),
    prefix(-18, "a", "atto"),
    prefix(-15, "f", "femto"),
    prefix(-12, "p", "pico"),
    prefix(-9, "n", "nano"),
    prefix(-6, "u", "micro"),
    prefix(-3, "m", "milli"),
    prefix(3, "k", "kilo"),
    prefix(6, "M", "mega"),
    prefix(9, "G", "giga"),
    prefix(12, "T", "tera"),
    prefix(15, "P", "peta"),
    prefix(18, "E", "exa"),
    prefix(21, "Z", "zetta"),
    prefix(24, "Y", "yotta"),
];

/// Smallest prefix exponent.
pub const MIN_EXPONENT: i32 = -24;
/// Largest prefix exponent.
pub const MAX_EXPONENT: i32 = 24;

const MICRO_ALIASES: [&str; 2] = ["\u{b5}", "\u{3bc}"];

/// Prefix for a power of ten, if one exists.
pub fn by_exponent(exponent: i32) -> Option<&'static SiPrefix> {
    PREFIXES.iter().find(|p| p.exponent == exponent)
}

/// Prefix for an abbreviation; micro is also accepted as `µ` and `μ`.
pub fn by_symbol(symbol: &str) -> Option<&'static SiPrefix> {
    if MICRO_ALIASES.contains(&symbol) {
        return by_exponent(-6);
    }
    PREFIXES.iter().find(|p| p.symbol == symbol)
}

/// Prefix for a full name (`kilo`).
pub fn by_name(name: &str) -> Option<&'static SiPrefix> {
    PREFIXES.iter().find(|p| p.name == name)
}

/// Power-of-1000 exponent placing `mean` in `[1, 1000)`, clamped to the prefix range.
///
/// ```rust
/// use uncertain_core::prefix::auto_exponent;
/// assert_eq!(auto_exponent(999.999), 0);
/// assert_eq!(auto_exponent(1000.0), 3);
/// assert_eq!(auto_exponent(0.0123), -3);
/// ```
pub fn auto_exponent(mean: f64) -> i32 {
    if mean == 0.0 || !mean.is_finite() {
        return 0;
    }
    (3 * decimal_exponent(mean).div_euclid(3)).clamp(MIN_EXPONENT, MAX_EXPONENT)
}

/// Leading prefix of `text`: names are tried before symbols. Returns the prefix and its byte length.
pub(crate) fn leading(text: &str) -> Option<(&'static SiPrefix, usize)> {
    if let Some(p) = PREFIXES.iter().find(|p| text.starts_with(p.name)) {
        return Some((p, p.name.len()));
    }
    if let Some(alias) = MICRO_ALIASES.iter().find(|a| text.starts_with(**a)) {
        return by_exponent(-6).map(|p| (p, alias.len()));
    }
    PREFIXES
        .iter()
        .find(|p| text.starts_with(p.symbol))
        .map(|p| (p, p.symbol.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(by_exponent(3).map(|p| p.symbol), Some("k"));
        assert_eq!(by_exponent(0), None);
        assert_eq!(by_exponent(4), None);
        assert_eq!(by_symbol("M").map(|p| p.name), Some("mega"));
        assert_eq!(by_symbol("\u{b5}").map(|p| p.exponent), Some(-6));
        assert_eq!(by_name("nano").map(|p| p.exponent), Some(-9));
        assert_eq!(by_name("kibi"), None);
    }

    #[test]
    fn auto_exponents() {
        assert_eq!(auto_exponent(9876.5432), 3);
        assert_eq!(auto_exponent(-9876.5432), 3);
        assert_eq!(auto_exponent(1.0), 0);
        assert_eq!(auto_exponent(0.999), -3);
        assert_eq!(auto_exponent(1e40), 24);
        assert_eq!(auto_exponent(1e-40), -24);
        assert_eq!(auto_exponent(f64::NAN), 0);
    }

    #[test]
    fn leading_prefixes() {
        assert_eq!(leading("kilometre").map(|(p, n)| (p.exponent, n)), Some((3, 4)));
        assert_eq!(leading("km").map(|(p, n)| (p.exponent, n)), Some((3, 1)));
        assert_eq!(leading("\u{b5}s").map(|(p, n)| (p.exponent, n)), Some((-6, 2)));
        assert_eq!(leading("x"), None);
    }
}
