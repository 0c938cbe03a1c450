//! Version precedence used by the version-range criterion.
//!
//! Versions on the commands page are short dotted strings ("6.2.0", "7.4")
//! and card attributes carry them behind a scope prefix ("json-2.0.0"). The
//! comparison is deliberately loose: components that do not read as numbers
//! never decide the outcome, and an undecided comparison counts as a match.

use std::cmp::Ordering;

/// Maximum number of dot-separated components that take part in a comparison.
pub const MAX_COMPONENTS: usize = 3;

/// Extract the version part of an item attribute.
///
/// Returns everything after the last `-`, or the whole value when there is
/// no `-` ("json-2.0.0" becomes "2.0.0", "7.2" stays "7.2").
pub fn item_version(value: &str) -> &str {
    value.rsplit('-').next().unwrap_or(value)
}

/// Read a version component the way a browser's `Number()` would.
///
/// Blank input reads as zero, anything that is not a number reads as `NaN`.
pub fn component_value(component: &str) -> f64 {
    let trimmed = component.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let negative = trimmed.starts_with('-');
    if unsigned.len() + 1 < trimmed.len() {
        // More than one sign character
        return f64::NAN;
    }

    if unsigned == "Infinity" {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    let is_decimal_literal = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns true if version `a` is at least version `b`.
///
/// Walks `a`'s components (at most three) against `b`'s. The first pair that
/// differs numerically decides. Pairs where either side is missing or not a
/// number are skipped, and when nothing decides the result is `true`, so
/// "2.0" is at least "2.0.0" and a malformed filter never hides anything.
pub fn version_greater_or_equal(a: &str, b: &str) -> bool {
    let b_parts: Vec<&str> = b.split('.').take(MAX_COMPONENTS).collect();

    for (i, a_part) in a.split('.').take(MAX_COMPONENTS).enumerate() {
        let a_num = component_value(a_part);
        let b_num = b_parts.get(i).map_or(f64::NAN, |p| component_value(p));

        match a_num.partial_cmp(&b_num) {
            Some(Ordering::Greater) => return true,
            Some(Ordering::Less) => return false,
            Some(Ordering::Equal) | None => continue,
        }
    }

    true
}
