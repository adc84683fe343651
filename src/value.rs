//! Cell text normalization and the value comparator.
//!
//! Every cell is read through [`normalize`] before it is compared or ranked:
//!
//! ```text
//! "" | "-"          → Missing       (below every other value)
//! "42.5%" | "42.5"  → Number(42.5)  (a trailing % is display only)
//! "87.5 ± 0.3"      → Number(87.5)  (leading number, the rest is ignored)
//! "n/a" | "SOTA"    → Text(..)      (opaque, compared caselessly)
//! ```
//!
//! Normalization never fails. Text that does not start with a number simply
//! stays text and takes the string path of [`compare_values`].

use alloc::borrow::Cow;
use alloc::format;
use core::cmp::Ordering;

use crate::config::RankConfig;

/// Comparable form of a cell's raw text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NormalizedValue<'a> {
    /// Placeholder cell (`-` or empty). Orders below every other value and
    /// never receives a rank.
    Missing,
    /// Finite number read from the start of the text.
    Number(f64),
    /// Trimmed text that does not start with a number.
    Text(&'a str),
}

impl<'a> NormalizedValue<'a> {
    /// `true` for the missing-value sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    /// String form used when a number meets text in [`compare_values`].
    fn fallback_text(&self) -> Cow<'a, str> {
        match *self {
            Self::Missing => Cow::Borrowed(""),
            Self::Number(v) => Cow::Owned(format!("{}", v)),
            Self::Text(t) => Cow::Borrowed(t),
        }
    }
}

/// Normalize cell text with the default missing markers (`""` and `"-"`).
pub fn normalize(text: &str) -> NormalizedValue<'_> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return NormalizedValue::Missing;
    }
    parse_present(trimmed)
}

/// Normalize cell text using the missing markers from `config`.
pub fn normalize_with<'a>(text: &'a str, config: &RankConfig) -> NormalizedValue<'a> {
    let trimmed = text.trim();
    if config.is_missing(trimmed) {
        return NormalizedValue::Missing;
    }
    parse_present(trimmed)
}

fn parse_present(trimmed: &str) -> NormalizedValue<'_> {
    match leading_number(trimmed) {
        Some(v) => NormalizedValue::Number(v),
        None => NormalizedValue::Text(trimmed),
    }
}

/// Longest decimal literal at the start of `text`, if it is finite.
///
/// Accepts an optional sign, digits with an optional fraction (`5.`, `.5`)
/// and an exponent only when digits follow it. Whatever comes after the
/// literal (`%`, units, `± 0.3`) is ignored.
fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digit_run(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = bytes.get(exp..).map_or(0, digit_run);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Total order over normalized values, ascending.
///
/// - Missing sorts below everything and equals itself.
/// - Two numbers compare numerically.
/// - Anything else compares as strings with [`locale_cmp`]; a number takes its
///   decimal string form, so `"9"` and `"abc"` order as text.
pub fn compare_values(a: &NormalizedValue<'_>, b: &NormalizedValue<'_>) -> Ordering {
    use NormalizedValue::*;
    match (a, b) {
        (Missing, Missing) => Ordering::Equal,
        (Missing, _) => Ordering::Less,
        (_, Missing) => Ordering::Greater,
        (Number(x), Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => locale_cmp(&a.fallback_text(), &b.fallback_text()),
    }
}

/// Caseless string ordering.
///
/// Characters are first compared by their lowercase mapping. Strings equal
/// under that mapping put lowercase before uppercase at the first case
/// difference, and raw code-point order breaks whatever is left.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
