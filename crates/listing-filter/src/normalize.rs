//! Numeric normalization of raw listing values.
//!
//! Listing values arrive as JSON numbers or as strings formatted for either
//! Brazilian (`1.234,56`) or American (`1,234.56`) conventions, often with a
//! currency prefix. Everything here is total: a value that cannot be read as
//! a finite number is "no data" (`None`), never an error.

use serde_json::Value;

/// Currency markers stripped before parsing, longest first.
const CURRENCY_MARKERS: &[&str] = &["US$", "R$", "BRL", "USD", "EUR", "$", "\u{20ac}", "\u{00a3}"];

/// Normalize a raw value into a finite number, or `None` for no data.
///
/// Numbers pass through unchanged. Strings go through
/// [`parse_locale_number`]. `null`, booleans, arrays and objects are no data.
pub fn normalize(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_locale_number(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Normalize an optional raw value; a missing value is no data.
pub fn normalize_opt(raw: Option<&Value>) -> Option<f64> {
    raw.and_then(normalize)
}

/// Parse a locale-formatted number string.
///
/// Separator rules:
/// - both `.` and `,` present: whichever appears last is the decimal
///   separator, every other separator is a thousands separator;
/// - only `,` present: the last comma is the decimal separator;
/// - only `.` present: if exactly three digits follow the last dot it is a
///   thousands separator, otherwise the last dot is the decimal separator.
///
/// ```
/// use listing_filter::normalize::parse_locale_number;
/// assert_eq!(parse_locale_number("R$ 1.234,56"), Some(1234.56));
/// assert_eq!(parse_locale_number("1,234.56"), Some(1234.56));
/// assert_eq!(parse_locale_number("1.234"), Some(1234.0));
/// assert_eq!(parse_locale_number("1.23"), Some(1.23));
/// ```
pub fn parse_locale_number(input: &str) -> Option<f64> {
    let cleaned = strip_decorations(input);
    if cleaned.is_empty() {
        return None;
    }

    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    let decimal_at = match (last_comma, last_dot) {
        (Some(c), Some(d)) => Some(c.max(d)),
        (Some(c), None) => Some(c),
        (None, Some(d)) => {
            let tail = &cleaned[d + 1..];
            if tail.len() == 3 && tail.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                Some(d)
            }
        }
        (None, None) => None,
    };

    let mut canonical = String::with_capacity(cleaned.len());
    for (i, c) in cleaned.char_indices() {
        match c {
            '.' | ',' if Some(i) == decimal_at => canonical.push('.'),
            '.' | ',' => {}
            _ => canonical.push(c),
        }
    }

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn strip_decorations(input: &str) -> String {
    let mut s: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let negative = s.starts_with('-');
    if negative {
        s.remove(0);
    }
    for marker in CURRENCY_MARKERS {
        if s.get(..marker.len()).is_some_and(|head| head.eq_ignore_ascii_case(marker)) {
            s.replace_range(..marker.len(), "");
        }
        let start = s.len().saturating_sub(marker.len());
        if s.get(start..).is_some_and(|tail| tail.eq_ignore_ascii_case(marker)) {
            s.truncate(start);
        }
    }
    if negative {
        s.insert(0, '-');
    }
    s
}
