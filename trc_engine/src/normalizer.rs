//! Measured value normalization
//!
//! Turns the raw text captured after `=` on a value line into a
//! [`MeasuredValue`]: a comparison-ready string plus a numeric
//! interpretation when one exists. The criterion decides whether a
//! hexadecimal reading is attempted first.

use crate::types::{looks_hex, Criterion, MeasuredValue};
use regex::Regex;
use std::sync::OnceLock;

static LEADING_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

/// Leading signed decimal number, ignoring any trailing unit suffix
fn leading_number_re() -> &'static Regex {
    LEADING_NUMBER_RE
        .get_or_init(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?").expect("static pattern"))
}

/// Collapsed, case-folded comparison form
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a hex token, tolerating embedded spaces ("00 3D")
pub fn parse_hex(token: &str) -> Option<i64> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    i64::from_str_radix(&compact, 16).ok()
}

/// Parse the leading decimal number of a token ("30.5 Hz" reads as 30.5)
pub fn parse_decimal(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    leading_number_re()
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Normalize a raw value in the light of its criterion
pub fn normalize(raw: &str, criterion: &Criterion) -> MeasuredValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return MeasuredValue::blank();
    }

    let normalized = normalize_text(trimmed);

    // Hex reading comes first when the criterion calls for it, or when the
    // token itself can only be hex
    if criterion.expects_hex() || looks_hex(trimmed) {
        if let Some(v) = parse_hex(trimmed) {
            return MeasuredValue {
                raw: raw.to_string(),
                normalized,
                numeric: Some(v as f64),
                is_hex: true,
                is_blank: false,
            };
        }
    }

    let numeric = parse_decimal(trimmed);

    MeasuredValue {
        raw: raw.to_string(),
        normalized,
        numeric,
        is_hex: false,
        is_blank: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RangeBase, RangeBounds};

    fn decimal_criterion() -> Criterion {
        Criterion::GreaterThan { threshold: 0.0 }
    }

    fn hex_criterion() -> Criterion {
        Criterion::Range(RangeBounds::new("0000", "FFFF", RangeBase::Hex))
    }

    #[test]
    fn test_blank_value() {
        let value = normalize("   ", &decimal_criterion());
        assert!(value.is_blank);
        assert!(value.numeric.is_none());
    }

    #[test]
    fn test_decimal_value() {
        let value = normalize("27535", &decimal_criterion());
        assert_eq!(value.numeric, Some(27535.0));
        assert!(!value.is_hex);
        assert!(!value.is_blank);
    }

    #[test]
    fn test_decimal_with_unit_suffix() {
        let value = normalize("30.5 Hz", &decimal_criterion());
        assert_eq!(value.numeric, Some(30.5));
        assert_eq!(value.normalized, "30.5 hz");
    }

    #[test]
    fn test_negative_decimal() {
        let value = normalize("-12.25", &decimal_criterion());
        assert_eq!(value.numeric, Some(-12.25));
    }

    #[test]
    fn test_hex_value_under_hex_criterion() {
        let value = normalize("003D", &hex_criterion());
        assert_eq!(value.numeric, Some(61.0));
        assert!(value.is_hex);
    }

    #[test]
    fn test_hex_with_embedded_spaces() {
        let value = normalize("00 3D", &hex_criterion());
        assert_eq!(value.numeric, Some(61.0));
        assert!(value.is_hex);
    }

    #[test]
    fn test_digit_only_token_stays_decimal_without_hex_criterion() {
        // "1234" is valid hex too, but nothing asks for hex
        let value = normalize("1234", &decimal_criterion());
        assert_eq!(value.numeric, Some(1234.0));
        assert!(!value.is_hex);
    }

    #[test]
    fn test_hex_looking_token_parses_hex_even_without_hex_criterion() {
        let value = normalize("3D", &decimal_criterion());
        assert_eq!(value.numeric, Some(61.0));
        assert!(value.is_hex);
    }

    #[test]
    fn test_non_numeric_value() {
        let value = normalize("READY", &decimal_criterion());
        assert!(value.numeric.is_none());
        assert_eq!(value.normalized, "ready");
    }
}
