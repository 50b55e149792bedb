//! Criteria classifier
//!
//! Turns raw S/B criteria text into a [`Criterion`] through a strict,
//! ordered grammar. The first matching rule wins; the order below is
//! load-bearing and must not be rearranged.
//!
//! 1. `= <token>` cross-reference (letters) or literal (digits)
//! 2. `in range of A to B and C to D` dual octet ranges
//! 3. `<min> to <max>` / bare numeric `<min> - <max>` range
//! 4. `greater than previous <label>`
//! 5. `> <threshold>`
//! 6. `<target> +/- <tolerance>`
//! 7. `... May be <members>`
//! 8. member list joined by `or` / commas
//! 9. exact literal match

use crate::config::constants::compile_time::resolution::{
    MAX_CRITERIA_LENGTH, MAX_SET_EXPANSION,
};
use crate::state::canonical_label;
use crate::types::{Criterion, RangeBase, RangeBounds};
use regex::Regex;
use std::sync::OnceLock;

static DUAL_RANGE_RE: OnceLock<Regex> = OnceLock::new();
static BARE_DASH_RANGE_RE: OnceLock<Regex> = OnceLock::new();
static TO_RANGE_RE: OnceLock<Regex> = OnceLock::new();
static PREVIOUS_RE: OnceLock<Regex> = OnceLock::new();
static GREATER_THAN_RE: OnceLock<Regex> = OnceLock::new();
static TOLERANCE_RE: OnceLock<Regex> = OnceLock::new();
static MAY_BE_RE: OnceLock<Regex> = OnceLock::new();
static SET_SPLIT_RE: OnceLock<Regex> = OnceLock::new();
static SET_RANGE_TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn dual_range_re() -> &'static Regex {
    DUAL_RANGE_RE.get_or_init(|| {
        Regex::new(r"(?i)in\s+range\s+of\s+(\d+)\s*(?:to|-)\s*(\d+)\s+and\s+(\d+)\s*(?:to|-)\s*(\d+)")
            .expect("static pattern")
    })
}

fn bare_dash_range_re() -> &'static Regex {
    BARE_DASH_RANGE_RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*-\s*([+-]?\d+(?:\.\d+)?)\s*$")
            .expect("static pattern")
    })
}

fn to_range_re() -> &'static Regex {
    TO_RANGE_RE.get_or_init(|| Regex::new(r"(?i)^\s*(\S+)\s+to\s+(\S+)").expect("static pattern"))
}

fn previous_re() -> &'static Regex {
    PREVIOUS_RE.get_or_init(|| {
        Regex::new(r"(?i)greater\s+than\s+previous\s+(.+)$").expect("static pattern")
    })
}

fn greater_than_re() -> &'static Regex {
    GREATER_THAN_RE
        .get_or_init(|| Regex::new(r">\s*([+-]?\d+(?:\.\d+)?)").expect("static pattern"))
}

fn tolerance_re() -> &'static Regex {
    TOLERANCE_RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*([+-]?\d+(?:\.\d+)?)\s*(?:[a-z%]+\s*)?(?:\+/-|±)\s*([+-]?\d+(?:\.\d+)?)")
            .expect("static pattern")
    })
}

fn may_be_re() -> &'static Regex {
    MAY_BE_RE.get_or_init(|| Regex::new(r"(?i)may\s+be\s+(.+)$").expect("static pattern"))
}

fn set_split_re() -> &'static Regex {
    SET_SPLIT_RE
        .get_or_init(|| Regex::new(r"(?i)\s*,\s*|\s+or\s+").expect("static pattern"))
}

fn set_range_token_re() -> &'static Regex {
    SET_RANGE_TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?i)^([\w.]+)\s*(?:-+\s*|\s+to\s+)([\w.]+)$").expect("static pattern")
    })
}

/// Classify criteria text into a criterion. Never fails: text matching no
/// rule becomes [`Criterion::Unclassified`] (empty text) or an exact-match
/// literal.
pub fn classify(criteria_text: &str) -> Criterion {
    let text = criteria_text.trim();
    if text.is_empty() || text.len() > MAX_CRITERIA_LENGTH {
        return Criterion::Unclassified;
    }

    // Rule 1: leading '=' points at another parameter or a literal
    if let Some(rest) = text.strip_prefix('=') {
        let token = rest.trim();
        if token.is_empty() {
            return Criterion::Unclassified;
        }
        if token.chars().any(|c| c.is_ascii_alphabetic()) {
            return Criterion::CrossReference {
                label: token.to_string(),
            };
        }
        return Criterion::ExactMatch {
            literal: token.to_string(),
        };
    }

    // Rule 2: dual octet ranges, optionally with literal alternatives
    if text.to_lowercase().contains("in range of") {
        if let Some(criterion) = parse_dual_range(text) {
            return criterion;
        }
    }

    // Rule 3: inclusive range
    if let Some(criterion) = parse_range(text) {
        return criterion;
    }

    // Rule 4: strictly greater than the previous value of a parameter
    if let Some(caps) = previous_re().captures(text) {
        return Criterion::GreaterThanPrevious {
            label: canonical_label(&caps[1]),
        };
    }

    // Rule 5: strictly greater than a threshold
    if text.contains('>') {
        if let Some(caps) = greater_than_re().captures(text) {
            if let Ok(threshold) = caps[1].parse::<f64>() {
                return Criterion::GreaterThan { threshold };
            }
        }
    }

    // Rule 6: tolerance band
    if text.contains("+/-") || text.contains('±') {
        if let Some(caps) = tolerance_re().captures(text) {
            if let (Ok(target), Ok(tolerance)) =
                (caps[1].parse::<f64>(), caps[2].parse::<f64>())
            {
                return Criterion::Tolerance { target, tolerance };
            }
        }
    }

    // Rule 7: "May be" set, members taken from the text after the phrase
    if let Some(caps) = may_be_re().captures(text) {
        return parse_set(&caps[1]);
    }

    // Rule 8: member list
    let lowered = text.to_lowercase();
    if lowered.contains(" or ") || text.contains(',') {
        return parse_set(text);
    }

    // Rule 9: exact literal
    Criterion::ExactMatch {
        literal: text.to_string(),
    }
}

/// `in range of A to B and C to D [or ALT ...]`
fn parse_dual_range(text: &str) -> Option<Criterion> {
    let caps = dual_range_re().captures(text)?;

    let a = caps[1].parse::<i64>().ok()?;
    let b = caps[2].parse::<i64>().ok()?;
    let c = caps[3].parse::<i64>().ok()?;
    let d = caps[4].parse::<i64>().ok()?;

    let tail = &text[caps.get(0)?.end()..];
    let alternatives: Vec<String> = set_split_re()
        .split(tail)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect();

    Some(Criterion::ComplexRange {
        first: (a, b),
        second: (c, d),
        alternatives,
    })
}

/// Bare numeric dash range or `<min> to <max>`; the "May be" phrase is
/// handled later by rule 7
fn parse_range(text: &str) -> Option<Criterion> {
    if let Some(caps) = bare_dash_range_re().captures(text) {
        return Some(Criterion::Range(RangeBounds::new(
            &caps[1],
            &caps[2],
            RangeBase::Decimal,
        )));
    }

    if text.to_lowercase().contains("may be") {
        return None;
    }

    let caps = to_range_re().captures(text)?;
    let min = caps[1].to_string();
    let max = caps[2].to_string();
    let base = determine_range_base(&min, &max);
    Some(Criterion::Range(RangeBounds { min, max, base }))
}

/// Decimal when both bounds parse as decimal numbers, hex when both parse
/// as hex words, lexicographic text otherwise
pub fn determine_range_base(min: &str, max: &str) -> RangeBase {
    let decimal = min.parse::<f64>().is_ok() && max.parse::<f64>().is_ok();
    if decimal {
        return RangeBase::Decimal;
    }

    let hexy = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit());
    if hexy(min) && hexy(max) {
        return RangeBase::Hex;
    }

    RangeBase::Text
}

/// Member list split on `or` and commas. Integer sub-ranges expand into
/// members; non-integer sub-ranges stay as companion ranges; the word
/// `blank` allows a blank value; all-X placeholder echoes are dropped.
fn parse_set(text: &str) -> Criterion {
    let mut members = Vec::new();
    let mut ranges = Vec::new();
    let mut allow_blank = false;

    for token in set_split_re().split(text) {
        let token = token.trim().trim_end_matches('.');
        if token.is_empty() {
            continue;
        }

        if token.trim_matches(|c| c == '(' || c == ')').eq_ignore_ascii_case("blank") {
            allow_blank = true;
            continue;
        }

        if token.chars().all(|c| c.eq_ignore_ascii_case(&'X')) {
            continue;
        }

        if let Some(caps) = set_range_token_re().captures(token) {
            let min = caps[1].to_string();
            let max = caps[2].to_string();
            match (min.parse::<i64>(), max.parse::<i64>()) {
                (Ok(a), Ok(b)) if a <= b && (b - a) as usize <= MAX_SET_EXPANSION => {
                    for v in a..=b {
                        members.push(v.to_string());
                    }
                }
                _ => {
                    let base = determine_range_base(&min, &max);
                    ranges.push(RangeBounds { min, max, base });
                }
            }
            continue;
        }

        members.push(token.to_string());
    }

    if members.is_empty() && ranges.is_empty() && !allow_blank {
        return Criterion::Unclassified;
    }

    Criterion::Set {
        members,
        ranges,
        allow_blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_cross_reference() {
        assert_eq!(
            classify("= VEN2.01/02"),
            Criterion::CrossReference {
                label: "VEN2.01/02".to_string()
            }
        );
    }

    #[test]
    fn test_numeric_reference_is_exact_match() {
        assert_eq!(
            classify("= 30000"),
            Criterion::ExactMatch {
                literal: "30000".to_string()
            }
        );
    }

    #[test]
    fn test_dual_range() {
        let criterion = classify("in range of 192 to 223 and 0 to 255");
        assert_eq!(
            criterion,
            Criterion::ComplexRange {
                first: (192, 223),
                second: (0, 255),
                alternatives: vec![],
            }
        );
    }

    #[test]
    fn test_dual_range_with_alternative() {
        let criterion = classify("In range of 1 to 223 and 0 to 255 or NONE");
        assert_eq!(
            criterion,
            Criterion::ComplexRange {
                first: (1, 223),
                second: (0, 255),
                alternatives: vec!["NONE".to_string()],
            }
        );
    }

    #[test]
    fn test_decimal_range() {
        assert_eq!(
            classify("10 to 90"),
            Criterion::Range(RangeBounds::new("10", "90", RangeBase::Decimal))
        );
    }

    #[test]
    fn test_bare_dash_range() {
        assert_eq!(
            classify("0.5 - 9.9"),
            Criterion::Range(RangeBounds::new("0.5", "9.9", RangeBase::Decimal))
        );
    }

    #[test]
    fn test_hex_range() {
        assert_eq!(
            classify("0000 to FFFF"),
            Criterion::Range(RangeBounds::new("0000", "FFFF", RangeBase::Hex))
        );
    }

    #[test]
    fn test_text_range() {
        assert_eq!(
            classify("AAAA to ZZZZ"),
            Criterion::Range(RangeBounds::new("AAAA", "ZZZZ", RangeBase::Text))
        );
    }

    #[test]
    fn test_range_with_unit_suffix() {
        assert_eq!(
            classify("10 to 90 PSI"),
            Criterion::Range(RangeBounds::new("10", "90", RangeBase::Decimal))
        );
    }

    #[test]
    fn test_greater_than_previous() {
        assert_eq!(
            classify("Greater than previous MP 214"),
            Criterion::GreaterThanPrevious {
                label: "MP 214".to_string()
            }
        );
    }

    #[test]
    fn test_greater_than() {
        assert_eq!(classify("> 100"), Criterion::GreaterThan { threshold: 100.0 });
        assert_eq!(
            classify("value > 2.5 expected"),
            Criterion::GreaterThan { threshold: 2.5 }
        );
    }

    #[test]
    fn test_tolerance() {
        assert_eq!(
            classify("27535 +/- 5"),
            Criterion::Tolerance {
                target: 27535.0,
                tolerance: 5.0
            }
        );
    }

    #[test]
    fn test_tolerance_with_unit() {
        assert_eq!(
            classify("100 Hz +/- 5"),
            Criterion::Tolerance {
                target: 100.0,
                tolerance: 5.0
            }
        );
    }

    #[test]
    fn test_may_be_set_with_expansion() {
        let criterion = classify("X May be 1 - 3, A or B");
        match criterion {
            Criterion::Set {
                members,
                ranges,
                allow_blank,
            } => {
                assert_eq!(members, vec!["1", "2", "3", "A", "B"]);
                assert!(ranges.is_empty());
                assert!(!allow_blank);
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_may_be_wins_over_to_range() {
        // "to" appears, but the "May be" wrapper owns the text
        let criterion = classify("X May be 0 to 3 or 9");
        assert_matches!(criterion, Criterion::Set { .. });
    }

    #[test]
    fn test_may_be_set_keeps_non_integer_range() {
        let criterion = classify("May be 0.5 - 9.9 or NONE");
        match criterion {
            Criterion::Set {
                members, ranges, ..
            } => {
                assert_eq!(members, vec!["NONE"]);
                assert_eq!(
                    ranges,
                    vec![RangeBounds::new("0.5", "9.9", RangeBase::Decimal)]
                );
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_or_set() {
        let criterion = classify("ON or OFF");
        match criterion {
            Criterion::Set { members, .. } => assert_eq!(members, vec!["ON", "OFF"]),
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_set_with_blank() {
        let criterion = classify("0 or blank");
        match criterion {
            Criterion::Set {
                members,
                allow_blank,
                ..
            } => {
                assert_eq!(members, vec!["0"]);
                assert!(allow_blank);
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_placeholder_tokens_dropped() {
        let criterion = classify("May be XX, 1 or 2");
        match criterion {
            Criterion::Set { members, .. } => assert_eq!(members, vec!["1", "2"]),
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_match_fallback() {
        assert_eq!(
            classify("READY"),
            Criterion::ExactMatch {
                literal: "READY".to_string()
            }
        );
    }

    #[test]
    fn test_empty_is_unclassified() {
        assert_eq!(classify(""), Criterion::Unclassified);
        assert_eq!(classify("   "), Criterion::Unclassified);
    }

    #[test]
    fn test_oversized_criteria_is_unclassified() {
        let text = "A".repeat(2_000);
        assert_eq!(classify(&text), Criterion::Unclassified);
    }

    #[test]
    fn test_first_match_wins_order() {
        // Leading '=' wins even though the rest could read as a range
        assert_matches!(classify("= 10 to 90"), Criterion::CrossReference { .. });
        // Tolerance text containing '>' still classifies by the '>' rule first
        assert_matches!(classify("> 5 +/- 1"), Criterion::GreaterThan { .. });
    }
}
