//! Criterion evaluation
//!
//! Applies a classified [`Criterion`] to a normalized [`MeasuredValue`] and
//! produces a [`Verdict`]. Comparisons are inclusive for ranges and
//! tolerances, strict for greater-than shapes. A value that cannot be
//! parsed for a numeric criterion is a FAIL, not an unresolved marker.

use crate::config::constants::compile_time::resolution::{
    MAX_OCTET_WIDTH, REFERENCE_SEARCH_WINDOW,
};
use crate::lines::{is_anchor, strip_marker, LineBuffer};
use crate::log_error;
use crate::logging::codes;
use crate::normalizer::{normalize_text, parse_hex};
use crate::state::{canonical_label, extract_param_label, ParameterState};
use crate::types::{looks_hex, Criterion, MeasuredValue, RangeBase, RangeBounds, Verdict};

/// Surroundings of the instance being evaluated, for criteria that look
/// back at earlier lines
pub struct EvaluationContext<'a> {
    pub buffer: &'a LineBuffer,
    /// 1-based line number the measured value came from
    pub value_line: usize,
}

/// Evaluate a criterion against a measured value
pub fn evaluate(
    criterion: &Criterion,
    value: &MeasuredValue,
    ctx: &EvaluationContext<'_>,
    state: &ParameterState,
) -> Verdict {
    match criterion {
        Criterion::ExactMatch { literal } => {
            if value.is_blank {
                let literal = literal.trim();
                return pass_fail(literal.is_empty() || literal.eq_ignore_ascii_case("blank"));
            }
            pass_fail(tokens_equal(value, literal))
        }

        Criterion::Tolerance { target, tolerance } => match value.numeric {
            Some(v) => pass_fail((v - target).abs() <= *tolerance),
            None => {
                log_value_parse_failure(ctx, value, "tolerance");
                Verdict::Fail
            }
        },

        Criterion::Range(bounds) => evaluate_range(bounds, value, ctx),

        Criterion::GreaterThan { threshold } => match value.numeric {
            Some(v) => pass_fail(v > *threshold),
            None => {
                log_value_parse_failure(ctx, value, "greater_than");
                Verdict::Fail
            }
        },

        Criterion::GreaterThanPrevious { label } => match value.numeric {
            Some(v) => match state.last(label) {
                // First occurrence has nothing to beat
                None => Verdict::Pass,
                Some(prev) => pass_fail(v > prev),
            },
            None => {
                log_value_parse_failure(ctx, value, "greater_than_previous");
                Verdict::Fail
            }
        },

        Criterion::Set {
            members,
            ranges,
            allow_blank,
        } => evaluate_set(members, ranges, *allow_blank, value, ctx),

        Criterion::ComplexRange {
            first,
            second,
            alternatives,
        } => evaluate_complex_range(*first, *second, alternatives, value),

        Criterion::CrossReference { label } => evaluate_cross_reference(label, value, ctx),

        Criterion::Unclassified => Verdict::Unchanged,
    }
}

fn pass_fail(passed: bool) -> Verdict {
    if passed {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

fn log_value_parse_failure(ctx: &EvaluationContext<'_>, value: &MeasuredValue, kind: &str) {
    log_error!(
        codes::evaluation::VALUE_PARSE_FAILURE,
        "Measured value is not numeric",
        line = ctx.value_line,
        "value" => value,
        "criterion" => kind
    );
}

// ============================================================================
// TOKEN COMPARISON
// ============================================================================

/// Numeric reading of a criterion token, hex-first when the value was hex
fn token_numeric(token: &str, prefer_hex: bool) -> Option<f64> {
    if prefer_hex || looks_hex(token) {
        if let Some(v) = parse_hex(token) {
            return Some(v as f64);
        }
    }
    token.trim().parse::<f64>().ok()
}

/// Normalized string equality, falling back to numeric equality so that
/// "07" matches "7" and "003d" matches "3D"
fn tokens_equal(value: &MeasuredValue, token: &str) -> bool {
    if value.is_blank {
        return token.trim().is_empty();
    }
    if value.normalized == normalize_text(token) {
        return true;
    }
    match (value.numeric, token_numeric(token, value.is_hex)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

// ============================================================================
// RANGES
// ============================================================================

fn evaluate_range(
    bounds: &RangeBounds,
    value: &MeasuredValue,
    ctx: &EvaluationContext<'_>,
) -> Verdict {
    match bounds.base {
        RangeBase::Decimal => {
            let (min, max) = match (bounds.min.parse::<f64>(), bounds.max.parse::<f64>()) {
                (Ok(min), Ok(max)) => (min, max),
                _ => {
                    log_error!(
                        codes::evaluation::MALFORMED_RANGE,
                        "Range bounds are not decimal numbers",
                        line = ctx.value_line,
                        "min" => bounds.min,
                        "max" => bounds.max
                    );
                    return Verdict::Fail;
                }
            };
            match value.numeric {
                Some(v) => pass_fail(min <= v && v <= max),
                None => {
                    log_value_parse_failure(ctx, value, "range");
                    Verdict::Fail
                }
            }
        }

        RangeBase::Hex => {
            let (min, max) = match (parse_hex(&bounds.min), parse_hex(&bounds.max)) {
                (Some(min), Some(max)) => (min, max),
                _ => {
                    log_error!(
                        codes::evaluation::MALFORMED_RANGE,
                        "Range bounds are not hex words",
                        line = ctx.value_line,
                        "min" => bounds.min,
                        "max" => bounds.max
                    );
                    return Verdict::Fail;
                }
            };
            let v = if value.is_hex {
                value.numeric.map(|v| v as i64)
            } else {
                parse_hex(&value.normalized)
            };
            match v {
                Some(v) => pass_fail(min <= v && v <= max),
                None => {
                    log_value_parse_failure(ctx, value, "hex_range");
                    Verdict::Fail
                }
            }
        }

        RangeBase::Text => {
            // Lexicographic compare only makes sense over equal widths
            let v = value.normalized.as_str();
            let min = normalize_text(&bounds.min);
            let max = normalize_text(&bounds.max);
            if v.len() != min.len() || v.len() != max.len() {
                return Verdict::Fail;
            }
            pass_fail(min.as_str() <= v && v <= max.as_str())
        }
    }
}

// ============================================================================
// SETS
// ============================================================================

fn evaluate_set(
    members: &[String],
    ranges: &[RangeBounds],
    allow_blank: bool,
    value: &MeasuredValue,
    ctx: &EvaluationContext<'_>,
) -> Verdict {
    if value.is_blank {
        return pass_fail(allow_blank);
    }

    if members.iter().any(|m| tokens_equal(value, m)) {
        return Verdict::Pass;
    }

    for bounds in ranges {
        if evaluate_range(bounds, value, ctx) == Verdict::Pass {
            return Verdict::Pass;
        }
    }

    Verdict::Fail
}

// ============================================================================
// DUAL OCTET RANGES
// ============================================================================

/// Split a digit string into two octet groups of width 1 to 3 each and
/// check both against their ranges. Narrower first groups are tried first.
fn evaluate_complex_range(
    first: (i64, i64),
    second: (i64, i64),
    alternatives: &[String],
    value: &MeasuredValue,
) -> Verdict {
    if alternatives
        .iter()
        .any(|alt| value.normalized == normalize_text(alt))
    {
        return Verdict::Pass;
    }

    let compact: String = value.raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_digit()) {
        return Verdict::Fail;
    }

    let len = compact.len();
    for w1 in 1..=MAX_OCTET_WIDTH {
        if w1 >= len {
            break;
        }
        let w2 = len - w1;
        if w2 > MAX_OCTET_WIDTH {
            continue;
        }
        let (head, tail) = compact.split_at(w1);
        let (a, b) = match (head.parse::<i64>(), tail.parse::<i64>()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => continue,
        };
        if first.0 <= a && a <= first.1 && second.0 <= b && b <= second.1 {
            return Verdict::Pass;
        }
    }

    Verdict::Fail
}

// ============================================================================
// CROSS REFERENCES
// ============================================================================

/// Look back for `<label> = <value>` and compare after leading-zero
/// normalization in the common base. A criterion label that is itself a
/// number compares directly when no labeled line exists.
fn evaluate_cross_reference(
    label: &str,
    value: &MeasuredValue,
    ctx: &EvaluationContext<'_>,
) -> Verdict {
    let wanted = canonical_label(label);
    let lowest = ctx.value_line.saturating_sub(REFERENCE_SEARCH_WINDOW).max(1);

    for index in (lowest..ctx.value_line).rev() {
        let line = match ctx.buffer.text(index) {
            Some(line) => line,
            None => continue,
        };
        let content = if is_anchor(line) { strip_marker(line) } else { line };
        if content.to_uppercase().contains("S/B") {
            continue;
        }
        if extract_param_label(content).as_deref() != Some(wanted.as_str()) {
            continue;
        }
        let reference = match content.find('=') {
            Some(pos) => content[pos + 1..].trim(),
            None => continue,
        };
        return pass_fail(reference_equal(value, reference));
    }

    // A purely numeric "reference" is a literal comparison
    if let Ok(literal) = label.trim().parse::<f64>() {
        return match value.numeric {
            Some(v) => pass_fail(v == literal),
            None => Verdict::Fail,
        };
    }

    log_error!(
        codes::evaluation::REFERENCE_NOT_FOUND,
        "Cross-referenced parameter not found",
        line = ctx.value_line,
        "label" => label,
        "window" => REFERENCE_SEARCH_WINDOW
    );
    Verdict::Fail
}

/// Equality that forgives leading zeros when both sides read in a common
/// base: hex first when either side looks hex, decimal otherwise
fn reference_equal(value: &MeasuredValue, reference: &str) -> bool {
    if value.is_blank {
        return reference.is_empty();
    }

    if value.normalized == normalize_text(reference) {
        return true;
    }

    let either_hex = value.is_hex || looks_hex(&value.raw) || looks_hex(reference);
    if either_hex {
        let lhs = parse_hex(&value.raw);
        let rhs = parse_hex(reference);
        if let (Some(a), Some(b)) = (lhs, rhs) {
            return a == b;
        }
    }

    match (value.numeric, reference.trim().parse::<f64>()) {
        (Some(a), Ok(b)) => a == b,
        _ => false,
    }
}
