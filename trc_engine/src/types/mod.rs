//! Core data types for marker resolution
//!
//! A pending `PASS/FAIL` marker becomes an [`Instance`]: the located context
//! around the marker, the classified [`Criterion`], the normalized
//! [`MeasuredValue`], and finally a [`Verdict`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal marker token left by the test equipment for a human to resolve
pub const PENDING_MARKER: &str = "PASS/FAIL";

// ============================================================================
// VERDICTS
// ============================================================================

/// Final outcome for a pending marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
    /// Marker left in place; context could not be located or classified
    Unchanged,
}

impl Verdict {
    /// Replacement text written into the output line
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Unchanged => PENDING_MARKER,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Verdict::Unchanged)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CRITERIA
// ============================================================================

/// Interpretation base for range bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBase {
    Decimal,
    Hex,
    /// Equal-length lexicographic comparison
    Text,
}

impl RangeBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeBase::Decimal => "decimal",
            RangeBase::Hex => "hex",
            RangeBase::Text => "text",
        }
    }
}

/// Inclusive bounds of a range criterion, kept as raw tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: String,
    pub max: String,
    pub base: RangeBase,
}

impl RangeBounds {
    pub fn new(min: impl Into<String>, max: impl Into<String>, base: RangeBase) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            base,
        }
    }
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {} ({})", self.min, self.max, self.base.as_str())
    }
}

/// One parsed `S/B` acceptance criterion
///
/// Produced by the classifier from criteria text; consumed by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Criterion {
    /// `= <label>` pointing at another parameter's recorded value
    CrossReference { label: String },

    /// Dual octet ranges with optional literal alternatives,
    /// e.g. "in range of 192 to 223 and 0 to 255 or NONE"
    ComplexRange {
        first: (i64, i64),
        second: (i64, i64),
        alternatives: Vec<String>,
    },

    /// Inclusive `<min> to <max>` or `<min> - <max>` range
    Range(RangeBounds),

    /// Value must strictly exceed the previously recorded value of a parameter
    GreaterThanPrevious { label: String },

    /// Value must strictly exceed a fixed threshold
    GreaterThan { threshold: f64 },

    /// `<target> +/- <tolerance>` inclusive band
    Tolerance { target: f64, tolerance: f64 },

    /// Enumerated acceptable values, optionally with companion ranges
    /// carried over from non-integer sub-tokens
    Set {
        members: Vec<String>,
        ranges: Vec<RangeBounds>,
        allow_blank: bool,
    },

    /// Literal comparison against the whole criteria text
    ExactMatch { literal: String },

    /// Criteria text matched no known shape; marker stays unresolved
    Unclassified,
}

impl Criterion {
    /// Short tag used in log context
    pub fn kind(&self) -> &'static str {
        match self {
            Criterion::CrossReference { .. } => "cross_reference",
            Criterion::ComplexRange { .. } => "complex_range",
            Criterion::Range(_) => "range",
            Criterion::GreaterThanPrevious { .. } => "greater_than_previous",
            Criterion::GreaterThan { .. } => "greater_than",
            Criterion::Tolerance { .. } => "tolerance",
            Criterion::Set { .. } => "set",
            Criterion::ExactMatch { .. } => "exact_match",
            Criterion::Unclassified => "unclassified",
        }
    }

    /// Whether the evaluator treats the measured value as hexadecimal
    pub fn expects_hex(&self) -> bool {
        match self {
            Criterion::Range(bounds) => bounds.base == RangeBase::Hex,
            Criterion::ExactMatch { literal } => looks_hex(literal),
            Criterion::Set { members, .. } => members.iter().any(|m| looks_hex(m)),
            _ => false,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::CrossReference { label } => write!(f, "= {}", label),
            Criterion::ComplexRange {
                first,
                second,
                alternatives,
            } => {
                write!(
                    f,
                    "in range of {} to {} and {} to {}",
                    first.0, first.1, second.0, second.1
                )?;
                for alt in alternatives {
                    write!(f, " or {}", alt)?;
                }
                Ok(())
            }
            Criterion::Range(bounds) => write!(f, "{}", bounds),
            Criterion::GreaterThanPrevious { label } => {
                write!(f, "greater than previous {}", label)
            }
            Criterion::GreaterThan { threshold } => write!(f, "> {}", threshold),
            Criterion::Tolerance { target, tolerance } => {
                write!(f, "{} +/- {}", target, tolerance)
            }
            Criterion::Set { members, .. } => write!(f, "one of {}", members.join(", ")),
            Criterion::ExactMatch { literal } => write!(f, "exactly {}", literal),
            Criterion::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Token is plausibly a hex word: all hex digits with at least one letter
pub fn looks_hex(token: &str) -> bool {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    !compact.is_empty()
        && compact.chars().all(|c| c.is_ascii_hexdigit())
        && compact.chars().any(|c| c.is_ascii_alphabetic())
}

// ============================================================================
// MEASURED VALUES
// ============================================================================

/// A measured value extracted from a value line, in raw and normalized forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredValue {
    /// Text exactly as captured after the `=` sign
    pub raw: String,
    /// Trimmed, case-folded, whitespace-collapsed form used for comparisons
    pub normalized: String,
    /// Numeric interpretation when one exists
    pub numeric: Option<f64>,
    /// Whether `numeric` came from a hexadecimal parse
    pub is_hex: bool,
    /// Raw text was empty or whitespace only
    pub is_blank: bool,
}

impl MeasuredValue {
    pub fn blank() -> Self {
        Self {
            raw: String::new(),
            normalized: String::new(),
            numeric: None,
            is_hex: false,
            is_blank: true,
        }
    }
}

impl fmt::Display for MeasuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank {
            write!(f, "<blank>")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

// ============================================================================
// INSTANCES
// ============================================================================

/// One pending marker and everything learned about it during resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// 1-based line number of the anchor line carrying the marker
    pub anchor_line: usize,
    /// 1-based line number of the value line, once located
    pub value_line: Option<usize>,
    /// Criteria text captured from the S/B line
    pub criteria_text: Option<String>,
    /// Raw value text captured from the value line
    pub raw_value_text: Option<String>,
    /// Classified criterion
    pub criterion: Option<Criterion>,
    /// Normalized measured value
    pub value: Option<MeasuredValue>,
    /// Final outcome
    pub verdict: Verdict,
}

impl Instance {
    pub fn new(anchor_line: usize) -> Self {
        Self {
            anchor_line,
            value_line: None,
            criteria_text: None,
            raw_value_text: None,
            criterion: None,
            value: None,
            verdict: Verdict::Unchanged,
        }
    }
}
