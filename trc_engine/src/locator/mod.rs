//! Context locator
//!
//! Given an anchor line carrying a pending marker, finds the value line
//! (the `=` assignment the marker refers to) and the S/B criteria line,
//! within fixed backward windows. Both searches walk upward from the
//! nearest candidate, never forward past the anchor.

mod error;

pub use error::LocateError;

use crate::config::constants::compile_time::resolution::{
    CRITERIA_SEARCH_WINDOW, REFERENCE_SEARCH_WINDOW, VALUE_SEARCH_WINDOW,
};
use crate::lines::{is_anchor, strip_marker, LineBuffer};
use crate::state::{canonical_label, extract_param_label};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static CRITERIA_RE: OnceLock<Regex> = OnceLock::new();
static CRITERIA_PARAM_RE: OnceLock<Regex> = OnceLock::new();

/// `S/B` followed by the criteria text, anywhere in the line
fn criteria_re() -> &'static Regex {
    CRITERIA_RE.get_or_init(|| Regex::new(r"(?i)S/B\s*(.+)$").expect("static pattern"))
}

/// `<param> S/B =` shape where the `=` opens the criteria, not a value
fn criteria_param_re() -> &'static Regex {
    CRITERIA_PARAM_RE.get_or_init(|| Regex::new(r"(?i)^(.+?)\s+S/B\s*=").expect("static pattern"))
}

/// Everything the evaluator needs about one pending marker's surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedContext {
    /// 1-based line number carrying the `=` assignment
    pub value_line: usize,
    /// Text captured after the `=`, untrimmed of meaning but
    /// stripped of the marker decoration
    pub raw_value_text: String,
    /// 1-based line number the criteria text came from
    pub criteria_line: usize,
    /// Criteria text captured after `S/B`
    pub criteria_text: String,
}

/// Locate the value and criteria context for the marker at `anchor_line`
pub fn locate(buffer: &LineBuffer, anchor_line: usize) -> Result<LocatedContext, LocateError> {
    locate_excluding(buffer, anchor_line, &HashSet::new())
}

/// Locate the context for the marker at `anchor_line`, skipping value
/// lines already claimed by earlier markers
pub fn locate_excluding(
    buffer: &LineBuffer,
    anchor_line: usize,
    claimed_value_lines: &HashSet<usize>,
) -> Result<LocatedContext, LocateError> {
    let (value_line, raw_value_text) = find_value_line(buffer, anchor_line, claimed_value_lines)?;
    let (criteria_line, criteria_text) = find_criteria_line(buffer, anchor_line, value_line)?;

    Ok(LocatedContext {
        value_line,
        raw_value_text,
        criteria_line,
        criteria_text,
    })
}

/// Content of a line with marker decoration removed when it is an anchor
fn content(buffer: &LineBuffer, index: usize) -> Option<&str> {
    buffer.text(index).map(|line| {
        if is_anchor(line) {
            strip_marker(line)
        } else {
            line
        }
    })
}

/// Case-insensitive `S/B` containment, used to keep criteria lines out of
/// the value search
fn contains_sb(line: &str) -> bool {
    line.to_uppercase().contains("S/B")
}

/// The anchor line itself when it carries a plain `=` assignment,
/// otherwise the nearest unclaimed `=` line inside the value window.
/// An anchor whose `=` opens an `S/B =` criteria holds no value of its
/// own; the value comes from the named parameter's earlier assignment.
fn find_value_line(
    buffer: &LineBuffer,
    anchor_line: usize,
    claimed: &HashSet<usize>,
) -> Result<(usize, String), LocateError> {
    let anchor_content =
        content(buffer, anchor_line).ok_or(LocateError::ValueLineNotFound {
            anchor_line,
            window: VALUE_SEARCH_WINDOW,
        })?;

    if let Some(param) = criteria_param(anchor_content) {
        return find_referenced_value_line(buffer, anchor_line, &param);
    }

    if anchor_content.contains('=') && !contains_sb(anchor_content) {
        let raw = extract_value_text(anchor_content, anchor_line)?;
        return Ok((anchor_line, raw));
    }

    let lowest = anchor_line.saturating_sub(VALUE_SEARCH_WINDOW).max(1);
    for index in (lowest..anchor_line).rev() {
        if claimed.contains(&index) {
            continue;
        }
        if let Some(line) = content(buffer, index) {
            if line.contains('=') && !contains_sb(line) {
                let raw = extract_value_text(line, index)?;
                return Ok((index, raw));
            }
        }
    }

    Err(LocateError::ValueLineNotFound {
        anchor_line,
        window: VALUE_SEARCH_WINDOW,
    })
}

/// Parameter named by an anchor that carries its own `S/B =` criteria
fn criteria_param(content_text: &str) -> Option<String> {
    criteria_param_re()
        .captures(content_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// The parameter's own `<param> = <value>` line, inside the reference
/// window, skipping criteria lines
fn find_referenced_value_line(
    buffer: &LineBuffer,
    anchor_line: usize,
    param: &str,
) -> Result<(usize, String), LocateError> {
    let wanted = canonical_label(param);
    let lowest = anchor_line.saturating_sub(REFERENCE_SEARCH_WINDOW).max(1);
    for index in (lowest..anchor_line).rev() {
        let line = match content(buffer, index) {
            Some(line) => line,
            None => continue,
        };
        if contains_sb(line) || !line.contains('=') {
            continue;
        }
        if extract_param_label(line).as_deref() != Some(wanted.as_str()) {
            continue;
        }
        let raw = extract_value_text(line, index)?;
        return Ok((index, raw));
    }

    Err(LocateError::ValueLineNotFound {
        anchor_line,
        window: REFERENCE_SEARCH_WINDOW,
    })
}

/// Text after the first `=`, trimmed. Empty text is a legitimate blank value.
fn extract_value_text(line: &str, value_line: usize) -> Result<String, LocateError> {
    match line.find('=') {
        Some(pos) => Ok(line[pos + 1..].trim().to_string()),
        None => Err(LocateError::ValueExtractionFailed { value_line }),
    }
}

/// Nearest S/B line at or above the anchor, inside the criteria window.
/// The anchor line itself counts: an `S/B =` criteria can sit right on
/// the marker line. A short placeholder criteria ("X", "XX") is replaced
/// by a `May be` continuation on the following line when one exists.
fn find_criteria_line(
    buffer: &LineBuffer,
    anchor_line: usize,
    value_line: usize,
) -> Result<(usize, String), LocateError> {
    let lowest = anchor_line.saturating_sub(CRITERIA_SEARCH_WINDOW).max(1);
    for index in (lowest..=anchor_line).rev() {
        let line = match content(buffer, index) {
            Some(line) => line,
            None => continue,
        };

        let captured = criteria_re()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());

        let text = match captured {
            Some(text) if !text.is_empty() => text,
            _ => continue,
        };

        if index < anchor_line {
            if let Some(continuation) = placeholder_continuation(buffer, index, &text) {
                return Ok((index + 1, continuation));
            }
        }

        return Ok((index, text));
    }

    Err(LocateError::CriteriaLineNotFound {
        anchor_line,
        value_line,
        window: CRITERIA_SEARCH_WINDOW,
    })
}

/// For placeholder criteria, the `May be ...` line immediately below the
/// S/B line carries the real criteria text
fn placeholder_continuation(
    buffer: &LineBuffer,
    criteria_line: usize,
    criteria_text: &str,
) -> Option<String> {
    let is_placeholder = !criteria_text.is_empty()
        && criteria_text.len() <= 2
        && criteria_text.chars().all(|c| c.is_ascii_alphabetic());
    if !is_placeholder {
        return None;
    }

    let next = buffer.text(criteria_line + 1)?;
    if next.to_lowercase().contains("may be") {
        Some(next.trim().to_string())
    } else {
        None
    }
}
