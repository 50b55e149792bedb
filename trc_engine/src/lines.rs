//! Line buffer and marker handling
//!
//! The engine works on whole lines. This module owns marker detection
//! (which lines are anchors), marker stripping (content without the
//! trailing marker decoration), and verdict rewriting.

use crate::types::{Verdict, PENDING_MARKER};
use regex::Regex;
use std::sync::OnceLock;

static MARKER_TAIL_RE: OnceLock<Regex> = OnceLock::new();
static MARKER_REWRITE_RE: OnceLock<Regex> = OnceLock::new();

/// Trailing marker with its decoration: whitespace and asterisks
fn marker_tail_re() -> &'static Regex {
    MARKER_TAIL_RE.get_or_init(|| Regex::new(r"\s*PASS/FAIL[\*\s]*$").expect("static pattern"))
}

/// Marker occurrence with trailing asterisks/spaces, for rewriting
fn marker_rewrite_re() -> &'static Regex {
    MARKER_REWRITE_RE.get_or_init(|| Regex::new(r"PASS/FAIL[\* ]*").expect("static pattern"))
}

/// Whether a line's trailing token (ignoring whitespace and asterisks)
/// is the pending marker
pub fn is_anchor(line: &str) -> bool {
    let trimmed = line.trim_end_matches(|c: char| c.is_whitespace() || c == '*');
    if !trimmed.ends_with(PENDING_MARKER) {
        return false;
    }
    let prefix = &trimmed[..trimmed.len() - PENDING_MARKER.len()];
    prefix.is_empty() || prefix.ends_with(|c: char| c.is_whitespace())
}

/// Line content with the trailing marker and its decoration removed
pub fn strip_marker(line: &str) -> &str {
    match marker_tail_re().find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    }
}

/// Rewrite every marker occurrence in the line with the verdict text
pub fn rewrite_marker(line: &str, verdict: Verdict) -> String {
    marker_rewrite_re()
        .replace_all(line, verdict.as_str())
        .into_owned()
}

/// Owned buffer of file lines with 1-based access
///
/// Line numbers throughout the engine are 1-based to match how operators
/// read the log files.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn from_slice(lines: &[String]) -> Self {
        Self {
            lines: lines.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the 1-based line, if in range
    pub fn text(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.lines.get(index - 1).map(|s| s.as_str())
    }

    /// Replace the 1-based line
    pub fn set(&mut self, index: usize, text: String) {
        if index >= 1 && index <= self.lines.len() {
            self.lines[index - 1] = text;
        }
    }

    /// 1-based numbers of all anchor lines, in file order
    pub fn anchor_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_anchor(line))
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Whether any line carries a pending marker
    pub fn has_pending_markers(&self) -> bool {
        self.lines.iter().any(|line| is_anchor(line))
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
