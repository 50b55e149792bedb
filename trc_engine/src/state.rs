//! Per-file parameter state store
//!
//! Tracks the most recent numeric value recorded for each parameter label,
//! feeding greater-than-previous criteria later in the same file. State
//! never crosses file boundaries.

use crate::config::constants::compile_time::resolution::MAX_TRACKED_PARAMETERS;
use std::collections::HashMap;

/// Canonical form of a parameter label: trimmed, whitespace collapsed,
/// case folded
pub fn canonical_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Parameter label from a value line: the text before the first `=`,
/// with any trailing `S/B` removed since that belongs to the criteria
pub fn extract_param_label(line: &str) -> Option<String> {
    let eq_pos = line.find('=')?;
    let mut label = line[..eq_pos].trim_end();

    let tail_len = "S/B".len();
    if label.len() >= tail_len
        && label.is_char_boundary(label.len() - tail_len)
        && label[label.len() - tail_len..].eq_ignore_ascii_case("S/B")
    {
        label = label[..label.len() - tail_len].trim_end();
    }

    let canonical = canonical_label(label);
    if canonical.is_empty() {
        None
    } else {
        Some(canonical)
    }
}

/// Last recorded numeric value per canonical parameter label
#[derive(Debug, Default)]
pub struct ParameterState {
    values: HashMap<String, f64>,
}

impl ParameterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value under a canonical label, overwriting any earlier one.
    /// Silently drops new labels past the tracking limit.
    pub fn record(&mut self, label: &str, value: f64) {
        let key = canonical_label(label);
        if key.is_empty() {
            return;
        }
        if self.values.len() >= MAX_TRACKED_PARAMETERS && !self.values.contains_key(&key) {
            return;
        }
        self.values.insert(key, value);
    }

    /// Last recorded value for a label, if any
    pub fn last(&self, label: &str) -> Option<f64> {
        self.values.get(&canonical_label(label)).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_label_folding() {
        assert_eq!(canonical_label("  mp  214 "), "MP 214");
        assert_eq!(canonical_label("MP 214"), "MP 214");
        assert_eq!(canonical_label("mp\t214"), "MP 214");
        assert_eq!(canonical_label(""), "");
    }

    #[test]
    fn test_extract_param_label() {
        assert_eq!(
            extract_param_label("MP 214 = 27535"),
            Some("MP 214".to_string())
        );
        assert_eq!(
            extract_param_label("  mp 214  =  27535  PASS/FAIL"),
            Some("MP 214".to_string())
        );
        assert_eq!(extract_param_label("no equals here"), None);
        assert_eq!(extract_param_label("= 5"), None);
    }

    #[test]
    fn test_extract_param_label_strips_sb() {
        // The S/B token marks criteria, not part of the parameter name
        assert_eq!(
            extract_param_label("MP 285 S/B = VEN2.01/02"),
            Some("MP 285".to_string())
        );
        assert_eq!(
            extract_param_label("MP 285 s/b = VEN2.01/02"),
            Some("MP 285".to_string())
        );
    }

    #[test]
    fn test_record_and_lookup() {
        let mut state = ParameterState::new();
        assert!(state.last("MP 214").is_none());

        state.record("mp 214", 100.0);
        assert_eq!(state.last("MP  214"), Some(100.0));

        // Later occurrence overwrites
        state.record("MP 214", 250.0);
        assert_eq!(state.last("mp 214"), Some(250.0));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_labels_are_isolated() {
        let mut state = ParameterState::new();
        state.record("MP 1", 1.0);
        state.record("MP 2", 2.0);
        assert_eq!(state.last("MP 1"), Some(1.0));
        assert_eq!(state.last("MP 2"), Some(2.0));
        assert_eq!(state.len(), 2);
    }
}
