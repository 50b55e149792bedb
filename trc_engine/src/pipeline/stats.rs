use crate::types::Verdict;
use serde::{Deserialize, Serialize};

/// Per-file tally of marker resolutions
///
/// Line numbers are 1-based anchor lines, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Pending markers found in the file
    pub total: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    /// Markers left unresolved
    pub unchanged_count: usize,
    /// Anchor lines resolved to FAIL
    pub fail_lines: Vec<usize>,
    /// Anchor lines left unresolved
    pub unchanged_lines: Vec<usize>,
}

impl ResolutionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one verdict for the marker anchored at `anchor_line`
    pub fn record(&mut self, verdict: Verdict, anchor_line: usize) {
        self.total += 1;
        match verdict {
            Verdict::Pass => self.pass_count += 1,
            Verdict::Fail => {
                self.fail_count += 1;
                self.fail_lines.push(anchor_line);
            }
            Verdict::Unchanged => {
                self.unchanged_count += 1;
                self.unchanged_lines.push(anchor_line);
            }
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.pass_count + self.fail_count
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.unchanged_count == 0
    }

    /// Fraction of markers resolved, 0.0 for a file with no markers
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.resolved_count() as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_rates() {
        let mut summary = ResolutionSummary::new();
        summary.record(Verdict::Pass, 3);
        summary.record(Verdict::Fail, 7);
        summary.record(Verdict::Unchanged, 12);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.resolved_count(), 2);
        assert_eq!(summary.fail_lines, vec![7]);
        assert_eq!(summary.unchanged_lines, vec![12]);
        assert!(!summary.is_fully_resolved());
        assert!((summary.resolution_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ResolutionSummary::new();
        assert_eq!(summary.resolution_rate(), 0.0);
        assert!(summary.is_fully_resolved());
    }
}
