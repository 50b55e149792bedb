//! Marker resolution pipeline
//!
//! Walks a file's pending markers top to bottom and drives each one
//! through locate, classify, normalize and evaluate, rewriting the
//! marker in place when a verdict is reached. Markers that cannot be
//! located or classified are left untouched.

mod error;
mod result;
mod stats;

pub use error::PipelineError;
pub use result::FileResolution;
pub use stats::ResolutionSummary;

use crate::classifier;
use crate::config::constants::compile_time::resolution::MAX_CRITERIA_LENGTH;
use crate::config::runtime::ResolutionPreferences;
use crate::evaluator::{self, EvaluationContext};
use crate::file_processor;
use crate::lines::{is_anchor, rewrite_marker, strip_marker, LineBuffer};
use crate::locator;
use crate::logging::{self, codes};
use crate::normalizer;
use crate::state::{extract_param_label, ParameterState};
use crate::types::{Criterion, Instance, Verdict};
use crate::{log_debug, log_error, log_info, log_success};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Resolve every pending marker in a set of lines
pub fn resolve_lines(lines: Vec<String>) -> FileResolution {
    resolve_lines_with_preferences(lines, &ResolutionPreferences::default())
}

/// Resolve every pending marker with explicit runtime preferences
pub fn resolve_lines_with_preferences(
    lines: Vec<String>,
    prefs: &ResolutionPreferences,
) -> FileResolution {
    let start_time = Instant::now();
    let mut buffer = LineBuffer::new(lines);
    let mut summary = ResolutionSummary::new();
    let mut instances = Vec::new();
    let mut state = ParameterState::new();
    // Value lines already associated with an earlier marker; a standalone
    // marker must not pick one of these up again
    let mut claimed_value_lines: HashSet<usize> = HashSet::new();

    for anchor_line in buffer.anchor_lines() {
        let mut instance = Instance::new(anchor_line);

        // Stage 1: context location
        let located = match locator::locate_excluding(&buffer, anchor_line, &claimed_value_lines) {
            Ok(located) => located,
            Err(e) => {
                if prefs.log_unresolved_markers {
                    log_error!(e.error_code(), "Marker left unresolved",
                        line = e.line(),
                        "reason" => e);
                }
                summary.record(Verdict::Unchanged, anchor_line);
                instances.push(instance);
                continue;
            }
        };

        claimed_value_lines.insert(located.value_line);
        instance.value_line = Some(located.value_line);
        instance.criteria_text = Some(located.criteria_text.clone());
        instance.raw_value_text = Some(located.raw_value_text.clone());

        // Stage 2: criteria classification
        let criterion = classifier::classify(&located.criteria_text);
        if prefs.log_classification_details {
            log_debug!("Criteria classified",
                "kind" => criterion.kind(),
                "criteria" => located.criteria_text);
        }
        if matches!(criterion, Criterion::Unclassified) {
            let code = if located.criteria_text.len() > MAX_CRITERIA_LENGTH {
                codes::classification::CRITERIA_TOO_LONG
            } else {
                codes::classification::UNCLASSIFIED_CRITERIA
            };
            if prefs.log_unresolved_markers {
                log_error!(code, "Criteria could not be classified",
                    line = located.criteria_line,
                    "criteria" => located.criteria_text);
            }
            instance.criterion = Some(criterion);
            summary.record(Verdict::Unchanged, anchor_line);
            instances.push(instance);
            continue;
        }

        // Stages 3 and 4: value normalization and evaluation
        let value = normalizer::normalize(&located.raw_value_text, &criterion);
        let verdict = evaluator::evaluate(
            &criterion,
            &value,
            &EvaluationContext {
                buffer: &buffer,
                value_line: located.value_line,
            },
            &state,
        );

        if verdict.is_resolved() {
            let rewritten = buffer
                .text(anchor_line)
                .map(|line| rewrite_marker(line, verdict));
            if let Some(rewritten) = rewritten {
                buffer.set(anchor_line, rewritten);
            }
            if prefs.include_line_numbers {
                log_success!(codes::success::MARKER_RESOLVED, "Marker resolved",
                    "line" => anchor_line,
                    "verdict" => verdict,
                    "kind" => criterion.kind());
            } else {
                log_success!(codes::success::MARKER_RESOLVED, "Marker resolved",
                    "verdict" => verdict,
                    "kind" => criterion.kind());
            }
        }

        // Values feed later greater-than-previous checks only after their
        // own marker has been evaluated
        if let Some(numeric) = value.numeric {
            let label = buffer.text(located.value_line).and_then(|line| {
                let content = if is_anchor(line) {
                    strip_marker(line)
                } else {
                    line
                };
                extract_param_label(content)
            });
            if let Some(label) = label {
                state.record(&label, numeric);
            }
        }

        instance.criterion = Some(criterion);
        instance.value = Some(value);
        instance.verdict = verdict;
        summary.record(verdict, anchor_line);
        instances.push(instance);
    }

    FileResolution::new(
        buffer.into_lines(),
        instances,
        summary,
        start_time.elapsed(),
    )
}

/// Read a file, resolve its markers and return the resolution
pub fn resolve_file(file_path: &str) -> Result<FileResolution, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        log_info!("Starting marker resolution", "file" => file_path);

        let file_result = file_processor::process_file(file_path)?;
        let resolution = resolve_lines(file_result.lines());
        resolution.log_success(file_path);

        Ok(resolution)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tolerance_marker_resolves_to_pass() {
        let resolution = resolve_lines(lines(&[
            "S/B 27535 +/- 5",
            "MP 100 = 27537    PASS/FAIL",
        ]));
        assert_eq!(resolution.lines[1], "MP 100 = 27537    PASS");
        assert_eq!(resolution.summary.pass_count, 1);
        assert!(resolution.summary.is_fully_resolved());
    }

    #[test]
    fn test_out_of_range_marker_resolves_to_fail() {
        let resolution = resolve_lines(lines(&[
            "MP 7 S/B 10 to 90",
            "MP 7 = 95    PASS/FAIL",
        ]));
        assert_eq!(resolution.lines[1], "MP 7 = 95    FAIL");
        assert_eq!(resolution.summary.fail_lines, vec![2]);
    }

    #[test]
    fn test_unlocatable_marker_left_unchanged() {
        let resolution = resolve_lines(lines(&["PASS/FAIL"]));
        assert_eq!(resolution.lines[0], "PASS/FAIL");
        assert_eq!(resolution.summary.unchanged_count, 1);
        assert_eq!(resolution.summary.unchanged_lines, vec![1]);
        assert_eq!(resolution.instances.len(), 1);
        assert_eq!(resolution.instances[0].verdict, Verdict::Unchanged);
    }

    #[test]
    fn test_greater_than_previous_across_markers() {
        let resolution = resolve_lines(lines(&[
            "MP 214 S/B greater than previous MP 214",
            "MP 214 = 100    PASS/FAIL",
            "noise",
            "MP 214 S/B greater than previous MP 214",
            "MP 214 = 250    PASS/FAIL",
            "noise",
            "MP 214 S/B greater than previous MP 214",
            "MP 214 = 50    PASS/FAIL",
        ]));
        // First occurrence passes, second is greater, third regressed
        assert_eq!(resolution.lines[1], "MP 214 = 100    PASS");
        assert_eq!(resolution.lines[4], "MP 214 = 250    PASS");
        assert_eq!(resolution.lines[7], "MP 214 = 50    FAIL");
    }

    #[test]
    fn test_cross_reference_resolution() {
        let resolution = resolve_lines(lines(&[
            "VEN2.01/02 = 3d",
            "S/B = VEN2.01/02",
            "MP 285 = 003D    PASS/FAIL",
        ]));
        assert_eq!(resolution.lines[2], "MP 285 = 003D    PASS");
    }

    #[test]
    fn test_cross_reference_with_criteria_on_marker_line() {
        // The marker line's '=' opens the S/B criteria; the measured value
        // is the parameter's own earlier assignment
        let resolution = resolve_lines(lines(&[
            "VEN2.01/02 = 3d",
            "MP 285 = 003D",
            "MP 285 S/B = VEN2.01/02    PASS/FAIL",
        ]));
        assert_eq!(resolution.lines[2], "MP 285 S/B = VEN2.01/02    PASS");
        assert_eq!(resolution.summary.pass_count, 1);
    }

    #[test]
    fn test_standalone_marker_does_not_reuse_claimed_value_line() {
        let resolution = resolve_lines(lines(&[
            "S/B > 100",
            "MP 2 = 50    PASS/FAIL",
            "PASS/FAIL",
        ]));
        // The trailing bare marker finds no value line of its own: the
        // only candidate already belongs to the marker above it
        assert_eq!(resolution.lines[1], "MP 2 = 50    FAIL");
        assert_eq!(resolution.lines[2], "PASS/FAIL");
        assert_eq!(resolution.summary.fail_count, 1);
        assert_eq!(resolution.summary.unchanged_count, 1);
    }

    #[test]
    fn test_resolved_lines_are_not_reprocessed() {
        let resolution = resolve_lines(lines(&[
            "S/B > 100",
            "MP 1 = 250    PASS/FAIL",
        ]));
        assert_eq!(resolution.summary.total, 1);

        // A second run over the output finds nothing pending
        let again = resolve_lines(resolution.lines.clone());
        assert_eq!(again.summary.total, 0);
        assert_eq!(again.lines, resolution.lines);
    }

    #[test]
    fn test_unclassified_criteria_leaves_marker() {
        let resolution = resolve_lines(lines(&[
            "MP 9 S/B ",
            "MP 9 = 42    PASS/FAIL",
        ]));
        // No criteria text after S/B, nothing to classify against
        assert_eq!(resolution.lines[1], "MP 9 = 42    PASS/FAIL");
        assert_eq!(resolution.summary.unchanged_count, 1);
    }

    #[test]
    fn test_standalone_marker_rewrite() {
        let resolution = resolve_lines(lines(&[
            "S/B 1 to 9",
            "MP 3 = 5",
            "PASS/FAIL**",
        ]));
        assert_eq!(resolution.lines[2], "PASS");
        assert_eq!(resolution.summary.pass_count, 1);
    }

    #[test]
    fn test_set_with_blank_value() {
        let resolution = resolve_lines(lines(&[
            "MP 60 S/B 0, 1 or (blank)",
            "MP 60 =     PASS/FAIL",
        ]));
        assert_eq!(resolution.summary.pass_count, 1);
    }

    #[test]
    fn test_instances_describe_each_marker() {
        let resolution = resolve_lines(lines(&[
            "S/B > 100",
            "MP 1 = 250    PASS/FAIL",
        ]));
        assert_eq!(resolution.instances.len(), 1);
        let instance = &resolution.instances[0];
        assert_eq!(instance.anchor_line, 2);
        assert_eq!(instance.value_line, Some(2));
        assert_eq!(instance.criteria_text.as_deref(), Some("> 100"));
        assert_eq!(instance.raw_value_text.as_deref(), Some("250"));
        assert_eq!(instance.verdict, Verdict::Pass);
    }

    #[test]
    fn test_summary_counts_multiple_markers() {
        let resolution = resolve_lines(lines(&[
            "S/B > 100",
            "MP 1 = 250    PASS/FAIL",
            "S/B > 100",
            "MP 2 = 50    PASS/FAIL",
            "PASS/FAIL",
        ]));
        assert_eq!(resolution.summary.total, 3);
        assert_eq!(resolution.summary.pass_count, 1);
        assert_eq!(resolution.summary.fail_count, 1);
        assert_eq!(resolution.summary.unchanged_count, 1);
    }
}
