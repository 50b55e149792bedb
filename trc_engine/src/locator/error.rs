//! Context location errors

use crate::logging::codes::{self, Code};
use thiserror::Error;

/// Failure to locate the context around a pending marker
///
/// These are per-marker failures: the marker is left unresolved and
/// processing continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no value line found within {window} lines above marker at line {anchor_line}")]
    ValueLineNotFound { anchor_line: usize, window: usize },

    #[error(
        "no S/B criteria line found within {window} lines above value line {value_line} \
         (marker at line {anchor_line})"
    )]
    CriteriaLineNotFound {
        anchor_line: usize,
        value_line: usize,
        window: usize,
    },

    #[error("value text could not be extracted from line {value_line}")]
    ValueExtractionFailed { value_line: usize },
}

impl LocateError {
    /// Logging code for this failure
    pub fn error_code(&self) -> Code {
        match self {
            LocateError::ValueLineNotFound { .. } => codes::location::VALUE_LINE_NOT_FOUND,
            LocateError::CriteriaLineNotFound { .. } => codes::location::CRITERIA_LINE_NOT_FOUND,
            LocateError::ValueExtractionFailed { .. } => codes::location::VALUE_EXTRACTION_FAILED,
        }
    }

    /// 1-based anchor or value line the failure refers to
    pub fn line(&self) -> usize {
        match self {
            LocateError::ValueLineNotFound { anchor_line, .. } => *anchor_line,
            LocateError::CriteriaLineNotFound { anchor_line, .. } => *anchor_line,
            LocateError::ValueExtractionFailed { value_line } => *value_line,
        }
    }
}
