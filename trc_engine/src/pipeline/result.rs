use super::stats::ResolutionSummary;
use crate::types::Instance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete result of resolving one file's pending markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResolution {
    /// All lines of the file, resolved markers rewritten in place
    pub lines: Vec<String>,
    /// One record per pending marker, in file order
    pub instances: Vec<Instance>,
    pub summary: ResolutionSummary,
    /// When resolution finished
    pub completed_at: DateTime<Utc>,
    pub processing_duration: Duration,
}

impl FileResolution {
    pub fn new(
        lines: Vec<String>,
        instances: Vec<Instance>,
        summary: ResolutionSummary,
        processing_duration: Duration,
    ) -> Self {
        Self {
            lines,
            instances,
            summary,
            completed_at: Utc::now(),
            processing_duration,
        }
    }

    pub fn log_success(&self, file_path: &str) {
        crate::log_success!(
            crate::logging::codes::success::FILE_RESOLUTION_COMPLETE,
            "Marker resolution completed",
            "file" => file_path,
            "markers" => self.summary.total,
            "pass" => self.summary.pass_count,
            "fail" => self.summary.fail_count,
            "unchanged" => self.summary.unchanged_count,
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
