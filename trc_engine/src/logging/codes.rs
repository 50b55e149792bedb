//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E006");
    pub const EMPTY_FILE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E008");
    pub const IO_ERROR: Code = Code::new("E009");
    pub const INVALID_PATH: Code = Code::new("E010");
    pub const TOO_MANY_LINES: Code = Code::new("E011");
    pub const OUTPUT_WRITE_FAILED: Code = Code::new("E012");
}

/// Context location error codes
pub mod location {
    use super::Code;

    pub const VALUE_LINE_NOT_FOUND: Code = Code::new("E020");
    pub const CRITERIA_LINE_NOT_FOUND: Code = Code::new("E021");
    pub const VALUE_EXTRACTION_FAILED: Code = Code::new("E022");
}

/// Criteria classification error codes
pub mod classification {
    use super::Code;

    pub const UNCLASSIFIED_CRITERIA: Code = Code::new("E040");
    pub const CRITERIA_TOO_LONG: Code = Code::new("E041");
}

/// Evaluation error codes
pub mod evaluation {
    use super::Code;

    pub const VALUE_PARSE_FAILURE: Code = Code::new("E060");
    pub const REFERENCE_NOT_FOUND: Code = Code::new("E061");
    pub const PREVIOUS_VALUE_MISSING: Code = Code::new("E062");
    pub const MALFORMED_RANGE: Code = Code::new("E063");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");

    pub const MARKER_RESOLVED: Code = Code::new("I020");
    pub const FILE_RESOLUTION_COMPLETE: Code = Code::new("I021");
    pub const OUTPUT_WRITTEN: Code = Code::new("I022");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check system configuration and dependencies",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or increase processing limits",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File is empty when content expected",
                "Provide a file with content or check file integrity",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error during file operation",
                "Check disk space, permissions, and file system integrity",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid file path provided",
                "Provide a valid file path",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File contains more lines than the processing limit",
                "Split the log file or increase processing limits",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Failed writing resolved output file",
                "Check destination permissions and available disk space",
            ),
        );

        // Context location errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Location",
                Severity::Low,
                true,
                false,
                "No value line found near a pending marker",
                "Inspect the log layout around the reported line",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Location",
                Severity::Low,
                true,
                false,
                "No S/B criteria line found near a pending marker",
                "Inspect the log layout around the reported line",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Location",
                Severity::Low,
                true,
                false,
                "Value text could not be extracted from the value line",
                "Check the value line format near the reported line",
            ),
        );

        // Classification errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Classification",
                Severity::Low,
                true,
                false,
                "Criteria text did not match any known criterion shape",
                "Review the criteria text; the marker is left unresolved",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Classification",
                Severity::Medium,
                true,
                false,
                "Criteria text exceeds the maximum accepted length",
                "Check the log for corrupted or concatenated lines",
            ),
        );

        // Evaluation errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Evaluation",
                Severity::Low,
                true,
                false,
                "Measured value could not be parsed for a numeric criterion",
                "Verify the measured value format; the marker is failed",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Evaluation",
                Severity::Low,
                true,
                false,
                "Cross-referenced parameter not found in the search window",
                "Verify the referenced parameter appears above the marker",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Evaluation",
                Severity::Low,
                true,
                false,
                "No previously recorded value for a greater-than-previous criterion",
                "Expected on the first occurrence of a parameter",
            ),
        );
        registry.insert(
            "E063",
            ErrorMetadata::new(
                "E063",
                "Evaluation",
                Severity::Low,
                true,
                false,
                "Range bounds could not be interpreted in a common base",
                "Check the criteria range bounds near the reported line",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get severity for an error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Get category for an error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|m| m.category)
        .unwrap_or("Unknown")
}

/// Check if an error code requires halting
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|m| m.requires_halt)
        .unwrap_or(false)
}

/// Check if an error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|m| m.recoverable)
        .unwrap_or(true)
}

/// Get description for an error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for an error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        let code = file_processing::FILE_NOT_FOUND;
        assert_eq!(code.as_str(), "E005");
        assert_eq!(format!("{}", code), "E005");
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(get_category("E005"), "FileProcessing");
        assert_eq!(get_category("E020"), "Location");
        assert_eq!(get_category("E040"), "Classification");
        assert_eq!(get_category("E060"), "Evaluation");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("ERR001"));
        assert!(!requires_halt("E020"));
    }

    #[test]
    fn test_location_errors_are_recoverable() {
        // Unresolved markers are left in place, not fatal
        assert!(is_recoverable("E020"));
        assert!(is_recoverable("E021"));
        assert!(is_recoverable("E040"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_category("ZZZ999"), "Unknown");
        assert_eq!(get_description("ZZZ999"), "Unknown error");
        assert!(!requires_halt("ZZZ999"));
    }
}
