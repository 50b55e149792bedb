// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,

    /// Whether to log files skipped for having no pending markers
    pub log_skipped_files: bool,

    /// Whether to report the fallback decode path when input is not UTF-8
    pub log_encoding_fallback: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env::var("TRC_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_skipped_files: env::var("TRC_LOG_SKIPPED_FILES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_encoding_fallback: env::var("TRC_LOG_ENCODING_FALLBACK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionPreferences {
    /// Whether to log every classified criterion at debug level
    pub log_classification_details: bool,

    /// Whether to log each unresolved marker individually
    pub log_unresolved_markers: bool,

    /// Whether to include line numbers in verdict log context
    pub include_line_numbers: bool,
}

impl Default for ResolutionPreferences {
    fn default() -> Self {
        Self {
            log_classification_details: env::var("TRC_RESOLUTION_LOG_CLASSIFICATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_unresolved_markers: env::var("TRC_RESOLUTION_LOG_UNRESOLVED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_line_numbers: env::var("TRC_RESOLUTION_INCLUDE_LINE_NUMBERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,

    /// Optional path of a log file that mirrors console output
    pub log_file: Option<String>,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("TRC_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("TRC_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var("TRC_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var("TRC_LOGGING_LOG_PERFORMANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var("TRC_LOGGING_INCLUDE_FILE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_file: env::var("TRC_LOGGING_FILE").ok().filter(|v| !v.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub resolution: ResolutionPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "TRC_ENABLE_PERFORMANCE_LOGGING";
    pub const LOG_SKIPPED_FILES: &str = "TRC_LOG_SKIPPED_FILES";
    pub const LOG_ENCODING_FALLBACK: &str = "TRC_LOG_ENCODING_FALLBACK";

    // Resolution
    pub const RESOLUTION_LOG_CLASSIFICATION: &str = "TRC_RESOLUTION_LOG_CLASSIFICATION";
    pub const RESOLUTION_LOG_UNRESOLVED: &str = "TRC_RESOLUTION_LOG_UNRESOLVED";
    pub const RESOLUTION_INCLUDE_LINE_NUMBERS: &str = "TRC_RESOLUTION_INCLUDE_LINE_NUMBERS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TRC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TRC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TRC_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "TRC_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "TRC_LOGGING_INCLUDE_FILE_CONTEXT";
    pub const LOGGING_FILE: &str = "TRC_LOGGING_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::ENABLE_PERFORMANCE_LOGGING.is_empty());
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::RESOLUTION_LOG_UNRESOLVED.is_empty());
    }
}
