//! File processor module with compile-time constants and global logging integration

mod processor;

use crate::config::runtime::FileProcessorPreferences;
pub use processor::{
    write_output, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// Create a file processor with default settings
pub fn create_processor() -> FileProcessor {
    processor::create_processor()
}

/// Create a file processor from runtime preferences structure
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    processor::create_processor_from_preferences(prefs)
}

/// Check if an error should halt processing
pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    processor::should_halt_on_error(error)
}

/// Get error code for an error
pub fn get_error_code(error: &FileProcessorError) -> crate::logging::Code {
    processor::get_error_code(error)
}

/// Validate that the file processor error codes are registered (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::file_processing::FILE_NOT_FOUND,
        crate::logging::codes::file_processing::FILE_TOO_LARGE,
        crate::logging::codes::file_processing::EMPTY_FILE,
        crate::logging::codes::file_processing::PERMISSION_DENIED,
        crate::logging::codes::file_processing::IO_ERROR,
        crate::logging::codes::file_processing::INVALID_PATH,
        crate::logging::codes::file_processing::TOO_MANY_LINES,
        crate::logging::codes::file_processing::OUTPUT_WRITE_FAILED,
    ];

    for code in &test_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "File processor error code {} has no description",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("results.log");
        fs::write(&file_path, "MP 214 = 250    PASS/FAIL\n").unwrap();

        let result = process_file(file_path.to_str().unwrap());
        assert!(result.is_ok());
    }

    #[test]
    fn test_error_helpers() {
        let error = FileProcessorError::FileNotFound {
            path: "results.log".to_string(),
        };

        assert!(should_halt_on_error(&error));
        assert_eq!(get_error_code(&error).as_str(), "E005");
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
