use crate::file_processor::FileProcessorError;

/// Pipeline processing errors
///
/// Per-marker failures never surface here; they leave the marker
/// unresolved and are tallied in the summary. Only file-level problems
/// abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }
}
