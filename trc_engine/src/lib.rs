// Internal modules
pub mod classifier;
pub mod config;
pub mod evaluator;
pub mod file_processor;
pub mod lines;
pub mod locator;
#[macro_use]
pub mod logging;
pub mod normalizer;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export key types for library consumers
pub use pipeline::{FileResolution, PipelineError, ResolutionSummary};
pub use types::{Criterion, MeasuredValue, Verdict};
