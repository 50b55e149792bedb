//! Configuration module for the resolution engine
//!
//! Compile-time limits live in `constants`; user preferences (read from
//! TRC_* environment variables) live in `runtime`.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
