//! Logging and observability
//!
//! Structured logging with configurable log levels, console output, and
//! optional rotating JSON file output.

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
