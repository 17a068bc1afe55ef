//! Domain models and types for Transent.
//!
//! This module contains the core domain models shared by the pipeline,
//! the collaborator adapters, and the CLI.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`])
//! - **Pipeline data model** ([`Record`], [`ResultRow`], [`SentimentScore`])
//! - **Error types** ([`TransentError`], [`TranslatorError`], [`ScorerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TransentError>`]:
//!
//! ```rust
//! use transent::domain::{Result, TransentError};
//!
//! fn example() -> Result<()> {
//!     Err(TransentError::Configuration("missing input file".to_string()))
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ScorerError, TranslatorError, TransentError};
pub use record::{Record, RecordId, ResultRow, ScoreMode, SentimentScore, Translation};
pub use result::Result;
