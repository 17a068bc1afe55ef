//! Domain error types
//!
//! This module defines the error hierarchy for Transent. All errors are
//! domain-specific and don't expose third-party types to callers.

use thiserror::Error;

/// Main Transent error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TransentError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Translator collaborator errors
    #[error("Translator error: {0}")]
    Translator(#[from] TranslatorError),

    /// Sentiment scorer collaborator errors
    #[error("Scorer error: {0}")]
    Scorer(#[from] ScorerError),

    /// Input dataset errors (missing columns, unreadable file)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Checkpoint store errors (append or recovery failures)
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Rebuild errors (final artifact could not be produced)
    #[error("Rebuild error: {0}")]
    Rebuild(String),

    /// Pipeline coordination errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Translator-specific errors
///
/// Errors that occur when invoking the translation collaborator.
/// These errors don't expose the HTTP client types used underneath.
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// Failed to reach the translation endpoint
    #[error("Failed to connect to translation endpoint: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Translation request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Translation server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Translation client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),

    /// Response cardinality does not match the request batch
    #[error("Translation batch mismatch: sent {sent} texts, received {received}")]
    BatchMismatch { sent: usize, received: usize },
}

/// Sentiment scorer-specific errors
///
/// Errors that occur when invoking the sentiment scoring collaborator.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// The scorer process could not be started
    #[error("Failed to launch scorer: {0}")]
    LaunchFailed(String),

    /// The scorer process exited abnormally
    #[error("Scorer process failed: {0}")]
    ProcessFailed(String),

    /// A score line could not be parsed
    #[error("Invalid scorer output: {0}")]
    InvalidOutput(String),

    /// Output cardinality does not match the request batch
    #[error("Scorer batch mismatch: sent {sent} texts, received {received}")]
    BatchMismatch { sent: usize, received: usize },

    /// The initialization smoke test failed
    #[error("Scorer smoke test failed: {0}")]
    SmokeTestFailed(String),

    /// The configured resources are missing or unusable
    #[error("Invalid scorer resources: {0}")]
    InvalidResources(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TransentError {
    fn from(err: std::io::Error) -> Self {
        TransentError::Io(err.to_string())
    }
}

// Conversion from csv errors (dataset loading, checkpoint scans)
impl From<csv::Error> for TransentError {
    fn from(err: csv::Error) -> Self {
        TransentError::Dataset(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TransentError {
    fn from(err: toml::de::Error) -> Self {
        TransentError::Configuration(format!("TOML parse error: {err}"))
    }
}
