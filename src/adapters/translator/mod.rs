//! Translation collaborator
//!
//! Defines the [`Translator`] trait the worker pool depends on, plus the
//! HTTP implementation used in production.

pub mod client;
pub mod models;

pub use client::HttpTranslator;

use crate::domain::{Result, Translation};
use async_trait::async_trait;

/// Order-preserving, batch-capable translation capability
///
/// Implementations must return exactly one [`Translation`] per input text,
/// in input order. A batch of one behaves identically to an element of a
/// larger batch.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates a batch of texts, preserving order
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<Translation>>;
}
