//! Sentiment scoring collaborator
//!
//! Defines the [`SentimentScorer`] trait the worker pool depends on, plus
//! the SentiStrength subprocess implementation used in production.

pub mod sentistrength;

pub use sentistrength::SentiStrengthScorer;

use crate::domain::{Result, ScoreMode, SentimentScore};
use async_trait::async_trait;

/// Order-preserving, batch-capable sentiment scoring capability
///
/// Implementations must return exactly one [`SentimentScore`] per input
/// text, in input order, in the shape reported by [`mode`](Self::mode).
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// The score shape this scorer produces
    fn mode(&self) -> ScoreMode;

    /// Scores a batch of texts, preserving order
    async fn score_batch(&self, texts: &[String]) -> Result<Vec<SentimentScore>>;
}
