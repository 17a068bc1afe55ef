// Transent - Batch Translation and Sentiment Scoring Tool
// Copyright (c) 2025 Transent Contributors
// Licensed under the MIT License

//! # Transent - Batch Translation and Sentiment Scoring
//!
//! Transent is a resume-aware batch pipeline built in Rust that translates
//! free-text records (tweets, reviews, survey answers) to a target language
//! and scores their sentiment, writing an ordered CSV artifact.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Planning** work against an append-only checkpoint, so interrupted
//!   runs resume without repeating records
//! - **Translating** batches through a LibreTranslate-compatible HTTP API
//! - **Scoring** translated text with a SentiStrength subprocess
//! - **Rebuilding** the final artifact in original input order
//!
//! ## Architecture
//!
//! Transent follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (dataset, batching, pipeline, checkpoint, rebuild)
//! - [`adapters`] - External collaborators (translator, sentiment scorer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::watch;
//! use transent::adapters::scorer::SentiStrengthScorer;
//! use transent::adapters::translator::HttpTranslator;
//! use transent::config::load_config;
//! use transent::core::PipelineCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("transent.toml")?;
//!
//!     let translator = Arc::new(HttpTranslator::new(config.translator.clone())?);
//!     let scorer = Arc::new(SentiStrengthScorer::new(config.scorer.clone())?);
//!     scorer.init().await?;
//!
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!     let coordinator = PipelineCoordinator::new(config, translator, scorer, shutdown_rx);
//!
//!     let summary = coordinator.execute().await?;
//!     println!("Wrote {} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Resume Semantics
//!
//! Every completed batch is appended to `<name>_raw.csv` before it counts
//! as done. On startup the pipeline recovers the set of processed record
//! ids from that file and plans jobs only for the remainder, so a crashed
//! or cancelled run picks up where it left off. The final `<name>.csv`
//! artifact is regenerated from the checkpoint at the end of every run,
//! deduplicated and sorted back into input order.
//!
//! ## Error Handling
//!
//! Transent uses the [`domain::TransentError`] type for all errors:
//!
//! ```rust,no_run
//! use transent::domain::TransentError;
//!
//! fn example() -> Result<(), TransentError> {
//!     let config = transent::config::load_config("transent.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Transent uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting run");
//! warn!(record_id = "12345", "Record has empty text");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
