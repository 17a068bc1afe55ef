//! Core pipeline logic
//!
//! Everything between the input CSV and the final artifact: dataset loading,
//! job planning, the concurrent worker/writer pipeline, the checkpoint store
//! and the rebuild pass.

pub mod batch;
pub mod checkpoint;
pub mod dataset;
pub mod pipeline;
pub mod rebuild;
pub mod summary;

pub use batch::{plan_jobs, Job};
pub use checkpoint::{CheckpointAppender, CheckpointStore};
pub use dataset::Dataset;
pub use pipeline::PipelineCoordinator;
pub use rebuild::Rebuilder;
pub use summary::{RunOutcome, RunSummary};
