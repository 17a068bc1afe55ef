//! Pipeline coordinator
//!
//! Owns the run lifecycle: plans jobs against the recovered checkpoint,
//! starts the worker pool and the writer, waits for drain or cancellation,
//! and triggers the rebuild pass. The state machine is
//! `INIT -> RUNNING -> DRAINING -> DONE`, with `CANCELLED` reachable from
//! `RUNNING` and `DRAINING` via the shared shutdown signal.

use crate::adapters::scorer::SentimentScorer;
use crate::adapters::translator::Translator;
use crate::config::TransentConfig;
use crate::core::batch::plan_jobs;
use crate::core::checkpoint::CheckpointStore;
use crate::core::dataset::Dataset;
use crate::core::pipeline::{work_queue, ProgressLine, Worker, Writer};
use crate::core::rebuild::Rebuilder;
use crate::core::summary::{RunOutcome, RunSummary};
use crate::domain::Result;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch};

/// Coordinator lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Init,
    Running,
    Draining,
    Done,
    Cancelled,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Init => write!(f, "INIT"),
            RunState::Running => write!(f, "RUNNING"),
            RunState::Draining => write!(f, "DRAINING"),
            RunState::Done => write!(f, "DONE"),
            RunState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

fn transition(state: &mut RunState, next: RunState) {
    tracing::info!(from = %state, to = %next, "Pipeline state transition");
    *state = next;
}

/// Coordinates one pipeline run
pub struct PipelineCoordinator {
    config: TransentConfig,
    translator: Arc<dyn Translator>,
    scorer: Arc<dyn SentimentScorer>,
    shutdown: watch::Receiver<bool>,
}

impl PipelineCoordinator {
    /// Creates a coordinator over initialized collaborators
    ///
    /// Collaborator initialization (including the scorer smoke test)
    /// happens before this point; a coordinator only exists for runs that
    /// are cleared to start.
    pub fn new(
        config: TransentConfig,
        translator: Arc<dyn Translator>,
        scorer: Arc<dyn SentimentScorer>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            translator,
            scorer,
            shutdown,
        }
    }

    /// Executes the run to completion and returns its summary
    ///
    /// # Errors
    ///
    /// Returns an error for pre-flight failures (unreadable dataset,
    /// checkpoint not appendable) and for rebuild failures. Collaborator
    /// failures and cancellation are reported through the summary, not as
    /// errors.
    pub async fn execute(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut state = RunState::Init;
        tracing::info!(state = %state, "Starting pipeline");

        let dataset = Arc::new(Dataset::load(&self.config.input)?);
        let store = CheckpointStore::new(self.config.output.checkpoint_path());
        let recovered = store.recover_ids();

        let already_completed = dataset
            .records()
            .iter()
            .filter(|record| recovered.contains(&record.record_id))
            .count();

        let batch_size = self.config.pipeline.batch_size;
        let jobs = plan_jobs(dataset.records(), &recovered, batch_size);
        let total_jobs = jobs.len();

        let mut summary = RunSummary::new(dataset.len(), already_completed, total_jobs);
        let rebuilder = Rebuilder::new(
            store.clone(),
            self.config.output.artifact_path(),
            self.scorer.mode(),
        );

        if jobs.is_empty() {
            tracing::info!("No unprocessed records - nothing to do");
            transition(&mut state, RunState::Done);
            summary.artifact_rows = rebuilder.rebuild()?;
            summary.outcome = RunOutcome::Completed;
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        // Checkpoint must be appendable before any work starts
        let appender = store.appender()?;

        // Overall progress counts every batch of the dataset, seeded with
        // the share completed by previous runs.
        let overall_batches = dataset.len().div_ceil(batch_size);
        let progress = ProgressLine::new(overall_batches, overall_batches - total_jobs);

        let queue = work_queue(jobs);
        let (result_tx, result_rx) = mpsc::channel(total_jobs);

        let writer = Writer::new(result_rx, appender, progress);
        let writer_handle = tokio::spawn(writer.run());

        let worker_count = self.config.pipeline.workers.min(total_jobs);
        summary.workers_spawned = worker_count;
        transition(&mut state, RunState::Running);
        tracing::info!(workers = worker_count, jobs = total_jobs, "Spawning workers");

        let mut worker_handles = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let worker = Worker::new(
                id,
                Arc::clone(&dataset),
                Arc::clone(&queue),
                result_tx.clone(),
                Arc::clone(&self.translator),
                Arc::clone(&self.scorer),
                self.shutdown.clone(),
            );
            worker_handles.push(tokio::spawn(worker.run()));
        }
        // The writer's channel must close once the workers are done
        drop(result_tx);

        // Every worker reports its outcome; no more results can be
        // produced once they have all returned.
        for joined in join_all(worker_handles).await {
            match joined {
                Ok(outcome) => {
                    if outcome.failed() {
                        summary.workers_failed += 1;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Worker task panicked");
                    summary.workers_failed += 1;
                }
            }
        }
        transition(&mut state, RunState::Draining);

        let mut storage_failed = false;
        match writer_handle.await {
            Ok(Ok(report)) => {
                summary.jobs_written = report.batches_written;
                summary.rows_written = report.rows_written;
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Writer stopped on storage failure");
                storage_failed = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "Writer task panicked");
                storage_failed = true;
            }
        }

        let cancelled = *self.shutdown.borrow();
        transition(
            &mut state,
            if cancelled {
                RunState::Cancelled
            } else {
                RunState::Done
            },
        );

        // Rebuild runs even after cancellation or a failed worker so
        // partial progress is preserved in the artifact.
        summary.artifact_rows = rebuilder.rebuild()?;

        summary.outcome = if storage_failed {
            RunOutcome::StorageFailed
        } else if cancelled {
            RunOutcome::Cancelled
        } else if summary.workers_failed > 0 {
            RunOutcome::WorkersExitedEarly
        } else {
            RunOutcome::Completed
        };

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_display() {
        assert_eq!(RunState::Init.to_string(), "INIT");
        assert_eq!(RunState::Running.to_string(), "RUNNING");
        assert_eq!(RunState::Draining.to_string(), "DRAINING");
        assert_eq!(RunState::Done.to_string(), "DONE");
        assert_eq!(RunState::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_transition_updates_state() {
        let mut state = RunState::Init;
        transition(&mut state, RunState::Running);
        assert_eq!(state, RunState::Running);
    }
}
