//! Worker task
//!
//! Each worker pulls one job at a time, runs the batched translate and
//! score calls, zips the outputs into result rows, and pushes exactly one
//! batch per completed job. A collaborator failure terminates the worker
//! without retry or re-enqueue: the abandoned job's records stay out of
//! the checkpoint and are replanned on the next run.

use super::{pop_job, WorkQueue};
use crate::adapters::scorer::SentimentScorer;
use crate::adapters::translator::Translator;
use crate::core::batch::Job;
use crate::core::dataset::Dataset;
use crate::domain::{Result, ResultRow, TransentError};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// How a worker's run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The work queue was observed empty
    Drained { jobs_completed: usize },
    /// The cancellation signal was observed at loop top
    Cancelled { jobs_completed: usize },
    /// A collaborator call failed and the worker terminated itself
    Failed { jobs_completed: usize },
}

impl WorkerOutcome {
    /// Jobs this worker completed before exiting
    pub fn jobs_completed(&self) -> usize {
        match self {
            WorkerOutcome::Drained { jobs_completed }
            | WorkerOutcome::Cancelled { jobs_completed }
            | WorkerOutcome::Failed { jobs_completed } => *jobs_completed,
        }
    }

    /// True when the worker exited on a failure
    pub fn failed(&self) -> bool {
        matches!(self, WorkerOutcome::Failed { .. })
    }
}

/// One concurrent worker task
pub struct Worker {
    id: usize,
    dataset: Arc<Dataset>,
    queue: WorkQueue,
    results: mpsc::Sender<Vec<ResultRow>>,
    translator: Arc<dyn Translator>,
    scorer: Arc<dyn SentimentScorer>,
    shutdown: watch::Receiver<bool>,
}

impl Worker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        dataset: Arc<Dataset>,
        queue: WorkQueue,
        results: mpsc::Sender<Vec<ResultRow>>,
        translator: Arc<dyn Translator>,
        scorer: Arc<dyn SentimentScorer>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            id,
            dataset,
            queue,
            results,
            translator,
            scorer,
            shutdown,
        }
    }

    /// Runs the worker loop to completion
    ///
    /// Cancellation is cooperative: the flag is checked at loop top, so an
    /// in-flight collaborator call finishes before the worker observes it.
    pub async fn run(self) -> WorkerOutcome {
        let mut jobs_completed = 0;

        loop {
            if *self.shutdown.borrow() {
                tracing::info!(worker = self.id, jobs_completed, "Worker observed cancellation");
                return WorkerOutcome::Cancelled { jobs_completed };
            }

            let Some(job) = pop_job(&self.queue) else {
                tracing::debug!(worker = self.id, jobs_completed, "Work queue drained");
                return WorkerOutcome::Drained { jobs_completed };
            };

            match self.process_job(&job).await {
                Ok(rows) => {
                    // Exactly one push per completed job
                    if self.results.send(rows).await.is_err() {
                        tracing::error!(
                            worker = self.id,
                            "Result channel closed - writer is gone"
                        );
                        return WorkerOutcome::Failed { jobs_completed };
                    }
                    jobs_completed += 1;
                }
                Err(e) => {
                    tracing::error!(
                        worker = self.id,
                        jobs = job.len(),
                        jobs_completed,
                        error = %e,
                        "Worker terminating after job failure - job will be retried next run"
                    );
                    return WorkerOutcome::Failed { jobs_completed };
                }
            }
        }
    }

    /// Translates and scores one job's records, in job order
    async fn process_job(&self, job: &Job) -> Result<Vec<ResultRow>> {
        let records: Vec<_> = job
            .indices()
            .iter()
            .map(|&idx| {
                self.dataset.records().get(idx).ok_or_else(|| {
                    TransentError::Pipeline(format!("job references unknown input index {idx}"))
                })
            })
            .collect::<Result<_>>()?;

        let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();

        let translations = self.translator.translate_batch(&texts).await?;
        if translations.len() != texts.len() {
            return Err(TransentError::Pipeline(format!(
                "translator returned {} results for {} texts",
                translations.len(),
                texts.len()
            )));
        }

        let translated_texts: Vec<String> =
            translations.iter().map(|t| t.text.clone()).collect();

        let scores = self.scorer.score_batch(&translated_texts).await?;
        if scores.len() != translated_texts.len() {
            return Err(TransentError::Pipeline(format!(
                "scorer returned {} results for {} texts",
                scores.len(),
                translated_texts.len()
            )));
        }

        // Order-preserving zip keeps the 1:1 position mapping within the job
        let rows = records
            .iter()
            .zip(translations)
            .zip(scores)
            .map(|((record, translation), score)| ResultRow {
                input_order: record.input_order,
                record_id: record.record_id.clone(),
                score,
                detected_source_language: translation.detected_source_language,
                translated_text: translation.text,
            })
            .collect();

        Ok(rows)
    }
}
