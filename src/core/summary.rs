//! Run summary
//!
//! Aggregated outcome of one pipeline run, rendered by the CLI and used to
//! pick the process exit code.

use std::time::Duration;

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every planned job was processed and written
    Completed,
    /// One or more workers exited early on a collaborator failure; the
    /// remaining jobs will be picked up by the next run
    WorkersExitedEarly,
    /// The run was interrupted by the user; completed work is preserved
    Cancelled,
    /// The writer could not durably record results; the run stopped
    StorageFailed,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "completed"),
            RunOutcome::WorkersExitedEarly => write!(f, "workers exited early"),
            RunOutcome::Cancelled => write!(f, "cancelled by user"),
            RunOutcome::StorageFailed => write!(f, "storage failure"),
        }
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Rows in the input dataset
    pub total_records: usize,
    /// Records already checkpointed before this run started
    pub already_completed: usize,
    /// Jobs planned for this run
    pub total_jobs: usize,
    /// Result batches durably written this run
    pub jobs_written: usize,
    /// Result rows durably written this run
    pub rows_written: usize,
    /// Workers spawned
    pub workers_spawned: usize,
    /// Workers that exited on a collaborator failure
    pub workers_failed: usize,
    /// Rows in the rebuilt final artifact, if one was produced
    pub artifact_rows: Option<usize>,
    /// Wall-clock duration of the run
    pub duration: Duration,
    /// How the run ended
    pub outcome: RunOutcome,
}

impl RunSummary {
    /// Creates an empty summary for a run over the given dataset
    pub fn new(total_records: usize, already_completed: usize, total_jobs: usize) -> Self {
        Self {
            total_records,
            already_completed,
            total_jobs,
            jobs_written: 0,
            rows_written: 0,
            workers_spawned: 0,
            workers_failed: 0,
            artifact_rows: None,
            duration: Duration::ZERO,
            outcome: RunOutcome::Completed,
        }
    }

    /// Sets the duration, builder-style
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True when every planned job was durably written
    pub fn is_complete(&self) -> bool {
        self.outcome == RunOutcome::Completed && self.jobs_written == self.total_jobs
    }

    /// True when the run was interrupted by the user
    pub fn interrupted(&self) -> bool {
        self.outcome == RunOutcome::Cancelled
    }

    /// Logs the summary through tracing
    pub fn log_summary(&self) {
        tracing::info!(
            total_records = self.total_records,
            already_completed = self.already_completed,
            total_jobs = self.total_jobs,
            jobs_written = self.jobs_written,
            rows_written = self.rows_written,
            workers_failed = self.workers_failed,
            outcome = %self.outcome,
            duration_ms = self.duration.as_millis() as u64,
            "Run finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_complete() {
        let mut summary = RunSummary::new(100, 40, 6);
        summary.jobs_written = 6;
        assert!(summary.is_complete());
        assert!(!summary.interrupted());
    }

    #[test]
    fn test_summary_incomplete_when_jobs_missing() {
        let mut summary = RunSummary::new(100, 40, 6);
        summary.jobs_written = 5;
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_summary_cancelled() {
        let mut summary = RunSummary::new(10, 0, 2);
        summary.outcome = RunOutcome::Cancelled;
        assert!(summary.interrupted());
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RunOutcome::Completed.to_string(), "completed");
        assert_eq!(RunOutcome::Cancelled.to_string(), "cancelled by user");
        assert_eq!(
            RunOutcome::WorkersExitedEarly.to_string(),
            "workers exited early"
        );
    }
}
