//! Writer task
//!
//! The single consumer of the result channel. Batches are appended to the
//! checkpoint store in arrival order (completion order, not input order -
//! the rebuild pass restores input order later). The writer keeps draining
//! until every worker sender has dropped and the channel is empty, so
//! results produced just before a shutdown are never discarded.

use crate::core::checkpoint::CheckpointAppender;
use crate::domain::{Result, ResultRow};
use std::io::Write as _;
use tokio::sync::mpsc;

/// What the writer durably recorded before exiting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterReport {
    /// Completed-job batches written
    pub batches_written: usize,
    /// Individual result rows written
    pub rows_written: usize,
}

/// Console progress indicator, one tick per completed job batch
///
/// Seeded with the batches completed by previous runs so resumed runs show
/// true overall progress.
pub struct ProgressLine {
    done: usize,
    total: usize,
    enabled: bool,
}

impl ProgressLine {
    /// Creates a progress line over `total` batches, starting at `initial`
    pub fn new(total: usize, initial: usize) -> Self {
        Self {
            done: initial.min(total),
            total,
            enabled: true,
        }
    }

    /// Creates a disabled progress line (used by tests and quiet runs)
    pub fn disabled() -> Self {
        Self {
            done: 0,
            total: 0,
            enabled: false,
        }
    }

    /// Advances by `batches` and redraws
    pub fn advance(&mut self, batches: usize) {
        self.done = (self.done + batches).min(self.total);
        if self.enabled {
            print!("\rProcessing batches: {}/{}", self.done, self.total);
            let _ = std::io::stdout().flush();
        }
    }

    /// Terminates the progress line
    pub fn finish(&self) {
        if self.enabled {
            println!();
        }
    }
}

/// The single writer task
pub struct Writer {
    receiver: mpsc::Receiver<Vec<ResultRow>>,
    appender: CheckpointAppender,
    progress: ProgressLine,
}

impl Writer {
    pub fn new(
        receiver: mpsc::Receiver<Vec<ResultRow>>,
        appender: CheckpointAppender,
        progress: ProgressLine,
    ) -> Self {
        Self {
            receiver,
            appender,
            progress,
        }
    }

    /// Runs the writer loop until the result channel closes
    ///
    /// Each wakeup drains everything currently queued and appends it as one
    /// flushed write, so a batch is either fully on disk or not at all.
    ///
    /// # Errors
    ///
    /// Returns a checkpoint error if an append fails. Further results can
    /// no longer be durably recorded, so the caller treats this as fatal
    /// for the run; rows already appended remain valid on disk.
    pub async fn run(mut self) -> Result<WriterReport> {
        let mut report = WriterReport::default();

        while let Some(first) = self.receiver.recv().await {
            let mut batches = vec![first];
            while let Ok(more) = self.receiver.try_recv() {
                batches.push(more);
            }

            let drained = batches.len();
            let rows: Vec<ResultRow> = batches.into_iter().flatten().collect();

            self.appender.append_rows(&rows)?;

            report.batches_written += drained;
            report.rows_written += rows.len();
            self.progress.advance(drained);

            tracing::debug!(
                batches = drained,
                rows = rows.len(),
                total_batches = report.batches_written,
                "Appended result batches"
            );
        }

        self.progress.finish();
        tracing::info!(
            batches = report.batches_written,
            rows = report.rows_written,
            "Writer drained result queue and exited"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checkpoint::CheckpointStore;
    use crate::domain::{RecordId, SentimentScore};
    use tempfile::TempDir;

    fn row(order: usize, id: &str) -> ResultRow {
        ResultRow {
            input_order: order,
            record_id: RecordId::new(id).unwrap(),
            score: SentimentScore::Dual {
                positive: 1,
                negative: -2,
            },
            detected_source_language: "id".to_string(),
            translated_text: format!("t{order}"),
        }
    }

    #[tokio::test]
    async fn test_writer_drains_until_channel_closes() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));
        let (tx, rx) = mpsc::channel(4);

        let writer = Writer::new(rx, store.appender().unwrap(), ProgressLine::disabled());
        let handle = tokio::spawn(writer.run());

        tx.send(vec![row(1, "b")]).await.unwrap();
        tx.send(vec![row(0, "a"), row(2, "c")]).await.unwrap();
        drop(tx);

        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.batches_written, 2);
        assert_eq!(report.rows_written, 3);

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 3);
        // Arrival order, not input order
        assert_eq!(rows[0].record_id.as_str(), "b");
    }

    #[tokio::test]
    async fn test_writer_drains_pending_after_senders_drop() {
        // Results sent right before shutdown must still land on disk
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));
        let (tx, rx) = mpsc::channel(8);

        for i in 0..5 {
            tx.send(vec![row(i, &format!("id{i}"))]).await.unwrap();
        }
        drop(tx);

        let writer = Writer::new(rx, store.appender().unwrap(), ProgressLine::disabled());
        let report = writer.run().await.unwrap();

        assert_eq!(report.rows_written, 5);
        assert_eq!(store.load_rows().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_writer_empty_channel() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));
        let (tx, rx) = mpsc::channel::<Vec<ResultRow>>(1);
        drop(tx);

        let writer = Writer::new(rx, store.appender().unwrap(), ProgressLine::disabled());
        let report = writer.run().await.unwrap();
        assert_eq!(report, WriterReport::default());
    }

    #[test]
    fn test_progress_line_saturates_at_total() {
        let mut progress = ProgressLine::disabled();
        progress.advance(10);
        assert_eq!(progress.done, 0);

        let mut progress = ProgressLine {
            done: 0,
            total: 3,
            enabled: false,
        };
        progress.advance(2);
        progress.advance(5);
        assert_eq!(progress.done, 3);
    }
}
