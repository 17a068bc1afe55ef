//! Durable checkpoint store
//!
//! An append-only CSV file of completed result rows, the source of truth
//! for resume. Read twice per run: once at startup to recover the set of
//! processed ids, once at rebuild time to produce the final artifact.
//! During a run it is mutated exclusively by the writer task.

use crate::domain::{RecordId, Result, ResultRow, TransentError};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Handle to the checkpoint file for one output target
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Creates a store handle for the given checkpoint path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the checkpoint file exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Recovers the set of already-processed record ids
    ///
    /// The record id is the second column of every checkpoint row. A
    /// missing or unreadable file yields an empty set (fresh run); rows
    /// without a second column are skipped with a warning.
    pub fn recover_ids(&self) -> HashSet<RecordId> {
        let mut ids = HashSet::new();

        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
        {
            Ok(reader) => reader,
            Err(e) => {
                tracing::info!(
                    path = %self.path.display(),
                    reason = %e,
                    "No readable checkpoint - treating as fresh run"
                );
                return ids;
            }
        };

        for (line, row) in reader.records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(line, error = %e, "Skipping unreadable checkpoint row");
                    continue;
                }
            };
            match row.get(1).and_then(|id| RecordId::new(id).ok()) {
                Some(id) => {
                    ids.insert(id);
                }
                None => {
                    tracing::warn!(line, "Checkpoint row has no record id - skipping");
                }
            }
        }

        tracing::info!(
            path = %self.path.display(),
            recovered = ids.len(),
            "Recovered checkpoint state"
        );

        ids
    }

    /// Loads all parseable result rows in stored order
    ///
    /// A missing file yields an empty vector. Individual rows that fail to
    /// parse are dropped with a logged warning; the rest are returned.
    pub fn load_rows(&self) -> Result<Vec<ResultRow>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| {
                TransentError::Checkpoint(format!(
                    "failed to open {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(line, error = %e, "Skipping unreadable checkpoint row");
                    continue;
                }
            };
            match ResultRow::from_fields(&record) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(line, error = %e, "Skipping unparseable checkpoint row");
                }
            }
        }

        Ok(rows)
    }

    /// Opens the store for appending, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn appender(&self) -> Result<CheckpointAppender> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TransentError::Checkpoint(format!(
                    "failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                TransentError::Checkpoint(format!(
                    "failed to open {} for append: {}",
                    self.path.display(),
                    e
                ))
            })?;

        Ok(CheckpointAppender {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file),
        })
    }
}

/// Append handle held by the writer task for the duration of a run
pub struct CheckpointAppender {
    writer: csv::Writer<File>,
}

impl CheckpointAppender {
    /// Appends rows and flushes
    ///
    /// Rows are written whole and flushed together, so a failure mid-batch
    /// never leaves a partial line in front of previously flushed rows.
    ///
    /// # Errors
    ///
    /// Returns a checkpoint error on any write or flush failure. The caller
    /// must treat this as fatal for the run.
    pub fn append_rows(&mut self, rows: &[ResultRow]) -> Result<()> {
        for row in rows {
            self.writer
                .write_record(row.to_fields())
                .map_err(|e| TransentError::Checkpoint(format!("append failed: {e}")))?;
        }
        self.writer
            .flush()
            .map_err(|e| TransentError::Checkpoint(format!("flush failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScoreMode, SentimentScore};
    use tempfile::TempDir;

    fn row(order: usize, id: &str) -> ResultRow {
        ResultRow {
            input_order: order,
            record_id: RecordId::new(id).unwrap(),
            score: SentimentScore::Dual {
                positive: 2,
                negative: -1,
            },
            detected_source_language: "id".to_string(),
            translated_text: format!("text {order}, with a comma"),
        }
    }

    #[test]
    fn test_recover_ids_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("absent_raw.csv"));
        assert!(store.recover_ids().is_empty());
    }

    #[test]
    fn test_append_then_recover() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));

        let mut appender = store.appender().unwrap();
        appender.append_rows(&[row(0, "a"), row(2, "c")]).unwrap();
        drop(appender);

        let ids = store.recover_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&RecordId::new("a").unwrap()));
        assert!(ids.contains(&RecordId::new("c").unwrap()));
        assert!(!ids.contains(&RecordId::new("b").unwrap()));
    }

    #[test]
    fn test_append_across_reopens() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));

        store.appender().unwrap().append_rows(&[row(0, "a")]).unwrap();
        store.appender().unwrap().append_rows(&[row(1, "b")]).unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record_id.as_str(), "a");
        assert_eq!(rows[1].record_id.as_str(), "b");
    }

    #[test]
    fn test_load_rows_roundtrips_quoting() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));

        let original = ResultRow {
            translated_text: "he said \"hi\", twice".to_string(),
            ..row(5, "q")
        };
        store
            .appender()
            .unwrap()
            .append_rows(std::slice::from_ref(&original))
            .unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows, vec![original]);
    }

    #[test]
    fn test_load_rows_skips_bad_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run_raw.csv");
        std::fs::write(
            &path,
            "0,a,2,-1,id,good\nnot-a-number,b,2,-1,id,bad\n1,c,3,-2,en,good\n",
        )
        .unwrap();

        let store = CheckpointStore::new(&path);
        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record_id.as_str(), "a");
        assert_eq!(rows[1].record_id.as_str(), "c");
    }

    #[test]
    fn test_recover_ids_reads_second_column() {
        // record_id lives in column 1, never column 0
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run_raw.csv");
        std::fs::write(&path, "17,the-id,1,-1,en,text\n").unwrap();

        let ids = CheckpointStore::new(&path).recover_ids();
        assert!(ids.contains(&RecordId::new("the-id").unwrap()));
        assert!(!ids.contains(&RecordId::new("17").unwrap()));
    }

    #[test]
    fn test_scale_mode_rows_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(dir.path().join("run_raw.csv"));

        let scale_row = ResultRow {
            input_order: 3,
            record_id: RecordId::new("s").unwrap(),
            score: SentimentScore::Scale(-2),
            detected_source_language: "fr".to_string(),
            translated_text: "meh".to_string(),
        };
        store
            .appender()
            .unwrap()
            .append_rows(std::slice::from_ref(&scale_row))
            .unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows[0].score.mode(), ScoreMode::Scale);
        assert_eq!(rows[0], scale_row);
    }
}
