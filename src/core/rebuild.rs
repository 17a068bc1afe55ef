//! Rebuild pass
//!
//! Converts the unordered, append-only checkpoint log into the final
//! ordered artifact: parse, deduplicate by record id, stable-sort by input
//! order, write with a header. Runs after every pipeline drain and is also
//! exposed as a standalone CLI command.

use crate::core::checkpoint::CheckpointStore;
use crate::domain::{Result, ScoreMode, TransentError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Rebuilds the final artifact from a checkpoint store
pub struct Rebuilder {
    store: CheckpointStore,
    artifact_path: PathBuf,
    mode: ScoreMode,
}

impl Rebuilder {
    /// Creates a rebuilder for the given store and artifact target
    pub fn new(store: CheckpointStore, artifact_path: impl Into<PathBuf>, mode: ScoreMode) -> Self {
        Self {
            store,
            artifact_path: artifact_path.into(),
            mode,
        }
    }

    /// Path the final artifact is written to
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Runs the rebuild
    ///
    /// Returns `None` when the checkpoint store is absent or holds no
    /// parseable rows (a no-op, not an error), otherwise the number of rows
    /// written to the artifact.
    ///
    /// Duplicate record ids keep the first occurrence in stored order;
    /// duplicates should not occur under correct recovery, so each one is
    /// logged. Rows whose score shape differs from the configured mode are
    /// skipped with a warning to keep the artifact rectangular.
    ///
    /// # Errors
    ///
    /// Returns an error only if the artifact itself cannot be written.
    pub fn rebuild(&self) -> Result<Option<usize>> {
        let rows = self.store.load_rows()?;
        if rows.is_empty() {
            tracing::info!(
                checkpoint = %self.store.path().display(),
                "Nothing to rebuild - no checkpoint rows"
            );
            return Ok(None);
        }

        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(rows.len());
        for row in rows {
            if row.score.mode() != self.mode {
                tracing::warn!(
                    record_id = %row.record_id,
                    row_mode = %row.score.mode(),
                    configured_mode = %self.mode,
                    "Skipping checkpoint row with mismatched score shape"
                );
                continue;
            }
            if seen.insert(row.record_id.clone()) {
                unique.push(row);
            } else {
                tracing::warn!(
                    record_id = %row.record_id,
                    "Duplicate checkpoint row - keeping first occurrence"
                );
            }
        }

        if unique.is_empty() {
            return Ok(None);
        }

        // Stable sort keeps first-occurrence order among equal keys.
        unique.sort_by_key(|row| row.input_order);

        if let Some(parent) = self.artifact_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TransentError::Rebuild(format!(
                    "failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut writer = csv::Writer::from_path(&self.artifact_path).map_err(|e| {
            TransentError::Rebuild(format!(
                "failed to create {}: {}",
                self.artifact_path.display(),
                e
            ))
        })?;

        let mut header = vec!["order", "tweetid"];
        header.extend_from_slice(self.mode.score_headers());
        header.push("src_lang");
        header.push("translation");
        writer
            .write_record(&header)
            .map_err(|e| TransentError::Rebuild(format!("failed to write header: {e}")))?;

        for row in &unique {
            writer
                .write_record(row.to_fields())
                .map_err(|e| TransentError::Rebuild(format!("failed to write row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| TransentError::Rebuild(format!("failed to flush artifact: {e}")))?;

        tracing::info!(
            artifact = %self.artifact_path.display(),
            rows = unique.len(),
            "Rebuilt final artifact"
        );

        Ok(Some(unique.len()))
    }
}
