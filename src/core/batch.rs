//! Job planning
//!
//! The batcher partitions the unprocessed portion of the dataset into
//! fixed-size ordered jobs. Records whose ids were recovered from the
//! checkpoint store are excluded before chunking, so a resumed run only
//! touches the remainder.

use crate::domain::{Record, RecordId};
use std::collections::HashSet;

/// An ordered batch of `input_order` indices processed together
///
/// Created once during planning, consumed exactly once by exactly one
/// worker. All jobs hold `batch_size` indices except possibly the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    indices: Vec<usize>,
}

impl Job {
    /// Member `input_order` indices, in input order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of records in this job
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the job holds no indices
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
impl Job {
    pub(crate) fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }
}

/// Computes the ordered job list covering every unprocessed record
///
/// Records whose id appears in `completed` are skipped; the remaining
/// indices are grouped into consecutive chunks of `batch_size` (the final
/// chunk may be shorter). An empty return means there is nothing to do.
///
/// # Panics
///
/// Debug-asserts that `batch_size` is non-zero; configuration validation
/// rejects zero before planning runs.
pub fn plan_jobs(records: &[Record], completed: &HashSet<RecordId>, batch_size: usize) -> Vec<Job> {
    debug_assert!(batch_size > 0, "batch_size validated at configuration time");

    let remaining: Vec<usize> = records
        .iter()
        .filter(|record| !completed.contains(&record.record_id))
        .map(|record| record.input_order)
        .collect();

    let jobs: Vec<Job> = remaining
        .chunks(batch_size.max(1))
        .map(|chunk| Job {
            indices: chunk.to_vec(),
        })
        .collect();

    tracing::info!(
        total_records = records.len(),
        already_completed = records.len() - remaining.len(),
        jobs = jobs.len(),
        batch_size,
        "Planned jobs"
    );

    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn records(ids: &[&str]) -> Vec<Record> {
        ids.iter()
            .enumerate()
            .map(|(input_order, id)| Record {
                record_id: RecordId::new(*id).unwrap(),
                text: format!("text-{id}"),
                input_order,
            })
            .collect()
    }

    fn completed(ids: &[&str]) -> HashSet<RecordId> {
        ids.iter().map(|id| RecordId::new(*id).unwrap()).collect()
    }

    #[test]
    fn test_plan_jobs_fresh_run() {
        let records = records(&["a", "b", "c", "d", "e"]);
        let jobs = plan_jobs(&records, &HashSet::new(), 2);

        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].indices(), &[0, 1]);
        assert_eq!(jobs[1].indices(), &[2, 3]);
        // Final chunk may be shorter
        assert_eq!(jobs[2].indices(), &[4]);
    }

    #[test]
    fn test_plan_jobs_excludes_completed() {
        // ids a,b,c at order 0,1,2 with a and c already checkpointed must
        // yield exactly one job holding b's index
        let records = records(&["a", "b", "c"]);
        let jobs = plan_jobs(&records, &completed(&["a", "c"]), 10);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].indices(), &[1]);
    }

    #[test]
    fn test_plan_jobs_nothing_remaining() {
        let records = records(&["a", "b"]);
        let jobs = plan_jobs(&records, &completed(&["a", "b"]), 2);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_plan_jobs_empty_dataset() {
        let jobs = plan_jobs(&[], &HashSet::new(), 5);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_plan_jobs_batch_of_one() {
        let records = records(&["a", "b", "c"]);
        let jobs = plan_jobs(&records, &HashSet::new(), 1);

        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|j| j.len() == 1));
    }

    #[test]
    fn test_plan_jobs_gap_in_remaining_indices() {
        // Completed records in the middle leave non-consecutive indices in
        // one job: chunking is over remaining positions, not raw offsets.
        let records = records(&["a", "b", "c", "d"]);
        let jobs = plan_jobs(&records, &completed(&["b"]), 3);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].indices(), &[0, 2, 3]);
    }
}
