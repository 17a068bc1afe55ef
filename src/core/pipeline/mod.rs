//! Concurrent batch pipeline
//!
//! A fixed pool of worker tasks drains the work queue, a single writer
//! task drains the result channel into the checkpoint store, and the
//! coordinator owns the lifecycle around them.
//!
//! The work queue is the only structure workers share for input: a job
//! popped from it is owned by exactly one worker (at-most-one-claim).
//! Results flow through a bounded multi-producer/single-consumer channel
//! sized to the job count, so producers never block on a full queue.

pub mod coordinator;
pub mod worker;
pub mod writer;

pub use coordinator::PipelineCoordinator;
pub use worker::{Worker, WorkerOutcome};
pub use writer::{ProgressLine, Writer, WriterReport};

use crate::core::batch::Job;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Shared pull-only job queue
///
/// Populated once by the coordinator; workers only pop. The mutex guards a
/// single pop, so the critical section is a few pointer moves.
pub type WorkQueue = Arc<Mutex<VecDeque<Job>>>;

/// Builds the work queue from the planned job list
pub fn work_queue(jobs: Vec<Job>) -> WorkQueue {
    Arc::new(Mutex::new(VecDeque::from(jobs)))
}

/// Pops one job, non-blocking; `None` means the queue is drained
pub fn pop_job(queue: &WorkQueue) -> Option<Job> {
    let mut guard = queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.pop_front()
}
