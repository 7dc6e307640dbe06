//! Task scheduler port (driven/secondary port)
//!
//! This module defines the contract the transfer layer consumes from a
//! deferred-task runner: enqueue a tagged work item, observe task records
//! by tag, cancel. The runner owns execution, retry pacing and backoff;
//! workers only report an outcome per attempt.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - `TaskRecord` is a port-level DTO owned by the scheduler; the
//!   coordinator observes it but never stores it.
//! - `query_by_tags` matches tasks carrying **all** of the given tags,
//!   which is what makes tag triples usable as a dedup identity.

use serde::{Deserialize, Serialize};

use crate::domain::newtypes::TaskId;
use crate::domain::transfer::TransferPayload;

/// Lifecycle state of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Accepted by the scheduler, not started yet
    Enqueued,
    /// Currently executing (or sleeping between retry attempts)
    Running,
    /// Finished successfully
    Succeeded,
    /// Finished with a terminal failure
    Failed,
    /// Cancelled before completion
    Cancelled,
}

impl TaskState {
    /// Returns true if the task has reached a terminal state
    ///
    /// A task counts as in-flight for dedup purposes exactly while this
    /// returns false.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            TaskState::Succeeded | TaskState::Failed | TaskState::Cancelled
        )
    }
}

/// A task as observed through the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Handle issued at enqueue time
    pub id: TaskId,
    /// Current lifecycle state
    pub state: TaskState,
    /// Tags attached at enqueue time
    pub tags: Vec<String>,
}

/// Work item submitted to the scheduler
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Parameters for the worker that will execute this task
    pub payload: TransferPayload,
    /// Opaque labels for later querying
    pub tags: Vec<String>,
}

/// Outcome of a single worker execution
///
/// Errors never cross the task boundary; the worker maps every internal
/// error onto one of these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    /// The work completed; the task is done
    Success,
    /// A transient condition was hit; the scheduler should run the task
    /// again later under its bounded backoff policy
    Retry,
    /// A terminal condition was hit; the task is done and failed
    Failure,
}

/// Port trait for the deferred-task scheduler
#[async_trait::async_trait]
pub trait ITaskScheduler: Send + Sync {
    /// Accepts a work item and returns its handle
    ///
    /// # Arguments
    /// * `spec` - The payload and tags of the task
    ///
    /// # Returns
    /// The handle of the newly enqueued task
    async fn enqueue(&self, spec: TaskSpec) -> anyhow::Result<TaskId>;

    /// Returns records of all known tasks carrying **all** given tags
    ///
    /// # Arguments
    /// * `tags` - Tags that must all be present on a matching task
    async fn query_by_tags(&self, tags: &[String]) -> anyhow::Result<Vec<TaskRecord>>;

    /// Requests cancellation of a task
    ///
    /// Cancelling an already-finished task is a no-op. The affected worker
    /// observes cancellation as a non-error terminal state.
    async fn cancel(&self, id: TaskId) -> anyhow::Result<()>;
}

/// Port trait for the unit of work a scheduler drives
///
/// Implemented by workers; the runner calls `execute` once per attempt and
/// interprets the returned [`WorkOutcome`].
#[async_trait::async_trait]
pub trait ITaskExecutor: Send + Sync {
    /// Executes one attempt of the given payload
    async fn execute(&self, payload: &TransferPayload) -> WorkOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states_are_finished() {
        assert!(TaskState::Succeeded.is_finished());
        assert!(TaskState::Failed.is_finished());
        assert!(TaskState::Cancelled.is_finished());
    }

    #[test]
    fn test_inflight_states_are_not_finished() {
        assert!(!TaskState::Enqueued.is_finished());
        assert!(!TaskState::Running.is_finished());
    }
}
