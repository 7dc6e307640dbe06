//! Tokio-backed deferred-task runner
//!
//! Adapter implementing the [`ITaskScheduler`] port over `tokio::spawn`
//! and a concurrent task registry. One spawned task per enqueue; tasks for
//! different files run concurrently with no ordering guarantee between
//! them. The runner owns the bounded retry/backoff policy: when a worker
//! reports [`WorkOutcome::Retry`], the attempt is repeated after an
//! exponentially growing delay until the retry budget is spent.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use davdrive_core::domain::TaskId;
use davdrive_core::ports::{ITaskExecutor, ITaskScheduler, TaskRecord, TaskSpec, TaskState, WorkOutcome};

/// Retry policy applied to workers that report a transient failure
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// How many times a task is re-run after its first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further attempt
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Duration::from_secs(10),
        }
    }
}

struct TaskEntry {
    state: TaskState,
    tags: Vec<String>,
    handle: Option<JoinHandle<()>>,
}

/// Tokio-backed implementation of the scheduler port
pub struct TokioTaskRunner {
    registry: Arc<DashMap<TaskId, TaskEntry>>,
    executor: Arc<dyn ITaskExecutor>,
    policy: RetryPolicy,
}

impl TokioTaskRunner {
    /// Creates a runner driving the given executor
    pub fn new(executor: Arc<dyn ITaskExecutor>, policy: RetryPolicy) -> Self {
        Self {
            registry: Arc::new(DashMap::new()),
            executor,
            policy,
        }
    }

    /// Returns the current state of a task, if known
    pub fn task_state(&self, id: TaskId) -> Option<TaskState> {
        self.registry.get(&id).map(|entry| entry.state)
    }

    /// Waits until a task reaches a terminal state and returns it
    ///
    /// Intended for callers that enqueue and then want the result, like
    /// the CLI. Polling is cheap here; the registry read is lock-free for
    /// non-conflicting keys.
    pub async fn wait_for(&self, id: TaskId) -> Option<TaskState> {
        loop {
            let state = self.task_state(id)?;
            if state.is_finished() {
                return Some(state);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    fn set_state(registry: &DashMap<TaskId, TaskEntry>, id: TaskId, state: TaskState) {
        if let Some(mut entry) = registry.get_mut(&id) {
            entry.state = state;
        }
    }
}

#[async_trait::async_trait]
impl ITaskScheduler for TokioTaskRunner {
    async fn enqueue(&self, spec: TaskSpec) -> anyhow::Result<TaskId> {
        let id = TaskId::new();
        self.registry.insert(
            id,
            TaskEntry {
                state: TaskState::Enqueued,
                tags: spec.tags.clone(),
                handle: None,
            },
        );

        let registry = self.registry.clone();
        let executor = self.executor.clone();
        let policy = self.policy;
        let payload = spec.payload;

        let handle = tokio::spawn(async move {
            Self::set_state(&registry, id, TaskState::Running);

            let mut attempt: u32 = 0;
            loop {
                match executor.execute(&payload).await {
                    WorkOutcome::Success => {
                        debug!("Task {id} succeeded");
                        Self::set_state(&registry, id, TaskState::Succeeded);
                        break;
                    }
                    WorkOutcome::Failure => {
                        Self::set_state(&registry, id, TaskState::Failed);
                        break;
                    }
                    WorkOutcome::Retry => {
                        if attempt >= policy.max_retries {
                            warn!("Task {id} exhausted its {} retries", policy.max_retries);
                            Self::set_state(&registry, id, TaskState::Failed);
                            break;
                        }
                        let delay = policy.backoff * 2u32.saturating_pow(attempt);
                        attempt += 1;
                        info!(
                            "Task {id} requested retry, attempt {attempt} in {}ms",
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        });

        if let Some(mut entry) = self.registry.get_mut(&id) {
            entry.handle = Some(handle);
        }

        debug!("Enqueued task {id} with tags {:?}", spec.tags);
        Ok(id)
    }

    async fn query_by_tags(&self, tags: &[String]) -> anyhow::Result<Vec<TaskRecord>> {
        let records = self
            .registry
            .iter()
            .filter(|entry| tags.iter().all(|tag| entry.tags.contains(tag)))
            .map(|entry| TaskRecord {
                id: *entry.key(),
                state: entry.state,
                tags: entry.tags.clone(),
            })
            .collect();
        Ok(records)
    }

    async fn cancel(&self, id: TaskId) -> anyhow::Result<()> {
        if let Some(mut entry) = self.registry.get_mut(&id) {
            if !entry.state.is_finished() {
                if let Some(handle) = entry.handle.take() {
                    handle.abort();
                }
                entry.state = TaskState::Cancelled;
                info!("Cancelled task {id}");
            }
        }
        Ok(())
    }
}
