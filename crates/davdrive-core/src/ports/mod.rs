//! Port definitions (trait interfaces for adapters)

pub mod account_repository;
pub mod content_source;
pub mod file_repository;
pub mod preferences;
pub mod remote_storage;
pub mod task_scheduler;

pub use account_repository::IAccountRepository;
pub use content_source::{ContentError, IContentSource, ResolvedContent};
pub use file_repository::IFileRepository;
pub use preferences::IPreferencesStore;
pub use remote_storage::{IRemoteStorage, StorageError};
pub use task_scheduler::{
    ITaskExecutor, ITaskScheduler, TaskRecord, TaskSpec, TaskState, WorkOutcome,
};
