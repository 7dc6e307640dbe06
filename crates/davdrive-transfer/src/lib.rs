//! Transfer coordination for davdrive
//!
//! Three pieces live here:
//! - [`TransferCoordinator`] - dedups and enqueues upload/download tasks
//!   against the scheduler port,
//! - [`UploadContentWorker`] - executes a single upload from a content
//!   handle to a remote path, mapping every error to a task outcome,
//! - [`TokioTaskRunner`] - a tokio-backed adapter implementing the
//!   scheduler port, owning the bounded retry/backoff policy.
//!
//! The coordinator's dedup check is advisory: it queries the scheduler by
//! tags once at submission time and is not a lock. Two near-simultaneous
//! submissions for the same file can rarely both land; duplicate PUTs are
//! idempotent at the server, so this costs at most one extra enqueue.

pub mod content;
pub mod coordinator;
pub mod runner;
pub mod worker;

pub use content::FsContentSource;
pub use coordinator::TransferCoordinator;
pub use runner::{RetryPolicy, TokioTaskRunner};
pub use worker::{UploadContentWorker, TAG_AUTO_UPLOAD};
