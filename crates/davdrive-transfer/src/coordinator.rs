//! Transfer coordinator - dedups and enqueues transfer tasks
//!
//! The coordinator never executes anything itself. It checks the scheduler
//! for an equivalent in-flight task and either enqueues or declines. A
//! decline is signalled as `None`, never as an error; callers treat `None`
//! as "not submitted".

use std::sync::Arc;

use tracing::{debug, info, warn};

use davdrive_core::domain::{
    Account, DownloadOrder, RemoteFile, TaskId, TransferDirection, TransferPayload,
    TransferRequest, UploadOrder,
};
use davdrive_core::ports::{ITaskScheduler, TaskSpec};

/// Dedups and enqueues upload/download tasks
pub struct TransferCoordinator {
    scheduler: Arc<dyn ITaskScheduler>,
}

impl TransferCoordinator {
    /// Creates a coordinator over the given scheduler
    pub fn new(scheduler: Arc<dyn ITaskScheduler>) -> Self {
        Self { scheduler }
    }

    /// Enqueue a new download for `file` and return its task handle.
    ///
    /// Returns `None` if the file has no server identity or an equivalent
    /// download is already in flight.
    pub async fn download_file(&self, account: &Account, file: &RemoteFile) -> Option<TaskId> {
        let file_id = file.id()?;

        let request = TransferRequest {
            account: account.name().clone(),
            file_id: Some(file_id),
            file_name: file.name().to_string(),
            direction: TransferDirection::Download,
            payload: TransferPayload::Download(DownloadOrder {
                account_name: account.name().to_string(),
                file_id: file_id.value(),
                remote_path: file.remote_path().to_string(),
            }),
        };

        self.submit(request).await
    }

    /// Enqueue a new upload for `file` and return its task handle.
    ///
    /// Returns `None` if the file has no server identity or an equivalent
    /// upload is already in flight.
    pub async fn upload_file(
        &self,
        account: &Account,
        file: &RemoteFile,
        order: UploadOrder,
    ) -> Option<TaskId> {
        let request = TransferRequest {
            account: account.name().clone(),
            file_id: file.id(),
            file_name: file.name().to_string(),
            direction: TransferDirection::Upload,
            payload: TransferPayload::Upload(order),
        };

        self.submit(request).await
    }

    /// Submits a transfer request, deduplicating against in-flight tasks
    ///
    /// Returns the handle of the enqueued task, or `None` when the request
    /// was declined (no stable file identity, equivalent task in flight)
    /// or the scheduler could not be reached. The in-flight check is
    /// advisory; see the crate docs for the accepted race window.
    pub async fn submit(&self, request: TransferRequest) -> Option<TaskId> {
        let tags = match request.dedup_tags() {
            Some(tags) => tags,
            None => {
                debug!(
                    "{} has no server identity, transfer not enqueued",
                    request.file_name
                );
                return None;
            }
        };

        match self.is_already_enqueued(&tags).await {
            Ok(true) => {
                info!(
                    "Transfer of {} has not finished yet. Do not enqueue it again.",
                    request.file_name
                );
                return None;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(
                    "Could not check in-flight transfers for {}: {e:#}",
                    request.file_name
                );
                return None;
            }
        }

        let spec = TaskSpec {
            payload: request.payload,
            tags,
        };

        match self.scheduler.enqueue(spec).await {
            Ok(id) => {
                debug!("Enqueued transfer of {} as {}", request.file_name, id);
                Some(id)
            }
            Err(e) => {
                warn!("Failed to enqueue transfer of {}: {e:#}", request.file_name);
                None
            }
        }
    }

    /// Returns true if a task with all given tags is still in flight
    async fn is_already_enqueued(&self, tags: &[String]) -> anyhow::Result<bool> {
        let records = self.scheduler.query_by_tags(tags).await?;
        Ok(records.iter().any(|record| !record.state.is_finished()))
    }
}
