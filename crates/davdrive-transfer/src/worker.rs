//! Upload worker - executes one upload task to completion or failure
//!
//! The worker is a single execution unit: validate parameters, resolve the
//! content handle, PUT to the server, interpret the status code. Every
//! error is caught at the task boundary and mapped to a [`WorkOutcome`];
//! nothing propagates past it. Retry pacing belongs to the runner - the
//! worker only decides *whether* an attempt is worth retrying.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use davdrive_core::domain::{
    Account, AccountName, OnCompletionBehavior, TransferError, TransferPayload, UploadOrder,
};
use davdrive_core::ports::{
    ContentError, IAccountRepository, IContentSource, IRemoteStorage, ITaskExecutor, StorageError,
    WorkOutcome,
};

/// Tag carried by uploads originating from folder auto-upload
pub const TAG_AUTO_UPLOAD: &str = "transfer:auto_upload";

/// Parameters of an upload after validation
struct ValidatedUpload {
    account: Account,
    content_handle: String,
    destination: String,
    last_modified: String,
    #[allow(dead_code)]
    behavior: OnCompletionBehavior,
}

/// Executes a single upload from a content handle to a remote path
pub struct UploadContentWorker {
    accounts: Arc<dyn IAccountRepository>,
    content_source: Arc<dyn IContentSource>,
    storage: Arc<dyn IRemoteStorage>,
}

impl UploadContentWorker {
    /// Creates a worker with its collaborators supplied explicitly
    pub fn new(
        accounts: Arc<dyn IAccountRepository>,
        content_source: Arc<dyn IContentSource>,
        storage: Arc<dyn IRemoteStorage>,
    ) -> Self {
        Self {
            accounts,
            content_source,
            storage,
        }
    }

    /// Returns true for the status codes that count as a confirmed write
    fn is_success(status: u16) -> bool {
        matches!(status, 200 | 201 | 204)
    }

    /// Validates the raw order parameters
    ///
    /// Any missing or malformed parameter is a terminal failure; retrying
    /// cannot make a bad order good.
    async fn validate(&self, order: &UploadOrder) -> Result<ValidatedUpload, TransferError> {
        let name = AccountName::new(order.account_name.clone())
            .map_err(|e| TransferError::Validation(e.to_string()))?;

        let account = self
            .accounts
            .find_by_name(&name)
            .await
            .map_err(|e| TransferError::Unexpected(format!("account lookup failed: {e:#}")))?
            .ok_or_else(|| TransferError::Validation(format!("unknown account: {name}")))?;

        if order.content_handle.trim().is_empty() {
            return Err(TransferError::Validation(
                "missing content handle".to_string(),
            ));
        }
        if order.destination.trim().is_empty() {
            return Err(TransferError::Validation(
                "missing destination path".to_string(),
            ));
        }
        if order.last_modified.trim().is_empty() {
            return Err(TransferError::Validation(
                "missing last-modified timestamp".to_string(),
            ));
        }

        let behavior = OnCompletionBehavior::parse(&order.behavior)
            .map_err(|e| TransferError::Validation(e.to_string()))?;

        Ok(ValidatedUpload {
            account,
            content_handle: order.content_handle.clone(),
            destination: order.destination.clone(),
            last_modified: order.last_modified.clone(),
            behavior,
        })
    }

    /// Runs one upload attempt
    async fn run(&self, order: &UploadOrder) -> Result<(), TransferError> {
        let upload = self.validate(order).await?;

        let content = self
            .content_source
            .resolve(&upload.content_handle)
            .await
            .map_err(|e| match e {
                ContentError::NoConnection(msg) => TransferError::Connectivity(msg),
                ContentError::Unresolvable(msg) | ContentError::Io(msg) => {
                    TransferError::Content(msg)
                }
            })?;

        debug!(
            "Uploading {} ({} bytes) for {}",
            upload.destination,
            content.declared_len(),
            upload.account.name()
        );

        let status = self
            .storage
            .put_file(
                &upload.account,
                &upload.destination,
                &content,
                &upload.last_modified,
            )
            .await
            .map_err(|e| match e {
                StorageError::NoConnection(msg) => TransferError::Connectivity(msg),
                StorageError::Transport(msg) => TransferError::Unexpected(msg),
            })?;

        if !Self::is_success(status) {
            return Err(TransferError::RemoteRejection { status });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ITaskExecutor for UploadContentWorker {
    async fn execute(&self, payload: &TransferPayload) -> WorkOutcome {
        let order = match payload {
            TransferPayload::Upload(order) => order,
            TransferPayload::Download(_) => {
                error!("Download payload handed to the upload worker");
                return WorkOutcome::Failure;
            }
        };

        match self.run(order).await {
            Ok(()) => {
                info!("Upload of {} completed", order.destination);
                WorkOutcome::Success
            }
            Err(e) if e.is_retryable() => {
                warn!("Upload of {} hit a connectivity loss, will retry: {e}", order.destination);
                WorkOutcome::Retry
            }
            Err(e) => {
                error!("Upload of {} failed: {e}", order.destination);
                WorkOutcome::Failure
            }
        }
    }
}
