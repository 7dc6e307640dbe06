//! File repository port (driven/secondary port)

use crate::domain::file::RemoteFile;
use crate::domain::newtypes::{AccountName, FileId};

/// Port trait for querying the locally-known file tree
#[async_trait::async_trait]
pub trait IFileRepository: Send + Sync {
    /// Returns all files pinned for offline availability for one account
    async fn files_available_offline(
        &self,
        account: &AccountName,
    ) -> anyhow::Result<Vec<RemoteFile>>;

    /// Finds a file by its server identity
    async fn find_by_id(
        &self,
        account: &AccountName,
        id: FileId,
    ) -> anyhow::Result<Option<RemoteFile>>;
}
