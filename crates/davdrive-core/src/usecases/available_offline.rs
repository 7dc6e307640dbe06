//! Offline availability query use case

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::file::RemoteFile;
use crate::domain::newtypes::AccountName;
use crate::ports::IFileRepository;

/// Use case returning the files an account has pinned for offline use
pub struct GetFilesAvailableOfflineUseCase {
    file_repository: Arc<dyn IFileRepository>,
}

impl GetFilesAvailableOfflineUseCase {
    /// Creates the use case with its repository dependency
    pub fn new(file_repository: Arc<dyn IFileRepository>) -> Self {
        Self { file_repository }
    }

    /// Returns all offline-available files for `account`
    pub async fn execute(&self, account: &AccountName) -> Result<Vec<RemoteFile>> {
        self.file_repository
            .files_available_offline(account)
            .await
            .context("Failed to query offline-available files")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newtypes::FileId;
    use crate::ports::IFileRepository;

    struct FixedFileRepository {
        files: Vec<RemoteFile>,
    }

    #[async_trait::async_trait]
    impl IFileRepository for FixedFileRepository {
        async fn files_available_offline(
            &self,
            account: &AccountName,
        ) -> anyhow::Result<Vec<RemoteFile>> {
            Ok(self
                .files
                .iter()
                .filter(|f| f.owner() == account && f.is_available_offline())
                .cloned()
                .collect())
        }

        async fn find_by_id(
            &self,
            _account: &AccountName,
            id: FileId,
        ) -> anyhow::Result<Option<RemoteFile>> {
            Ok(self.files.iter().find(|f| f.id() == Some(id)).cloned())
        }
    }

    fn pinned(owner: &AccountName, id: i64, path: &str) -> RemoteFile {
        let mut file = RemoteFile::new(Some(FileId::new(id)), path, path, owner.clone());
        file.set_available_offline(true);
        file
    }

    #[tokio::test]
    async fn test_returns_only_owned_pinned_files() {
        let alice = AccountName::new("alice@host").unwrap();
        let bob = AccountName::new("bob@host").unwrap();

        let repo = Arc::new(FixedFileRepository {
            files: vec![
                pinned(&alice, 1, "/a.txt"),
                pinned(&bob, 2, "/b.txt"),
                RemoteFile::new(Some(FileId::new(3)), "/c.txt", "/c.txt", alice.clone()),
            ],
        });

        let usecase = GetFilesAvailableOfflineUseCase::new(repo);
        let files = usecase.execute(&alice).await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id(), Some(FileId::new(1)));
    }
}
