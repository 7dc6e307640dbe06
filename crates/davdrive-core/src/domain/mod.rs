//! Domain entities and value types

pub mod account;
pub mod backup;
pub mod errors;
pub mod file;
pub mod newtypes;
pub mod transfer;

pub use account::{Account, AccountState};
pub use backup::{FolderBackupConfig, OnCompletionBehavior};
pub use errors::{DomainError, TransferError};
pub use file::RemoteFile;
pub use newtypes::{AccountName, FileId, TaskId};
pub use transfer::{
    DownloadOrder, TransferDirection, TransferPayload, TransferRequest, UploadOrder,
};
