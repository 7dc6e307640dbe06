//! Remote storage port (driven/secondary port)
//!
//! Interface for the transport that writes file content to the server.
//! The contract is deliberately thin: one streaming PUT, raw status code
//! back. Interpretation of status codes and all retry policy belong to the
//! caller — implementations MUST NOT retry on connection failure, or a
//! lower layer could double-write behind the worker's back.

use thiserror::Error;

use crate::domain::account::Account;

use super::content_source::ResolvedContent;

/// Transport-level failures, partitioned for the worker's retry decision
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The server could not be reached (connect failure, timeout, broken
    /// connection). The only retry-eligible transport error.
    #[error("no connection with server: {0}")]
    NoConnection(String),

    /// Any other transport failure (TLS, protocol, request build)
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Port trait for writing file content to the remote store
///
/// Each PUT is atomic from the client's perspective; there is no
/// partial-state cleanup to perform on failure.
#[async_trait::async_trait]
pub trait IRemoteStorage: Send + Sync {
    /// Uploads content to `remote_path` under the account's DAV root
    ///
    /// The declared content length and `last_modified` (seconds since
    /// epoch) are attached as protocol metadata headers.
    ///
    /// # Returns
    /// The raw HTTP status code; callers decide what counts as success.
    ///
    /// # Errors
    /// [`StorageError::NoConnection`] when the server is unreachable,
    /// [`StorageError::Transport`] for everything else.
    async fn put_file(
        &self,
        account: &Account,
        remote_path: &str,
        content: &ResolvedContent,
        last_modified: &str,
    ) -> Result<u16, StorageError>;
}
