//! Domain error types
//!
//! Two taxonomies live here: `DomainError` for validation failures at
//! construction time, and `TransferError` for everything that can go wrong
//! while executing a transfer. `TransferError` variants partition into
//! retry-eligible (`Connectivity`) and terminal (everything else); the
//! worker maps them to task outcomes at the task boundary.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Blank or otherwise unusable account name
    #[error("Invalid account name: {0:?}")]
    InvalidAccountName(String),

    /// Invalid remote path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// Unrecognized on-completion behavior string
    #[error("Unrecognized upload behavior: {0:?}")]
    InvalidBehavior(String),

    /// ID parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors raised while executing a transfer
///
/// Only `Connectivity` is retry-eligible; the rest are terminal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Bad or missing input parameters. Terminal, never retried.
    #[error("invalid transfer parameters: {0}")]
    Validation(String),

    /// Connection to the server was lost or never established. Transient,
    /// eligible for the runner's bounded retry policy.
    #[error("no connection with server: {0}")]
    Connectivity(String),

    /// The server answered with a non-success status. Terminal.
    #[error("remote rejected transfer with status {status}")]
    RemoteRejection {
        /// Raw HTTP status code returned by the server
        status: u16,
    },

    /// The content handle could not be resolved or read. Terminal.
    #[error("content unavailable: {0}")]
    Content(String),

    /// Anything else. Terminal, logged with its cause.
    #[error("unexpected transfer failure: {0}")]
    Unexpected(String),
}

impl TransferError {
    /// Returns true if the runner should retry the task later
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::Connectivity(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::InvalidAccountName(" ".to_string());
        assert_eq!(err.to_string(), "Invalid account name: \" \"");

        let err = DomainError::InvalidBehavior("SHRED".to_string());
        assert_eq!(err.to_string(), "Unrecognized upload behavior: \"SHRED\"");
    }

    #[test]
    fn test_only_connectivity_is_retryable() {
        assert!(TransferError::Connectivity("timed out".into()).is_retryable());
        assert!(!TransferError::Validation("missing path".into()).is_retryable());
        assert!(!TransferError::RemoteRejection { status: 507 }.is_retryable());
        assert!(!TransferError::Content("gone".into()).is_retryable());
        assert!(!TransferError::Unexpected("?".into()).is_retryable());
    }

    #[test]
    fn test_remote_rejection_display_carries_status() {
        let err = TransferError::RemoteRejection { status: 423 };
        assert_eq!(err.to_string(), "remote rejected transfer with status 423");
    }
}
