//! Content source port (driven/secondary port)
//!
//! Resolves opaque content handles into readable bytes. On the original
//! platform this is the content-resolver service; the desktop adapter
//! resolves plain filesystem paths.

use thiserror::Error;

/// Failures while resolving or reading a content handle
///
/// Only `NoConnection` is retry-eligible; an invalid handle stays invalid
/// no matter how often the task is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The handle does not point at readable content
    #[error("unresolvable content handle: {0}")]
    Unresolvable(String),

    /// The handle resolved but reading failed
    #[error("i/o failure reading content: {0}")]
    Io(String),

    /// The content provider is remote and currently unreachable
    #[error("no connection to content provider: {0}")]
    NoConnection(String),
}

/// Content resolved from a handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// MIME type, if the provider knows one
    pub mime_type: Option<String>,
    /// The content bytes
    pub data: Vec<u8>,
}

impl ResolvedContent {
    /// Declared length of the content in bytes
    pub fn declared_len(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Port trait for resolving content handles
#[async_trait::async_trait]
pub trait IContentSource: Send + Sync {
    /// Opens the handle read-only and returns its content
    async fn resolve(&self, handle: &str) -> Result<ResolvedContent, ContentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_len_matches_data() {
        let content = ResolvedContent {
            mime_type: Some("text/plain".to_string()),
            data: b"hello".to_vec(),
        };
        assert_eq!(content.declared_len(), 5);
    }
}
