//! Filesystem content source
//!
//! Desktop adapter for the content-source port: handles are plain paths
//! (an optional `file://` prefix is accepted), resolved with `tokio::fs`.
//! The MIME type is derived from the file extension; unknown extensions
//! yield none, which the transport simply omits.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use davdrive_core::ports::{ContentError, IContentSource, ResolvedContent};

/// Resolves content handles against the local filesystem
#[derive(Debug, Default)]
pub struct FsContentSource;

impl FsContentSource {
    /// Creates a filesystem content source
    pub fn new() -> Self {
        Self
    }

    fn strip_scheme(handle: &str) -> &str {
        handle.strip_prefix("file://").unwrap_or(handle)
    }

    fn mime_for_extension(path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let mime = match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "mp4" => "video/mp4",
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            "json" => "application/json",
            _ => return None,
        };
        Some(mime.to_string())
    }
}

#[async_trait::async_trait]
impl IContentSource for FsContentSource {
    async fn resolve(&self, handle: &str) -> Result<ResolvedContent, ContentError> {
        let path = Path::new(Self::strip_scheme(handle));

        let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                ContentError::Unresolvable(format!("{}: {e}", path.display()))
            }
            _ => ContentError::Io(format!("{}: {e}", path.display())),
        })?;

        debug!("Resolved {} ({} bytes)", path.display(), data.len());

        Ok(ResolvedContent {
            mime_type: Self::mime_for_extension(path),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_resolves_existing_file() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        tmp.write_all(b"hello davdrive").unwrap();

        let source = FsContentSource::new();
        let content = source.resolve(tmp.path().to_str().unwrap()).await.unwrap();

        assert_eq!(content.data, b"hello davdrive");
        assert_eq!(content.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(content.declared_len(), 14);
    }

    #[tokio::test]
    async fn test_accepts_file_scheme_prefix() {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        tmp.write_all(b"{}").unwrap();

        let source = FsContentSource::new();
        let handle = format!("file://{}", tmp.path().display());
        let content = source.resolve(&handle).await.unwrap();

        assert_eq!(content.mime_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_missing_file_is_unresolvable() {
        let source = FsContentSource::new();
        let err = source.resolve("/no/such/file.jpg").await.unwrap_err();
        assert!(matches!(err, ContentError::Unresolvable(_)));
    }

    #[tokio::test]
    async fn test_unknown_extension_has_no_mime() {
        let mut tmp = tempfile::Builder::new().suffix(".weird").tempfile().unwrap();
        tmp.write_all(b"x").unwrap();

        let source = FsContentSource::new();
        let content = source.resolve(tmp.path().to_str().unwrap()).await.unwrap();
        assert!(content.mime_type.is_none());
    }
}
