//! Upload operations against the DAV files endpoint
//!
//! A single streaming PUT per file. The server treats each PUT as atomic,
//! so there is no partial-state cleanup on failure; the raw status code is
//! handed back for the caller to interpret.

use reqwest::Method;
use tracing::debug;

use davdrive_core::domain::Account;
use davdrive_core::ports::{IRemoteStorage, ResolvedContent, StorageError};

use crate::client::{map_transport_error, DavClient};
use crate::{HEADER_MTIME, HEADER_TOTAL_LENGTH};

/// Uploads content to `remote_path` under `username`'s files root
///
/// Attaches the declared content length and source modification time as
/// protocol metadata headers, plus the MIME type when the content source
/// knows one.
///
/// # Returns
/// The raw HTTP status code of the server's answer.
///
/// # Errors
/// [`StorageError::NoConnection`] when the server is unreachable,
/// [`StorageError::Transport`] for any other transport failure.
pub async fn put_file(
    client: &DavClient,
    username: &str,
    remote_path: &str,
    content: &ResolvedContent,
    last_modified: &str,
) -> Result<u16, StorageError> {
    let url = client.files_url(username, remote_path)?;
    debug!(
        "Uploading {} bytes: {} -> {}",
        content.declared_len(),
        remote_path,
        url
    );

    let mut request = client
        .request(Method::PUT, url)
        .header(HEADER_TOTAL_LENGTH, content.declared_len().to_string())
        .header(HEADER_MTIME, last_modified);

    if let Some(mime) = &content.mime_type {
        request = request.header("Content-Type", mime.clone());
    }

    let response = request
        .body(content.data.clone())
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status().as_u16();
    debug!("Upload of {} answered with status {}", remote_path, status);
    Ok(status)
}

#[async_trait::async_trait]
impl IRemoteStorage for DavClient {
    async fn put_file(
        &self,
        account: &Account,
        remote_path: &str,
        content: &ResolvedContent,
        last_modified: &str,
    ) -> Result<u16, StorageError> {
        put_file(self, account.username(), remote_path, content, last_modified).await
    }
}
