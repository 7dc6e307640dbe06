//! WebDAV client
//!
//! Provides a typed HTTP client for one account's DAV endpoint. Handles
//! authentication, URL construction with per-segment encoding, and the
//! mapping of transport failures into the port-level error taxonomy.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use davdrive_dav::DavClient;
//!
//! let client = DavClient::new("https://cloud.example.org", "alice", "secret");
//! let url = client.files_url("alice", "/Photos/summer 2026/img.jpg").unwrap();
//! assert!(url.as_str().ends_with("/remote.php/dav/files/alice/Photos/summer%202026/img.jpg"));
//! ```

use reqwest::{Client, Method, RequestBuilder};
use url::Url;

use davdrive_core::ports::StorageError;

/// Path prefix of the per-user files endpoint
const DAV_FILES_PREFIX: &str = "remote.php/dav/files";

/// HTTP client for one account's WebDAV endpoint
///
/// Wraps `reqwest::Client` with basic-auth credentials and base URL
/// construction. One client per account; the underlying connection pool is
/// shared across requests for that account.
///
/// The client performs no retries of its own. `reqwest` does not retry
/// failed requests, which keeps retry ownership with the transfer worker.
pub struct DavClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL of the server, e.g. `https://cloud.example.org`
    base_url: String,
    /// Login name for basic auth
    username: String,
    /// Password or app token for basic auth
    password: String,
}

impl DavClient {
    /// Creates a new DavClient for the given server and credentials
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the login name this client authenticates as
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL of a path under a user's files root
    ///
    /// Each segment of `remote_path` is percent-encoded individually, so
    /// names containing spaces or reserved characters survive untouched.
    ///
    /// # Errors
    /// [`StorageError::Transport`] if the base URL cannot be parsed.
    pub fn files_url(&self, username: &str, remote_path: &str) -> Result<Url, StorageError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StorageError::Transport(format!("invalid base URL: {e}")))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StorageError::Transport("base URL cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.extend(DAV_FILES_PREFIX.split('/'));
            segments.push(username);
            segments.extend(remote_path.split('/').filter(|s| !s.is_empty()));
        }

        Ok(url)
    }

    /// Creates an authenticated request builder for an absolute URL
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }
}

/// Maps a `reqwest` error into the port-level storage error taxonomy
///
/// Connect failures and timeouts are the connectivity-loss signal the
/// worker retries on; everything else is a plain transport failure.
pub(crate) fn map_transport_error(err: reqwest::Error) -> StorageError {
    if err.is_connect() || err.is_timeout() {
        StorageError::NoConnection(err.to_string())
    } else {
        StorageError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_url_plain() {
        let client = DavClient::new("https://cloud.example.org", "alice", "pw");
        let url = client.files_url("alice", "/docs/report.pdf").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.org/remote.php/dav/files/alice/docs/report.pdf"
        );
    }

    #[test]
    fn test_files_url_encodes_segments() {
        let client = DavClient::new("https://cloud.example.org", "alice", "pw");
        let url = client
            .files_url("alice", "/summer 2026/strand & meer.jpg")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.org/remote.php/dav/files/alice/summer%202026/strand%20&%20meer.jpg"
        );
    }

    #[test]
    fn test_files_url_survives_base_with_path() {
        let client = DavClient::new("https://example.org/owncloud", "bob", "pw");
        let url = client.files_url("bob", "/a.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/owncloud/remote.php/dav/files/bob/a.txt"
        );
    }

    #[test]
    fn test_files_url_rejects_garbage_base() {
        let client = DavClient::new("not a url", "alice", "pw");
        assert!(matches!(
            client.files_url("alice", "/x"),
            Err(StorageError::Transport(_))
        ));
    }

    #[test]
    fn test_files_url_collapses_duplicate_slashes() {
        let client = DavClient::new("https://cloud.example.org", "alice", "pw");
        let url = client.files_url("alice", "//docs//a.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.org/remote.php/dav/files/alice/docs/a.txt"
        );
    }
}
