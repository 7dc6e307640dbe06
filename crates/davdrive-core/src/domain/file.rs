//! Remote file domain entity

use serde::{Deserialize, Serialize};

use super::newtypes::{AccountName, FileId};

/// A file as known to the server, owned by one account
///
/// The `id` is assigned by the server; a file that has not been seen by the
/// server yet has none, which makes it ineligible for transfer dedup (there
/// is nothing stable to key the check on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Server-assigned identity (None until first sync)
    id: Option<FileId>,
    /// File name, without path
    name: String,
    /// Full remote path, e.g. `/Photos/2026/img_0001.jpg`
    remote_path: String,
    /// Server etag from the last sync, if any
    etag: Option<String>,
    /// MIME type as reported by the server, if any
    mime_type: Option<String>,
    /// Size in bytes, if known
    size: Option<u64>,
    /// Whether the file is pinned for offline availability
    available_offline: bool,
    /// Owning account
    owner: AccountName,
}

impl RemoteFile {
    /// Creates a RemoteFile for an already-synced server file
    pub fn new(
        id: Option<FileId>,
        name: impl Into<String>,
        remote_path: impl Into<String>,
        owner: AccountName,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            remote_path: remote_path.into(),
            etag: None,
            mime_type: None,
            size: None,
            available_offline: false,
            owner,
        }
    }

    /// Returns the server-assigned id, if any
    pub fn id(&self) -> Option<FileId> {
        self.id
    }

    /// Returns true if the file has a stable server identity
    pub fn has_identity(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full remote path
    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// Returns the last-known server etag
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Returns the MIME type, if known
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the size in bytes, if known
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns true if the file is pinned for offline availability
    pub fn is_available_offline(&self) -> bool {
        self.available_offline
    }

    /// Returns the owning account name
    pub fn owner(&self) -> &AccountName {
        &self.owner
    }

    /// Updates the server etag after a sync
    pub fn set_etag(&mut self, etag: impl Into<String>) {
        self.etag = Some(etag.into());
    }

    /// Sets the MIME type
    pub fn set_mime_type(&mut self, mime: impl Into<String>) {
        self.mime_type = Some(mime.into());
    }

    /// Sets the size in bytes
    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    /// Pins or unpins the file for offline availability
    pub fn set_available_offline(&mut self, available: bool) {
        self.available_offline = available;
    }
}
