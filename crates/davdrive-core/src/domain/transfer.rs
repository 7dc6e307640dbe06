//! Transfer request model and tagging scheme
//!
//! A transfer is an upload or download of one file for one account. The
//! coordinator dedups submissions by the `(direction, file id, account)`
//! triple, expressed as scheduler tags so that in-flight work can be found
//! again by querying the scheduler rather than keeping local state.

use serde::{Deserialize, Serialize};

use super::newtypes::{AccountName, FileId};

/// Tag carried by every upload task
pub const TAG_TRANSFER_UPLOAD: &str = "transfer:upload";
/// Tag carried by every download task
pub const TAG_TRANSFER_DOWNLOAD: &str = "transfer:download";

/// Direction of a transfer, from the client's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    /// Local content pushed to the server
    Upload,
    /// Server content fetched locally
    Download,
}

impl TransferDirection {
    /// Returns the scheduler tag for this direction
    pub fn tag(&self) -> &'static str {
        match self {
            TransferDirection::Upload => TAG_TRANSFER_UPLOAD,
            TransferDirection::Download => TAG_TRANSFER_DOWNLOAD,
        }
    }
}

/// Returns the scheduler tag identifying a file
pub fn file_tag(id: FileId) -> String {
    format!("file:{id}")
}

/// Returns the scheduler tag identifying an account
pub fn account_tag(account: &AccountName) -> String {
    format!("account:{account}")
}

/// Raw parameters of a single upload execution
///
/// Fields are carried as strings, matching the untyped parameter map the
/// scheduler hands to a worker; the worker validates them before doing any
/// I/O. An order is immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOrder {
    /// Name of the owning account (resolved by the worker)
    pub account_name: String,
    /// Opaque content handle, resolved through the content-source port
    pub content_handle: String,
    /// Destination path on the server, relative to the account's DAV root
    pub destination: String,
    /// Last modification time of the content, seconds since epoch
    pub last_modified: String,
    /// What to do with the source content after a successful upload
    pub behavior: String,
}

/// Raw parameters of a single download execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOrder {
    /// Name of the owning account
    pub account_name: String,
    /// Server identity of the file to fetch
    pub file_id: i64,
    /// Remote path to fetch
    pub remote_path: String,
}

/// Work item handed to the scheduler on enqueue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferPayload {
    /// Execute an upload with the given parameters
    Upload(UploadOrder),
    /// Execute a download with the given parameters
    Download(DownloadOrder),
}

/// A request to transfer one file for one account
///
/// Identity for dedup purposes is `(direction, file_id, account)`; the
/// file name is informational only.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Owning account
    pub account: AccountName,
    /// Server identity of the file, if it has one
    pub file_id: Option<FileId>,
    /// File name, for logging
    pub file_name: String,
    /// Direction of the transfer
    pub direction: TransferDirection,
    /// Parameters for the worker executing this transfer
    pub payload: TransferPayload,
}

impl TransferRequest {
    /// Returns the tags identifying this transfer for dedup queries
    ///
    /// `None` if the file has no stable identity; such requests cannot be
    /// deduplicated and are declined by the coordinator.
    pub fn dedup_tags(&self) -> Option<Vec<String>> {
        let file_id = self.file_id?;
        Some(vec![
            self.direction.tag().to_string(),
            file_tag(file_id),
            account_tag(&self.account),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_request(file_id: Option<FileId>) -> TransferRequest {
        let account = AccountName::new("alice@cloud.example.org").unwrap();
        TransferRequest {
            account: account.clone(),
            file_id,
            file_name: "img_0001.jpg".to_string(),
            direction: TransferDirection::Upload,
            payload: TransferPayload::Upload(UploadOrder {
                account_name: account.to_string(),
                content_handle: "/camera/img_0001.jpg".to_string(),
                destination: "/Photos/img_0001.jpg".to_string(),
                last_modified: "1754000000".to_string(),
                behavior: "FORGET".to_string(),
            }),
        }
    }

    #[test]
    fn test_direction_tags_differ() {
        assert_eq!(TransferDirection::Upload.tag(), "transfer:upload");
        assert_eq!(TransferDirection::Download.tag(), "transfer:download");
        assert_ne!(
            TransferDirection::Upload.tag(),
            TransferDirection::Download.tag()
        );
    }

    #[test]
    fn test_dedup_tags_cover_identity_triple() {
        let request = upload_request(Some(FileId::new(99)));
        let tags = request.dedup_tags().unwrap();
        assert_eq!(
            tags,
            vec![
                "transfer:upload".to_string(),
                "file:99".to_string(),
                "account:alice@cloud.example.org".to_string(),
            ]
        );
    }

    #[test]
    fn test_dedup_tags_none_without_identity() {
        let request = upload_request(None);
        assert!(request.dedup_tags().is_none());
    }

    #[test]
    fn test_payload_serde_roundtrip() {
        let request = upload_request(Some(FileId::new(3)));
        let json = serde_json::to_string(&request.payload).unwrap();
        let back: TransferPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(request.payload, back);
    }
}
