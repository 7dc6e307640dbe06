//! WebDAV transport adapter for davdrive
//!
//! Implements the [`IRemoteStorage`](davdrive_core::ports::IRemoteStorage)
//! port over plain HTTP against an ownCloud-compatible DAV endpoint
//! (`remote.php/dav/files/<user>/...`).
//!
//! The adapter returns raw status codes and never retries on its own;
//! retry policy belongs to the transfer worker above it.

pub mod client;
pub mod upload;

pub use client::DavClient;

/// Header carrying the declared payload length on uploads
pub const HEADER_TOTAL_LENGTH: &str = "OC-Total-Length";

/// Header carrying the source modification time (seconds since epoch)
pub const HEADER_MTIME: &str = "X-OC-Mtime";
