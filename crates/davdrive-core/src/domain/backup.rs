//! Folder auto-upload (backup) configuration
//!
//! One configuration per watched folder. The interesting part is the
//! on-completion behavior: what happens to the source content once the
//! upload has been confirmed by the server.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::AccountName;

/// What to do with the source content after a successful upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnCompletionBehavior {
    /// Move the source into the synced folder structure
    Move,
    /// Copy the source, leaving the original in place
    Copy,
    /// Leave the source alone entirely
    Forget,
}

impl OnCompletionBehavior {
    /// Parses a behavior from its wire/storage representation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidBehavior` for unrecognized strings.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_ascii_uppercase().as_str() {
            "MOVE" => Ok(OnCompletionBehavior::Move),
            "COPY" => Ok(OnCompletionBehavior::Copy),
            "FORGET" => Ok(OnCompletionBehavior::Forget),
            _ => Err(DomainError::InvalidBehavior(s.to_string())),
        }
    }
}

impl std::fmt::Display for OnCompletionBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnCompletionBehavior::Move => write!(f, "MOVE"),
            OnCompletionBehavior::Copy => write!(f, "COPY"),
            OnCompletionBehavior::Forget => write!(f, "FORGET"),
        }
    }
}

/// Auto-upload configuration for one watched folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderBackupConfig {
    /// Account the uploads belong to
    pub account: AccountName,
    /// Local folder being watched
    pub source_path: String,
    /// Remote folder receiving the uploads
    pub upload_path: String,
    /// What happens to sources after upload
    pub behavior: OnCompletionBehavior,
    /// Only upload on unmetered connections
    pub wifi_only: bool,
    /// Only upload while the device is charging
    pub charging_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_behaviors() {
        assert_eq!(
            OnCompletionBehavior::parse("MOVE").unwrap(),
            OnCompletionBehavior::Move
        );
        assert_eq!(
            OnCompletionBehavior::parse("copy").unwrap(),
            OnCompletionBehavior::Copy
        );
        assert_eq!(
            OnCompletionBehavior::parse("Forget").unwrap(),
            OnCompletionBehavior::Forget
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(OnCompletionBehavior::parse("SHRED").is_err());
        assert!(OnCompletionBehavior::parse("").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for behavior in [
            OnCompletionBehavior::Move,
            OnCompletionBehavior::Copy,
            OnCompletionBehavior::Forget,
        ] {
            let parsed = OnCompletionBehavior::parse(&behavior.to_string()).unwrap();
            assert_eq!(parsed, behavior);
        }
    }
}
