//! Account domain entity
//!
//! An account pairs a server URL with the credentials identity used for
//! WebDAV requests. Transfers are always owned by exactly one account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::AccountName;

/// Represents the current state of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountState {
    /// Account is active and can transfer files
    #[default]
    Active,
    /// Stored credentials were rejected by the server, needs re-login
    CredentialsExpired,
    /// Account is in an error state with a description
    Error(String),
}

impl AccountState {
    /// Returns true if the account can perform transfer operations
    pub fn can_transfer(&self) -> bool {
        matches!(self, AccountState::Active)
    }
}

impl std::fmt::Display for AccountState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountState::Active => write!(f, "active"),
            AccountState::CredentialsExpired => write!(f, "credentials_expired"),
            AccountState::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// Represents a user's account on a self-hosted sync server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account name in `user@host` form
    name: AccountName,
    /// Base URL of the server, e.g. `https://cloud.example.org`
    server_url: String,
    /// Login name on the server (the path component of DAV URLs)
    username: String,
    /// Current account state
    state: AccountState,
    /// When this account was added locally
    created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account in Active state
    ///
    /// # Arguments
    /// * `name` - Unique account name
    /// * `server_url` - Base URL of the sync server
    /// * `username` - Login name used for DAV paths
    pub fn new(
        name: AccountName,
        server_url: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            name,
            server_url: server_url.into(),
            username: username.into(),
            state: AccountState::Active,
            created_at: Utc::now(),
        }
    }

    /// Returns the account name
    pub fn name(&self) -> &AccountName {
        &self.name
    }

    /// Returns the server base URL
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Returns the login name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the current account state
    pub fn state(&self) -> &AccountState {
        &self.state
    }

    /// Returns when the account was added
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the account can perform transfer operations
    pub fn can_transfer(&self) -> bool {
        self.state.can_transfer()
    }

    /// Marks the account as active
    pub fn activate(&mut self) {
        self.state = AccountState::Active;
    }

    /// Marks the stored credentials as rejected
    pub fn mark_credentials_expired(&mut self) {
        self.state = AccountState::CredentialsExpired;
    }

    /// Marks the account with an error
    pub fn mark_error(&mut self, reason: impl Into<String>) {
        self.state = AccountState::Error(reason.into());
    }
}
