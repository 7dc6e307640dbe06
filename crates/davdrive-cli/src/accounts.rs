//! In-memory account repository for CLI sessions
//!
//! The CLI builds its single account from config and flags; there is no
//! persistent account database behind it.

use davdrive_core::domain::{Account, AccountName};
use davdrive_core::ports::IAccountRepository;

/// Account repository over a fixed, in-memory account list
pub struct StaticAccountRepository {
    accounts: Vec<Account>,
}

impl StaticAccountRepository {
    /// Creates a repository holding the given accounts
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

#[async_trait::async_trait]
impl IAccountRepository for StaticAccountRepository {
    async fn find_by_name(&self, name: &AccountName) -> anyhow::Result<Option<Account>> {
        Ok(self.accounts.iter().find(|a| a.name() == name).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }
}
