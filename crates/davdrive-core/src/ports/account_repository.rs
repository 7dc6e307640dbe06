//! Account repository port (driven/secondary port)

use crate::domain::account::Account;
use crate::domain::newtypes::AccountName;

/// Port trait for looking up locally-known accounts
#[async_trait::async_trait]
pub trait IAccountRepository: Send + Sync {
    /// Finds an account by its unique name
    async fn find_by_name(&self, name: &AccountName) -> anyhow::Result<Option<Account>>;

    /// Lists all locally-known accounts
    async fn list(&self) -> anyhow::Result<Vec<Account>>;
}
