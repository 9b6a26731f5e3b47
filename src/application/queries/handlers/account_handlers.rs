//! Account Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AccountRecord, AccountRepositoryPort};
use crate::application::queries::{GetAccount, ListAccounts};

/// GetAccount Handler
pub struct GetAccountHandler {
    account_repo: Arc<dyn AccountRepositoryPort>,
}

impl GetAccountHandler {
    pub fn new(account_repo: Arc<dyn AccountRepositoryPort>) -> Self {
        Self { account_repo }
    }

    pub async fn handle(&self, query: GetAccount) -> Result<AccountRecord, ApplicationError> {
        let account = self
            .account_repo
            .find_by_id(query.account_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Account", query.account_id))?;

        Ok(account)
    }
}

/// ListAccounts Handler
pub struct ListAccountsHandler {
    account_repo: Arc<dyn AccountRepositoryPort>,
}

impl ListAccountsHandler {
    pub fn new(account_repo: Arc<dyn AccountRepositoryPort>) -> Self {
        Self { account_repo }
    }

    pub async fn handle(&self, _query: ListAccounts) -> Result<Vec<AccountRecord>, ApplicationError> {
        let accounts = self.account_repo.find_all().await?;
        Ok(accounts)
    }
}
