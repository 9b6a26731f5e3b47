//! Account Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{CreateAccount, DeleteAccount, UpdateAccount};
use crate::application::error::ApplicationError;
use crate::application::ports::{AccountRecord, AccountRepositoryPort};

/// CreateAccount Handler
pub struct CreateAccountHandler {
    account_repo: Arc<dyn AccountRepositoryPort>,
}

impl CreateAccountHandler {
    pub fn new(account_repo: Arc<dyn AccountRepositoryPort>) -> Self {
        Self { account_repo }
    }

    pub async fn handle(
        &self,
        command: CreateAccount,
    ) -> Result<AccountRecord, ApplicationError> {
        // AppID 全局唯一
        if self
            .account_repo
            .find_by_app_id(&command.app_id)
            .await?
            .is_some()
        {
            return Err(ApplicationError::business_rule_with_status(
                409,
                format!("AppID 已被其他账号使用: {}", command.app_id),
            ));
        }

        let now = Utc::now();
        let mut account = AccountRecord {
            id: 0,
            name: command.name,
            app_id: command.app_id,
            app_secret: command.app_secret,
            token: command.token,
            encoding_aes_key: command.encoding_aes_key,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        let id = self.account_repo.insert(&account).await?;
        account.id = id;

        tracing::info!(
            account_id = id,
            app_id = %account.app_id,
            name = %account.name,
            "Account created"
        );

        Ok(account)
    }
}

/// UpdateAccount Handler - 部分更新，None 字段保持原值
///
/// AppID 创建后不可变更
pub struct UpdateAccountHandler {
    account_repo: Arc<dyn AccountRepositoryPort>,
}

impl UpdateAccountHandler {
    pub fn new(account_repo: Arc<dyn AccountRepositoryPort>) -> Self {
        Self { account_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateAccount,
    ) -> Result<AccountRecord, ApplicationError> {
        let mut account = self
            .account_repo
            .find_by_id(command.account_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Account", command.account_id))?;

        if let Some(name) = command.name {
            account.name = name;
        }
        if let Some(app_secret) = command.app_secret {
            account.app_secret = app_secret;
        }
        if let Some(token) = command.token {
            account.token = Some(token);
        }
        if let Some(encoding_aes_key) = command.encoding_aes_key {
            account.encoding_aes_key = Some(encoding_aes_key);
        }
        if let Some(description) = command.description {
            account.description = Some(description);
        }
        account.updated_at = Utc::now();

        self.account_repo.update(&account).await?;

        tracing::info!(account_id = account.id, "Account updated");

        Ok(account)
    }
}

/// DeleteAccount Handler
pub struct DeleteAccountHandler {
    account_repo: Arc<dyn AccountRepositoryPort>,
}

impl DeleteAccountHandler {
    pub fn new(account_repo: Arc<dyn AccountRepositoryPort>) -> Self {
        Self { account_repo }
    }

    pub async fn handle(&self, command: DeleteAccount) -> Result<(), ApplicationError> {
        let account = self
            .account_repo
            .find_by_id(command.account_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Account", command.account_id))?;

        self.account_repo.delete(command.account_id).await?;

        tracing::info!(
            account_id = account.id,
            app_id = %account.app_id,
            "Account deleted"
        );

        Ok(())
    }
}
