//! Account DTOs - 公众号账号
//!
//! 凭证格式校验委托给 domain::account 的值对象；
//! 这里补充跨字段规则：Token 与 EncodingAESKey 必须成对出现。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clean_opt, rule, RuleErrors};
use crate::application::commands::{CreateAccount, UpdateAccount};
use crate::application::ports::AccountRecord;
use crate::domain::{
    validate_encryption_config, AppId, AppSecret, CallbackToken, EncodingAesKey,
};

fn check_encryption_pair(
    errors: &mut RuleErrors,
    token: &Option<String>,
    aes_key: &Option<String>,
) {
    if let Err(e) = validate_encryption_config(token.as_deref(), aes_key.as_deref()) {
        rule(errors, "encryption", e.to_string());
    }
}

// ============================================================================
// 创建账号
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub app_id: String,
    pub app_secret: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub encoding_aes_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateAccountRequest {
    pub fn sanitize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.app_id = self.app_id.trim().to_string();
        self.app_secret = self.app_secret.trim().to_string();
        self.token = clean_opt(self.token);
        self.encoding_aes_key = clean_opt(self.encoding_aes_key);
        self.description = clean_opt(self.description);
        self
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();

        if self.name.is_empty() {
            rule(&mut errors, "name", "账号名称不能为空");
        }
        if let Err(e) = AppId::new(self.app_id.clone()) {
            rule(&mut errors, "app_id", e.to_string());
        }
        if let Err(e) = AppSecret::new(self.app_secret.clone()) {
            rule(&mut errors, "app_secret", e.to_string());
        }
        if let Some(token) = &self.token {
            if let Err(e) = CallbackToken::new(token.clone()) {
                rule(&mut errors, "token", e.to_string());
            }
        }
        if let Some(aes_key) = &self.encoding_aes_key {
            if let Err(e) = EncodingAesKey::new(aes_key.clone()) {
                rule(&mut errors, "encoding_aes_key", e.to_string());
            }
        }
        check_encryption_pair(&mut errors, &self.token, &self.encoding_aes_key);

        errors
    }

    pub fn into_command(self) -> CreateAccount {
        CreateAccount {
            name: self.name,
            app_id: self.app_id,
            app_secret: self.app_secret,
            token: self.token,
            encoding_aes_key: self.encoding_aes_key,
            description: self.description,
        }
    }
}

// ============================================================================
// 更新账号（部分更新，AppID 不可变更）
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub app_secret: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub encoding_aes_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateAccountRequest {
    pub fn sanitize(mut self) -> Self {
        self.name = clean_opt(self.name);
        self.app_secret = clean_opt(self.app_secret);
        self.token = clean_opt(self.token);
        self.encoding_aes_key = clean_opt(self.encoding_aes_key);
        self.description = clean_opt(self.description);
        self
    }

    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.app_secret.is_some()
            || self.token.is_some()
            || self.encoding_aes_key.is_some()
            || self.description.is_some()
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();

        if !self.has_updates() {
            rule(&mut errors, "fields", "更新请求至少需要一个字段");
            return errors;
        }
        if let Some(app_secret) = &self.app_secret {
            if let Err(e) = AppSecret::new(app_secret.clone()) {
                rule(&mut errors, "app_secret", e.to_string());
            }
        }
        if let Some(token) = &self.token {
            if let Err(e) = CallbackToken::new(token.clone()) {
                rule(&mut errors, "token", e.to_string());
            }
        }
        if let Some(aes_key) = &self.encoding_aes_key {
            if let Err(e) = EncodingAesKey::new(aes_key.clone()) {
                rule(&mut errors, "encoding_aes_key", e.to_string());
            }
        }
        // 单独改其中一个无法保证与库里另一半配套，要求成对提交
        if self.token.is_some() || self.encoding_aes_key.is_some() {
            check_encryption_pair(&mut errors, &self.token, &self.encoding_aes_key);
        }

        errors
    }

    pub fn into_command(self, account_id: i64) -> UpdateAccount {
        UpdateAccount {
            account_id,
            name: self.name,
            app_secret: self.app_secret,
            token: self.token,
            encoding_aes_key: self.encoding_aes_key,
            description: self.description,
        }
    }
}

// ============================================================================
// 展示投影（不输出任何凭证明文）
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub name: String,
    pub app_id: String,
    /// 是否已配置消息加解密
    pub has_encryption: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountRecord> for AccountView {
    fn from(record: AccountRecord) -> Self {
        let has_encryption = record.token.is_some() && record.encoding_aes_key.is_some();
        Self {
            id: record.id,
            name: record.name,
            app_id: record.app_id,
            has_encryption,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
