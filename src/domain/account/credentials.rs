//! Account Context - 凭证值对象
//!
//! 微信公众平台的凭证格式:
//! - AppID: `wx` 前缀 + 16 位十六进制
//! - AppSecret: 32 位十六进制
//! - Token: 服务器校验 Token，字母数字下划线中划线
//! - EncodingAESKey: 43 位字母数字

use serde::{Deserialize, Serialize};

use super::AccountError;

/// 公众号 AppID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountError> {
        let raw = raw.into().trim().to_string();
        let hex = raw.strip_prefix("wx").ok_or_else(|| {
            AccountError::InvalidAppId(format!("AppID 必须以 wx 开头: {}", raw))
        })?;
        if hex.len() != 16 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AccountError::InvalidAppId(format!(
                "AppID 必须为 wx + 16 位十六进制: {}",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 公众号 AppSecret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSecret(String);

impl AppSecret {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountError> {
        let raw = raw.into().trim().to_string();
        if raw.len() != 32 || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AccountError::InvalidAppSecret(
                "AppSecret 必须为 32 位十六进制".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 服务器校验 Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackToken(String);

impl CallbackToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountError> {
        let raw = raw.into().trim().to_string();
        if raw.is_empty()
            || !raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AccountError::InvalidToken(
                "Token 只允许字母、数字、下划线和中划线".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 消息加解密密钥
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingAesKey(String);

impl EncodingAesKey {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountError> {
        let raw = raw.into().trim().to_string();
        if raw.len() != 43 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AccountError::InvalidAesKey(
                "EncodingAESKey 必须为 43 位字母数字".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 加解密配置完整性校验
///
/// 安全模式要求 Token 与 EncodingAESKey 成对出现，只设置其一视为配置不完整
pub fn validate_encryption_config(
    token: Option<&str>,
    encoding_aes_key: Option<&str>,
) -> Result<(), AccountError> {
    if token.is_some() != encoding_aes_key.is_some() {
        return Err(AccountError::IncompleteEncryption(
            "Token 与 EncodingAESKey 必须同时设置或同时留空".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_id_format() {
        assert!(AppId::new("wx1234567890abcdef").is_ok());
        assert!(AppId::new("wx1234").is_err());
        assert!(AppId::new("gh1234567890abcdef").is_err());
        assert!(AppId::new("wx1234567890abcdeg").is_err()); // g 不是十六进制
    }

    #[test]
    fn test_app_secret_format() {
        assert!(AppSecret::new("0123456789abcdef0123456789abcdef").is_ok());
        assert!(AppSecret::new("0123456789abcdef").is_err());
        assert!(AppSecret::new("0123456789abcdef0123456789abcdeg").is_err());
    }

    #[test]
    fn test_encryption_config_pairing() {
        assert!(validate_encryption_config(None, None).is_ok());
        assert!(validate_encryption_config(Some("token"), Some("key")).is_ok());
        assert!(validate_encryption_config(Some("token"), None).is_err());
        assert!(validate_encryption_config(None, Some("key")).is_err());
    }

    #[test]
    fn test_token_charset() {
        assert!(CallbackToken::new("my_token-01").is_ok());
        assert!(CallbackToken::new("").is_err());
        assert!(CallbackToken::new("bad token").is_err());
        assert!(CallbackToken::new("含中文").is_err());
    }

    #[test]
    fn test_aes_key_length() {
        let key = "a".repeat(43);
        assert!(EncodingAesKey::new(key).is_ok());
        assert!(EncodingAesKey::new("a".repeat(42)).is_err());
        assert!(EncodingAesKey::new("a".repeat(44)).is_err());
        let mut bad = "a".repeat(42);
        bad.push('+');
        assert!(EncodingAesKey::new(bad).is_err());
    }
}
