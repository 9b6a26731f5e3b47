//! Account Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("无效的 AppID: {0}")]
    InvalidAppId(String),

    #[error("无效的 AppSecret: {0}")]
    InvalidAppSecret(String),

    #[error("无效的 Token: {0}")]
    InvalidToken(String),

    #[error("无效的 EncodingAESKey: {0}")]
    InvalidAesKey(String),

    #[error("加解密配置不完整: {0}")]
    IncompleteEncryption(String),
}
