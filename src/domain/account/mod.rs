//! Account Context - 公众号账号限界上下文
//!
//! 职责:
//! - 公众号凭证值对象（AppID / AppSecret / Token / EncodingAESKey）
//! - 消息加解密配置完整性

mod credentials;
mod errors;

pub use credentials::{
    validate_encryption_config, AppId, AppSecret, CallbackToken, EncodingAesKey,
};
pub use errors::AccountError;
