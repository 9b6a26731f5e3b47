//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Article Context: 文章管理
//! - Account Context: 公众号账号管理

pub mod account;
pub mod article;

pub use account::{
    validate_encryption_config, AccountError, AppId, AppSecret, CallbackToken, EncodingAesKey,
};
pub use article::{ArticleError, ArticleStatus, ArticleTitle, CoverUrl};
