//! Article Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的封面地址: {0}")]
    InvalidCoverUrl(String),
}
