//! WeChat Client Port - 公众号素材接口
//!
//! 定义对微信公众平台的出站调用抽象，
//! HTTP 实现与测试用 Fake 实现在 infrastructure/adapters/wechat

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// 微信接口错误
#[derive(Debug, Error)]
pub enum WeChatError {
    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),
}

/// 远端图文素材（单篇）
#[derive(Debug, Clone)]
pub struct RemoteArticle {
    pub title: String,
    pub author: Option<String>,
    pub digest: Option<String>,
    pub content: String,
    pub content_source_url: Option<String>,
    pub thumb_url: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
}

/// WeChat Client Port
#[async_trait]
pub trait WeChatClientPort: Send + Sync {
    /// 获取接口调用凭证
    async fn fetch_access_token(
        &self,
        app_id: &str,
        app_secret: &str,
    ) -> Result<String, WeChatError>;

    /// 分批拉取图文素材
    async fn fetch_articles(
        &self,
        access_token: &str,
        offset: u32,
        count: u32,
    ) -> Result<Vec<RemoteArticle>, WeChatError>;
}
