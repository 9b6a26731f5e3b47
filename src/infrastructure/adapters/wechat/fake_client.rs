//! Fake WeChat Client - 测试用
//!
//! 返回预置素材列表，可配置前 N 次调用失败以验证重试

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::application::ports::{RemoteArticle, WeChatClientPort, WeChatError};

/// 测试用 WeChat 客户端
pub struct FakeWeChatClient {
    articles: Vec<RemoteArticle>,
    failures_remaining: AtomicU32,
}

impl FakeWeChatClient {
    pub fn new(articles: Vec<RemoteArticle>) -> Self {
        Self {
            articles,
            failures_remaining: AtomicU32::new(0),
        }
    }

    /// 前 n 次素材拉取返回网络错误
    pub fn with_failures(mut self, n: u32) -> Self {
        self.failures_remaining = AtomicU32::new(n);
        self
    }

    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                if current > 0 {
                    Some(current - 1)
                } else {
                    None
                }
            })
            .is_ok()
    }
}

#[async_trait]
impl WeChatClientPort for FakeWeChatClient {
    async fn fetch_access_token(
        &self,
        _app_id: &str,
        _app_secret: &str,
    ) -> Result<String, WeChatError> {
        Ok("fake-access-token".to_string())
    }

    async fn fetch_articles(
        &self,
        _access_token: &str,
        offset: u32,
        count: u32,
    ) -> Result<Vec<RemoteArticle>, WeChatError> {
        if self.take_failure() {
            return Err(WeChatError::Network("simulated failure".to_string()));
        }

        let start = (offset as usize).min(self.articles.len());
        let end = (start + count as usize).min(self.articles.len());
        Ok(self.articles[start..end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> RemoteArticle {
        RemoteArticle {
            title: title.to_string(),
            author: None,
            digest: None,
            content: "正文".to_string(),
            content_source_url: None,
            thumb_url: None,
            publish_time: None,
        }
    }

    #[tokio::test]
    async fn test_paging() {
        let client = FakeWeChatClient::new(vec![article("a"), article("b"), article("c")]);
        let token = client.fetch_access_token("wx", "secret").await.unwrap();

        let batch = client.fetch_articles(&token, 0, 2).await.unwrap();
        assert_eq!(batch.len(), 2);

        let batch = client.fetch_articles(&token, 2, 2).await.unwrap();
        assert_eq!(batch.len(), 1);

        let batch = client.fetch_articles(&token, 3, 2).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_failures_then_success() {
        let client = FakeWeChatClient::new(vec![article("a")]).with_failures(2);

        assert!(client.fetch_articles("t", 0, 10).await.is_err());
        assert!(client.fetch_articles("t", 0, 10).await.is_err());
        assert!(client.fetch_articles("t", 0, 10).await.is_ok());
    }
}
