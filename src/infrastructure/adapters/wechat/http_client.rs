//! WeChat HTTP Client - 调用微信公众平台素材接口
//!
//! 实现 WeChatClientPort trait
//!
//! 外部 API:
//! - GET  /cgi-bin/token?grant_type=client_credential&appid=..&secret=..
//! - POST /cgi-bin/material/batchget_material?access_token=..
//!   Request: {"type": "news", "offset": N, "count": N}
//!   错误统一以 {"errcode": N, "errmsg": ".."} 返回

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{RemoteArticle, WeChatClientPort, WeChatError};

/// WeChat HTTP 客户端配置
#[derive(Debug, Clone)]
pub struct WeChatHttpClientConfig {
    /// 接口基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for WeChatHttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weixin.qq.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl WeChatHttpClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// WeChat HTTP 客户端
pub struct WeChatHttpClient {
    client: Client,
    config: WeChatHttpClientConfig,
}

impl WeChatHttpClient {
    /// 创建新的客户端
    pub fn new(config: WeChatHttpClientConfig) -> Result<Self, WeChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeChatError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn token_url(&self) -> String {
        format!("{}/cgi-bin/token", self.config.base_url)
    }

    fn material_url(&self, access_token: &str) -> String {
        format!(
            "{}/cgi-bin/material/batchget_material?access_token={}",
            self.config.base_url, access_token
        )
    }
}

/// 错误码归类
///
/// 40001/40013/41002/42001 属于凭证问题，45009 是频率限制
fn classify_error(errcode: i64, errmsg: String) -> WeChatError {
    match errcode {
        40001 | 40013 | 41002 | 42001 => WeChatError::Auth(errmsg),
        45009 => WeChatError::RateLimited(errmsg),
        _ => WeChatError::Protocol(format!("errcode {}: {}", errcode, errmsg)),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[allow(dead_code)]
    expires_in: Option<u64>,
    errcode: Option<i64>,
    errmsg: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchGetRequest {
    #[serde(rename = "type")]
    material_type: &'static str,
    offset: u32,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct BatchGetResponse {
    item: Option<Vec<MaterialItem>>,
    #[allow(dead_code)]
    total_count: Option<u64>,
    errcode: Option<i64>,
    errmsg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MaterialItem {
    content: Option<NewsContent>,
    update_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct NewsContent {
    #[serde(default)]
    news_item: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    #[serde(default)]
    title: String,
    author: Option<String>,
    digest: Option<String>,
    #[serde(default)]
    content: String,
    content_source_url: Option<String>,
    thumb_url: Option<String>,
}

fn epoch_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[async_trait]
impl WeChatClientPort for WeChatHttpClient {
    async fn fetch_access_token(
        &self,
        app_id: &str,
        app_secret: &str,
    ) -> Result<String, WeChatError> {
        let response = self
            .client
            .get(self.token_url())
            .query(&[
                ("grant_type", "client_credential"),
                ("appid", app_id),
                ("secret", app_secret),
            ])
            .send()
            .await
            .map_err(|e| WeChatError::Network(e.to_string()))?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| WeChatError::Protocol(e.to_string()))?;

        if let Some(errcode) = body.errcode.filter(|&code| code != 0) {
            return Err(classify_error(
                errcode,
                body.errmsg.unwrap_or_default(),
            ));
        }

        body.access_token
            .ok_or_else(|| WeChatError::Protocol("missing access_token".to_string()))
    }

    async fn fetch_articles(
        &self,
        access_token: &str,
        offset: u32,
        count: u32,
    ) -> Result<Vec<RemoteArticle>, WeChatError> {
        let request = BatchGetRequest {
            material_type: "news",
            offset,
            count,
        };

        let response = self
            .client
            .post(self.material_url(access_token))
            .json(&request)
            .send()
            .await
            .map_err(|e| WeChatError::Network(e.to_string()))?;

        let body: BatchGetResponse = response
            .json()
            .await
            .map_err(|e| WeChatError::Protocol(e.to_string()))?;

        if let Some(errcode) = body.errcode.filter(|&code| code != 0) {
            return Err(classify_error(
                errcode,
                body.errmsg.unwrap_or_default(),
            ));
        }

        let mut articles = Vec::new();
        for item in body.item.unwrap_or_default() {
            let publish_time = item.update_time.and_then(epoch_to_datetime);
            let Some(content) = item.content else {
                continue;
            };
            for news in content.news_item {
                if news.title.is_empty() {
                    continue;
                }
                articles.push(RemoteArticle {
                    title: news.title,
                    author: news.author,
                    digest: news.digest,
                    content: news.content,
                    content_source_url: news.content_source_url,
                    thumb_url: news.thumb_url,
                    publish_time,
                });
            }
        }

        tracing::debug!(
            offset = offset,
            count = count,
            fetched = articles.len(),
            "WeChat materials fetched"
        );

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_error() {
        assert!(matches!(
            classify_error(40001, "invalid credential".to_string()),
            WeChatError::Auth(_)
        ));
        assert!(matches!(
            classify_error(45009, "reach max api daily quota".to_string()),
            WeChatError::RateLimited(_)
        ));
        assert!(matches!(
            classify_error(-1, "system error".to_string()),
            WeChatError::Protocol(_)
        ));
    }

    #[test]
    fn test_batchget_response_parsing() {
        let raw = r#"{
            "total_count": 1,
            "item": [{
                "update_time": 1700000000,
                "content": {
                    "news_item": [{
                        "title": "本周要闻",
                        "author": "编辑部",
                        "digest": "摘要",
                        "content": "<p>正文</p>",
                        "content_source_url": "https://mp.example.com/a/1",
                        "thumb_url": "https://cdn.example.com/t.jpg"
                    }]
                }
            }]
        }"#;
        let body: BatchGetResponse = serde_json::from_str(raw).unwrap();
        let item = &body.item.unwrap()[0];
        assert_eq!(item.content.as_ref().unwrap().news_item[0].title, "本周要闻");
    }

    #[test]
    fn test_error_response_parsing() {
        let raw = r#"{"errcode": 42001, "errmsg": "access_token expired"}"#;
        let body: TokenResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.errcode, Some(42001));
        assert!(body.access_token.is_none());
    }
}
