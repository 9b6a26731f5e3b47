//! Article Context - Value Objects

use serde::{Deserialize, Serialize};

use super::ArticleError;

/// 文章标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, ArticleError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ArticleError::InvalidTitle("标题不能为空".to_string()));
        }
        if title.chars().count() > 200 {
            return Err(ArticleError::InvalidTitle(
                "标题长度不能超过200字符".to_string(),
            ));
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 封面图地址
///
/// 仅做语法校验，不发起网络请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverUrl(String);

impl CoverUrl {
    pub fn new(raw: impl Into<String>) -> Result<Self, ArticleError> {
        let raw = raw.into().trim().to_string();
        let parsed = url::Url::parse(&raw)
            .map_err(|e| ArticleError::InvalidCoverUrl(format!("{}: {}", raw, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ArticleError::InvalidCoverUrl(format!(
                "不支持的协议: {}",
                parsed.scheme()
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_trimmed() {
        let title = ArticleTitle::new("  本周要闻  ").unwrap();
        assert_eq!(title.as_str(), "本周要闻");
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(ArticleTitle::new("   ").is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let long = "长".repeat(201);
        assert!(ArticleTitle::new(long).is_err());
    }

    #[test]
    fn test_cover_url_accepts_https() {
        assert!(CoverUrl::new("https://cdn.example.com/cover.jpg").is_ok());
    }

    #[test]
    fn test_cover_url_rejects_garbage() {
        assert!(CoverUrl::new("not a url").is_err());
        assert!(CoverUrl::new("ftp://example.com/a.jpg").is_err());
    }
}
