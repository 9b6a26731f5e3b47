//! Article Commands

use chrono::{DateTime, Utc};

use crate::domain::ArticleStatus;

/// 创建文章命令
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub category_id: Option<i64>,
    pub cover_url: Option<String>,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub status: ArticleStatus,
    pub release_time: Option<DateTime<Utc>>,
}

/// 更新文章命令（None 字段保持原值）
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    pub article_id: i64,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i64>,
    pub cover_url: Option<String>,
    pub author: Option<String>,
    pub status: Option<ArticleStatus>,
    pub release_time: Option<DateTime<Utc>>,
}

/// 批量设置文章状态命令
#[derive(Debug, Clone)]
pub struct SetArticleStatus {
    pub article_ids: Vec<i64>,
    pub status: ArticleStatus,
    pub reason: Option<String>,
    pub force: bool,
    pub operation_time: Option<DateTime<Utc>>,
}

/// 删除文章命令
#[derive(Debug, Clone)]
pub struct DeleteArticle {
    pub article_id: i64,
}
