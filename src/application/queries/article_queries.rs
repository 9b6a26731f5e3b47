//! Article Queries

use crate::application::ports::{ArticleFilter, ArticleRecord};

/// 获取文章详情查询
#[derive(Debug, Clone)]
pub struct GetArticle {
    pub article_id: i64,
}

/// 文章分页列表查询
///
/// `order_by` 是经过排序允许列表校验后渲染出的子句
#[derive(Debug, Clone)]
pub struct ListArticles {
    pub filter: ArticleFilter,
    pub order_by: String,
    pub offset: u64,
    pub limit: u64,
}

/// 分页查询结果
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub items: Vec<ArticleRecord>,
    pub total: u64,
}
