//! Article Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ArticleRecord, ArticleRepositoryPort};
use crate::application::queries::{ArticlePage, GetArticle, ListArticles};

/// GetArticle Handler
pub struct GetArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
}

impl GetArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>) -> Self {
        Self { article_repo }
    }

    pub async fn handle(&self, query: GetArticle) -> Result<ArticleRecord, ApplicationError> {
        let article = self
            .article_repo
            .find_by_id(query.article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article", query.article_id))?;

        Ok(article)
    }
}

/// ListArticles Handler
pub struct ListArticlesHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
}

impl ListArticlesHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>) -> Self {
        Self { article_repo }
    }

    pub async fn handle(&self, query: ListArticles) -> Result<ArticlePage, ApplicationError> {
        let (items, total) = self
            .article_repo
            .find_page(&query.filter, &query.order_by, query.offset, query.limit)
            .await?;

        Ok(ArticlePage { items, total })
    }
}
