//! Article Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{
    CreateArticle, DeleteArticle, SetArticleStatus, UpdateArticle,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArticleRecord, ArticleRepositoryPort, CategoryRepositoryPort,
};
use crate::domain::ArticleStatus;

// ============================================================================
// CreateArticle
// ============================================================================

/// CreateArticle Handler
pub struct CreateArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl CreateArticleHandler {
    pub fn new(
        article_repo: Arc<dyn ArticleRepositoryPort>,
        category_repo: Arc<dyn CategoryRepositoryPort>,
    ) -> Self {
        Self {
            article_repo,
            category_repo,
        }
    }

    pub async fn handle(
        &self,
        command: CreateArticle,
    ) -> Result<ArticleRecord, ApplicationError> {
        // 栏目必须存在
        if let Some(category_id) = command.category_id {
            self.category_repo
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Category", category_id))?;
        }

        let now = Utc::now();
        let mut article = ArticleRecord {
            id: 0,
            title: command.title,
            summary: command.summary,
            content: command.content,
            category_id: command.category_id,
            cover_url: command.cover_url,
            source_url: command.source_url,
            author: command.author,
            status: command.status,
            release_time: command.release_time,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };

        let id = self.article_repo.insert(&article).await?;
        article.id = id;

        tracing::info!(
            article_id = id,
            title = %article.title,
            status = %article.status,
            "Article created"
        );

        Ok(article)
    }
}

// ============================================================================
// UpdateArticle
// ============================================================================

/// UpdateArticle Handler - 部分更新，None 字段保持原值
pub struct UpdateArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl UpdateArticleHandler {
    pub fn new(
        article_repo: Arc<dyn ArticleRepositoryPort>,
        category_repo: Arc<dyn CategoryRepositoryPort>,
    ) -> Self {
        Self {
            article_repo,
            category_repo,
        }
    }

    pub async fn handle(
        &self,
        command: UpdateArticle,
    ) -> Result<ArticleRecord, ApplicationError> {
        let mut article = self
            .article_repo
            .find_by_id(command.article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article", command.article_id))?;

        if let Some(category_id) = command.category_id {
            self.category_repo
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Category", category_id))?;
            article.category_id = Some(category_id);
        }
        if let Some(title) = command.title {
            article.title = title;
        }
        if let Some(summary) = command.summary {
            article.summary = Some(summary);
        }
        if let Some(content) = command.content {
            article.content = content;
        }
        if let Some(cover_url) = command.cover_url {
            article.cover_url = Some(cover_url);
        }
        if let Some(author) = command.author {
            article.author = Some(author);
        }
        if let Some(status) = command.status {
            article.status = status;
        }
        if let Some(release_time) = command.release_time {
            article.release_time = Some(release_time);
        }
        article.updated_at = Utc::now();

        self.article_repo.update(&article).await?;

        tracing::info!(article_id = article.id, "Article updated");

        Ok(article)
    }
}

// ============================================================================
// SetArticleStatus
// ============================================================================

/// 批量状态变更结果
#[derive(Debug, Clone)]
pub struct SetStatusOutcome {
    pub requested: usize,
    pub updated: u64,
    pub status: ArticleStatus,
}

/// SetArticleStatus Handler - 批量状态变更
pub struct SetArticleStatusHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
}

impl SetArticleStatusHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>) -> Self {
        Self { article_repo }
    }

    pub async fn handle(
        &self,
        command: SetArticleStatus,
    ) -> Result<SetStatusOutcome, ApplicationError> {
        let updated = self
            .article_repo
            .update_status(&command.article_ids, command.status)
            .await?;

        tracing::info!(
            requested = command.article_ids.len(),
            updated = updated,
            status = %command.status,
            reason = command.reason.as_deref().unwrap_or(""),
            force = command.force,
            "Article status changed"
        );

        Ok(SetStatusOutcome {
            requested: command.article_ids.len(),
            updated,
            status: command.status,
        })
    }
}

// ============================================================================
// DeleteArticle
// ============================================================================

/// DeleteArticle Handler
pub struct DeleteArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
}

impl DeleteArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>) -> Self {
        Self { article_repo }
    }

    pub async fn handle(&self, command: DeleteArticle) -> Result<(), ApplicationError> {
        let article = self
            .article_repo
            .find_by_id(command.article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article", command.article_id))?;

        self.article_repo.delete(command.article_id).await?;

        tracing::info!(
            article_id = article.id,
            title = %article.title,
            "Article deleted"
        );

        Ok(())
    }
}
