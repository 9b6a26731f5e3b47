//! Category Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{CreateCategory, DeleteCategory, UpdateCategory};
use crate::application::error::ApplicationError;
use crate::application::ports::{CategoryRecord, CategoryRepositoryPort};

/// CreateCategory Handler
pub struct CreateCategoryHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl CreateCategoryHandler {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryPort>) -> Self {
        Self { category_repo }
    }

    pub async fn handle(
        &self,
        command: CreateCategory,
    ) -> Result<CategoryRecord, ApplicationError> {
        let now = Utc::now();
        let mut category = CategoryRecord {
            id: 0,
            name: command.name,
            slug: command.slug,
            sort_order: command.sort_order,
            enabled: command.enabled,
            created_at: now,
            updated_at: now,
        };

        let id = self.category_repo.insert(&category).await?;
        category.id = id;

        tracing::info!(category_id = id, name = %category.name, "Category created");

        Ok(category)
    }
}

/// UpdateCategory Handler - 部分更新，None 字段保持原值
pub struct UpdateCategoryHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl UpdateCategoryHandler {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryPort>) -> Self {
        Self { category_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateCategory,
    ) -> Result<CategoryRecord, ApplicationError> {
        let mut category = self
            .category_repo
            .find_by_id(command.category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Category", command.category_id))?;

        if let Some(name) = command.name {
            category.name = name;
        }
        if let Some(slug) = command.slug {
            category.slug = Some(slug);
        }
        if let Some(sort_order) = command.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(enabled) = command.enabled {
            category.enabled = enabled;
        }
        category.updated_at = Utc::now();

        self.category_repo.update(&category).await?;

        tracing::info!(category_id = category.id, "Category updated");

        Ok(category)
    }
}

/// DeleteCategory Handler
///
/// 栏目仍被文章引用时由仓储返回外键错误，映射为 409
pub struct DeleteCategoryHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl DeleteCategoryHandler {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryPort>) -> Self {
        Self { category_repo }
    }

    pub async fn handle(&self, command: DeleteCategory) -> Result<(), ApplicationError> {
        let category = self
            .category_repo
            .find_by_id(command.category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Category", command.category_id))?;

        self.category_repo.delete(command.category_id).await?;

        tracing::info!(
            category_id = category.id,
            name = %category.name,
            "Category deleted"
        );

        Ok(())
    }
}
