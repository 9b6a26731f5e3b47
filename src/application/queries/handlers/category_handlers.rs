//! Category Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CategoryRecord, CategoryRepositoryPort};
use crate::application::queries::{GetCategory, ListCategories};

/// GetCategory Handler
pub struct GetCategoryHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl GetCategoryHandler {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryPort>) -> Self {
        Self { category_repo }
    }

    pub async fn handle(&self, query: GetCategory) -> Result<CategoryRecord, ApplicationError> {
        let category = self
            .category_repo
            .find_by_id(query.category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Category", query.category_id))?;

        Ok(category)
    }
}

/// ListCategories Handler
pub struct ListCategoriesHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl ListCategoriesHandler {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryPort>) -> Self {
        Self { category_repo }
    }

    pub async fn handle(
        &self,
        _query: ListCategories,
    ) -> Result<Vec<CategoryRecord>, ApplicationError> {
        let categories = self.category_repo.find_all().await?;
        Ok(categories)
    }
}
