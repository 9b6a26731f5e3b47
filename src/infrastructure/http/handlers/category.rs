//! Category HTTP Handlers

use axum::extract::{Path, State};
use std::sync::Arc;

use crate::application::{DeleteCategory, GetCategory, ListCategories};
use crate::infrastructure::http::dto::{
    CategoryView, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::response::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 栏目列表
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse, ApiError> {
    let categories = state.list_categories_handler.handle(ListCategories).await?;
    let views: Vec<CategoryView> = categories.into_iter().map(CategoryView::from).collect();

    Ok(ApiResponse::success(&views))
}

/// 栏目详情
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Result<ApiResponse, ApiError> {
    let category = state
        .get_category_handler
        .handle(GetCategory { category_id })
        .await?;

    Ok(ApiResponse::success(&CategoryView::from(category)))
}

/// 创建栏目
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateCategoryRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let category = state
        .create_category_handler
        .handle(request.into_command())
        .await?;

    Ok(ApiResponse::created(&CategoryView::from(category)))
}

/// 更新栏目（部分更新）
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
    ApiJson(request): ApiJson<UpdateCategoryRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let category = state
        .update_category_handler
        .handle(request.into_command(category_id))
        .await?;

    Ok(ApiResponse::success(&CategoryView::from(category)))
}

/// 删除栏目
///
/// 仍被文章引用时返回 409
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Result<ApiResponse, ApiError> {
    state
        .delete_category_handler
        .handle(DeleteCategory { category_id })
        .await?;

    Ok(ApiResponse::no_content())
}
