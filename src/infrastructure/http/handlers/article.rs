//! Article HTTP Handlers

use axum::extract::{Path, Query, State};
use serde::Serialize;
use std::sync::Arc;

use crate::application::{DeleteArticle, GetArticle, ListArticles};
use crate::application::ports::ArticleFilter;
use crate::domain::ArticleStatus;
use crate::infrastructure::http::dto::{
    parse_article_sort, ArticleListQuery, ArticleView, CreateArticleRequest,
    SetArticleStatusRequest, UpdateArticleRequest,
};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::pagination::Pagination;
use crate::infrastructure::http::response::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 批量状态变更响应
#[derive(Debug, Serialize)]
pub struct SetStatusResponse {
    pub requested: usize,
    pub updated: u64,
    pub status: i32,
}

/// 文章列表（分页 + 排序 + 过滤）
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticleListQuery>,
) -> Result<ApiResponse, ApiError> {
    let order_by = parse_article_sort(query.sort.as_deref())
        .map_err(|errors| ApiError::validation_field("sort", errors.join("; ")))?;

    let mut pager = Pagination::compute(query.page, query.per_page, 0);

    let filter = ArticleFilter {
        status: query.status.and_then(ArticleStatus::from_i32),
        category_id: query.category_id,
        keyword: query.keyword.clone().filter(|k| !k.trim().is_empty()),
    };

    let page = state
        .list_articles_handler
        .handle(ListArticles {
            filter,
            order_by,
            offset: pager.offset(),
            limit: pager.per_page(),
        })
        .await?;

    pager.set_total_items(page.total as i64);
    let views: Vec<ArticleView> = page.items.into_iter().map(ArticleView::from).collect();

    let per_page = pager.per_page();
    Ok(ApiResponse::paginated_with_links(&views, &pager, |page| {
        format!("/api/articles?page={}&per_page={}", page, per_page)
    }))
}

/// 文章详情
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
) -> Result<ApiResponse, ApiError> {
    let article = state
        .get_article_handler
        .handle(GetArticle { article_id })
        .await?;

    Ok(ApiResponse::success(&ArticleView::from(article)))
}

/// 创建文章
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateArticleRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let article = state
        .create_article_handler
        .handle(request.into_command())
        .await?;

    Ok(ApiResponse::created(&ArticleView::from(article)))
}

/// 更新文章（部分更新）
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
    ApiJson(request): ApiJson<UpdateArticleRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let article = state
        .update_article_handler
        .handle(request.into_command(article_id))
        .await?;

    Ok(ApiResponse::success(&ArticleView::from(article)))
}

/// 批量设置文章状态
pub async fn set_article_status(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SetArticleStatusRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let outcome = state
        .set_article_status_handler
        .handle(request.into_command())
        .await?;

    Ok(ApiResponse::success(&SetStatusResponse {
        requested: outcome.requested,
        updated: outcome.updated,
        status: outcome.status.as_i32(),
    }))
}

/// 删除文章
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
) -> Result<ApiResponse, ApiError> {
    state
        .delete_article_handler
        .handle(DeleteArticle { article_id })
        .await?;

    Ok(ApiResponse::no_content())
}
