//! Read Log HTTP Handlers

use axum::extract::{Query, State};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ListReadLogs;
use crate::infrastructure::http::dto::{
    CleanupRequest, ReadLogListQuery, ReadLogView, RecordReadLogRequest,
};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::pagination::Pagination;
use crate::infrastructure::http::response::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 清理结果响应
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub affected: u64,
    pub dry_run: bool,
}

/// 记录一条阅读日志
pub async fn record_read_log(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RecordReadLogRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let log = state
        .record_read_log_handler
        .handle(request.into_command())
        .await?;

    Ok(ApiResponse::created(&ReadLogView::from(log)))
}

/// 阅读日志列表（分页）
pub async fn list_read_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReadLogListQuery>,
) -> Result<ApiResponse, ApiError> {
    let mut pager = Pagination::compute(query.page, query.per_page, 0);

    let page = state
        .list_read_logs_handler
        .handle(ListReadLogs {
            article_id: query.article_id,
            offset: pager.offset(),
            limit: pager.per_page(),
        })
        .await?;

    pager.set_total_items(page.total as i64);
    let views: Vec<ReadLogView> = page.items.into_iter().map(ReadLogView::from).collect();

    Ok(ApiResponse::paginated(&views, &pager))
}

/// 清理历史阅读日志
pub async fn cleanup_read_logs(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CleanupRequest>,
) -> Result<ApiResponse, ApiError> {
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let outcome = state
        .cleanup_read_logs_handler
        .handle(request.into_command())
        .await?;

    Ok(ApiResponse::success(&CleanupResponse {
        affected: outcome.affected,
        dry_run: outcome.dry_run,
    }))
}
