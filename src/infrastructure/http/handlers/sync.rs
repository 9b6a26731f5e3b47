//! Sync HTTP Handlers
//!
//! 触发同步只做消息入队，立即 202 返回任务信息；
//! 实际同步由后台 Worker 完成，进度通过任务查询接口获取

use axum::extract::{Path, State};
use std::sync::Arc;

use crate::application::GetSyncTask;
use crate::infrastructure::http::dto::{SyncRequest, SyncTaskView};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::response::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 触发账号素材同步
pub async fn trigger_sync(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
    ApiJson(request): ApiJson<SyncRequest>,
) -> Result<ApiResponse, ApiError> {
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let task = state
        .trigger_sync_handler
        .handle(request.into_command(account_id))
        .await?;

    Ok(ApiResponse::accepted(&SyncTaskView::from(task)))
}

/// 查询同步任务状态
pub async fn get_sync_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<ApiResponse, ApiError> {
    let task = state
        .get_sync_task_handler
        .handle(GetSyncTask { task_id })
        .await?;

    Ok(ApiResponse::success(&SyncTaskView::from(task)))
}
