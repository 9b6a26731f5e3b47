//! Account HTTP Handlers

use axum::extract::{Path, State};
use std::sync::Arc;

use crate::application::{DeleteAccount, GetAccount, ListAccounts};
use crate::infrastructure::http::dto::{
    AccountView, CreateAccountRequest, UpdateAccountRequest,
};
use crate::infrastructure::http::error::{ApiError, ApiJson};
use crate::infrastructure::http::response::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 账号列表
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse, ApiError> {
    let accounts = state.list_accounts_handler.handle(ListAccounts).await?;
    let views: Vec<AccountView> = accounts.into_iter().map(AccountView::from).collect();

    Ok(ApiResponse::success(&views))
}

/// 账号详情
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<ApiResponse, ApiError> {
    let account = state
        .get_account_handler
        .handle(GetAccount { account_id })
        .await?;

    Ok(ApiResponse::success(&AccountView::from(account)))
}

/// 创建账号
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let account = state
        .create_account_handler
        .handle(request.into_command())
        .await?;

    Ok(ApiResponse::created(&AccountView::from(account)))
}

/// 更新账号（部分更新，AppID 不可变更）
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
    ApiJson(request): ApiJson<UpdateAccountRequest>,
) -> Result<ApiResponse, ApiError> {
    let request = request.sanitize();
    let errors = request.validate_business_rules();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let account = state
        .update_account_handler
        .handle(request.into_command(account_id))
        .await?;

    Ok(ApiResponse::success(&AccountView::from(account)))
}

/// 删除账号
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<ApiResponse, ApiError> {
    state
        .delete_account_handler
        .handle(DeleteAccount { account_id })
        .await?;

    Ok(ApiResponse::no_content())
}
