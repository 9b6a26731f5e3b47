//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                    GET    健康检查
//! - /api/articles                GET    文章列表（分页/排序/过滤）
//! - /api/articles                POST   创建文章
//! - /api/articles/status         POST   批量设置文章状态
//! - /api/articles/{id}           GET    文章详情
//! - /api/articles/{id}           PUT    更新文章
//! - /api/articles/{id}           DELETE 删除文章
//! - /api/categories              GET    栏目列表
//! - /api/categories              POST   创建栏目
//! - /api/categories/{id}         GET/PUT/DELETE
//! - /api/accounts                GET    账号列表
//! - /api/accounts                POST   创建账号
//! - /api/accounts/{id}           GET/PUT/DELETE
//! - /api/accounts/{id}/sync      POST   触发素材同步（202）
//! - /api/sync/tasks/{task_id}    GET    同步任务状态
//! - /api/read-logs               GET    阅读日志列表
//! - /api/read-logs               POST   记录阅读日志
//! - /api/read-logs/cleanup       POST   清理历史日志

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/articles", article_routes())
        .nest("/categories", category_routes())
        .nest("/accounts", account_routes())
        .nest("/sync", sync_routes())
        .nest("/read-logs", read_log_routes())
}

/// Article 路由
fn article_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route("/status", post(handlers::set_article_status))
        .route(
            "/:id",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
}

/// Category 路由
fn category_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
}

/// Account 路由
fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/:id",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account),
        )
        .route("/:id/sync", post(handlers::trigger_sync))
}

/// Sync 路由
fn sync_routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/:task_id", get(handlers::get_sync_task))
}

/// Read Log 路由
fn read_log_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_read_logs).post(handlers::record_read_log),
        )
        .route("/cleanup", post(handlers::cleanup_read_logs))
}
