//! HTTP Error Handling - 异常到信封的映射
//!
//! 只有挂在 /api 前缀下的路由会产出这里的 JSON 信封，
//! 其余路由走 axum 默认处理。
//!
//! 映射表:
//! - NotFound            -> 404
//! - AccessDenied        -> 403
//! - MalformedRequest    -> 400
//! - Validation          -> 400 + errors 字段明细
//! - ConstraintViolation -> 409 固定文案（不透传数据库错误）
//! - BusinessRule        -> 业务方声明的状态码，文案原样展示
//! - Internal            -> 500，非 debug 模式只给通用文案

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::response::ApiResponse;
use crate::application::ApplicationError;

/// debug 模式开关，启动时装载一次，此后只读
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// 安装 debug 开关（重复调用只有第一次生效）
pub fn install_debug_mode(enabled: bool) {
    let _ = DEBUG_MODE.set(enabled);
}

fn debug_mode() -> bool {
    *DEBUG_MODE.get().unwrap_or(&false)
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 资源不存在
    NotFound(String),
    /// 无权访问
    AccessDenied(String),
    /// 请求格式有误
    MalformedRequest(String),
    /// 字段级校验失败
    Validation(BTreeMap<String, String>),
    /// 外键约束冲突
    ConstraintViolation,
    /// 业务规则违反，状态码由业务方声明
    BusinessRule { status: u16, message: String },
    /// 其余一律 500
    Internal(String),
}

impl ApiError {
    pub fn validation(details: BTreeMap<String, String>) -> Self {
        ApiError::Validation(details)
    }

    /// 单字段校验失败的便捷构造
    pub fn validation_field(field: &'static str, message: impl Into<String>) -> Self {
        let mut details = BTreeMap::new();
        details.insert(field.to_string(), message.into());
        ApiError::Validation(details)
    }

    /// 渲染为信封，debug 决定内部错误是否透出原始文案
    ///
    /// 独立出来是为了测试可以不碰进程级开关
    fn render(self, debug: bool) -> ApiResponse {
        match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                ApiResponse::error(msg, 404)
            }
            ApiError::AccessDenied(msg) => {
                tracing::warn!(error = %msg, "Access denied");
                ApiResponse::error("Access denied", 403)
            }
            ApiError::MalformedRequest(msg) => {
                tracing::warn!(error = %msg, "Malformed request");
                ApiResponse::error(msg, 400)
            }
            ApiError::Validation(details) => {
                tracing::warn!(fields = details.len(), "Validation failed");
                ApiResponse::error_with_details("Validation failed", 400, details)
            }
            ApiError::ConstraintViolation => {
                tracing::warn!("Constraint violation");
                ApiResponse::error("关联数据仍在使用，无法完成操作", 409)
            }
            ApiError::BusinessRule { status, message } => {
                tracing::warn!(status = status, error = %message, "Business rule violation");
                ApiResponse::error(message, status)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                if debug {
                    ApiResponse::error(msg, 500)
                } else {
                    ApiResponse::error("Internal server error", 500)
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(debug_mode()).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::MalformedRequest(msg),
            ApplicationError::BusinessRuleViolation { status, message } => {
                ApiError::BusinessRule { status, message }
            }
            ApplicationError::ConstraintViolation(_) => ApiError::ConstraintViolation,
            ApplicationError::RepositoryError(msg)
            | ApplicationError::ExternalServiceError(msg)
            | ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

/// Json 提取器包装，反序列化失败时也走统一信封（400）
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::MalformedRequest(rejection.body_text())),
        }
    }
}
