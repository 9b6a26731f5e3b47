//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{QueueError, RepositoryError, WeChatError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 业务规则违反（状态码由业务方声明，文案可直接展示给用户）
    #[error("Business rule violation: {message}")]
    BusinessRuleViolation { status: u16, message: String },

    /// 外键约束冲突
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建业务规则违反错误（默认 400）
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            status: 400,
            message: message.into(),
        }
    }

    /// 创建带状态码的业务规则违反错误
    pub fn business_rule_with_status(status: u16, message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            status,
            message: message.into(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ForeignKey(msg) => Self::ConstraintViolation(msg),
            RepositoryError::Duplicate(msg) => Self::BusinessRuleViolation {
                status: 409,
                message: msg,
            },
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<QueueError> for ApplicationError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::NotFound(id) => Self::not_found("SyncTask", id),
            QueueError::Full(msg) => Self::ExternalServiceError(msg),
        }
    }
}

impl From<WeChatError> for ApplicationError {
    fn from(err: WeChatError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
