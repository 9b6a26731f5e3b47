//! Request DTOs - 请求数据校验层
//!
//! 每个 DTO 由 serde 反序列化（缺省键落到默认值，部分更新语义），
//! 经 `sanitize()` 清洗字符串后，再由 `validate_business_rules()`
//! 产出字段到文案的错误表。基础类型转换由 serde 完成，
//! 这里只做跨字段的业务规则。

mod account_dto;
mod article_dto;
mod category_dto;
mod read_log_dto;
mod sync_dto;

pub use account_dto::{AccountView, CreateAccountRequest, UpdateAccountRequest};
pub use article_dto::{
    parse_article_sort, ArticleListQuery, ArticleView, CreateArticleRequest,
    SetArticleStatusRequest, UpdateArticleRequest, ARTICLE_SORT_FIELDS,
};
pub use category_dto::{CategoryView, CreateCategoryRequest, UpdateCategoryRequest};
pub use read_log_dto::{
    CleanupRequest, ReadLogListQuery, ReadLogView, RecordReadLogRequest,
};
pub use sync_dto::{SyncRequest, SyncTaskView};

use std::collections::BTreeMap;

/// 字段 -> 错误文案
pub type RuleErrors = BTreeMap<String, String>;

/// 清洗可选字符串：去首尾空白，清洗后为空视作未提供
///
/// “显式传空串”与“未传”在这里归一成同一种状态，
/// 与原有接口的行为保持一致
pub(crate) fn clean_opt(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 往错误表里记一条
pub(crate) fn rule(errors: &mut RuleErrors, field: &str, message: impl Into<String>) {
    errors.insert(field.to_string(), message.into());
}
