//! Category DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clean_opt, rule, RuleErrors};
use crate::application::commands::{CreateCategory, UpdateCategory};
use crate::application::ports::CategoryRecord;

fn default_enabled() -> bool {
    true
}

/// slug 只允许小写字母、数字和中划线
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// ============================================================================
// 创建栏目
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl CreateCategoryRequest {
    pub fn sanitize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.slug = clean_opt(self.slug);
        self
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();

        if self.name.is_empty() {
            rule(&mut errors, "name", "栏目名称不能为空");
        }
        if let Some(slug) = &self.slug {
            if !is_valid_slug(slug) {
                rule(&mut errors, "slug", "slug 只允许小写字母、数字和中划线");
            }
        }
        if self.sort_order < 0 {
            rule(&mut errors, "sort_order", "排序值不能为负数");
        }

        errors
    }

    pub fn into_command(self) -> CreateCategory {
        CreateCategory {
            name: self.name,
            slug: self.slug,
            sort_order: self.sort_order,
            enabled: self.enabled,
        }
    }
}

// ============================================================================
// 更新栏目（部分更新）
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl UpdateCategoryRequest {
    pub fn sanitize(mut self) -> Self {
        self.name = clean_opt(self.name);
        self.slug = clean_opt(self.slug);
        self
    }

    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.slug.is_some()
            || self.sort_order.is_some()
            || self.enabled.is_some()
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();

        if !self.has_updates() {
            rule(&mut errors, "fields", "更新请求至少需要一个字段");
            return errors;
        }
        if let Some(slug) = &self.slug {
            if !is_valid_slug(slug) {
                rule(&mut errors, "slug", "slug 只允许小写字母、数字和中划线");
            }
        }
        if let Some(sort_order) = self.sort_order {
            if sort_order < 0 {
                rule(&mut errors, "sort_order", "排序值不能为负数");
            }
        }

        errors
    }

    pub fn into_command(self, category_id: i64) -> UpdateCategory {
        UpdateCategory {
            category_id,
            name: self.name,
            slug: self.slug,
            sort_order: self.sort_order,
            enabled: self.enabled,
        }
    }
}

// ============================================================================
// 展示投影
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub sort_order: i64,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryRecord> for CategoryView {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            slug: record.slug,
            sort_order: record.sort_order,
            enabled: record.enabled,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid() {
        let req = CreateCategoryRequest {
            name: "科技".to_string(),
            slug: Some("tech".to_string()),
            sort_order: 0,
            enabled: true,
        };
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_create_empty_name() {
        let req = CreateCategoryRequest {
            name: "  ".to_string(),
            slug: None,
            sort_order: 0,
            enabled: true,
        }
        .sanitize();
        assert!(req.validate_business_rules().contains_key("name"));
    }

    #[test]
    fn test_bad_slug() {
        let req = CreateCategoryRequest {
            name: "科技".to_string(),
            slug: Some("Tech News".to_string()),
            sort_order: 0,
            enabled: true,
        };
        assert!(req.validate_business_rules().contains_key("slug"));
    }

    #[test]
    fn test_negative_sort_order() {
        let req = CreateCategoryRequest {
            name: "科技".to_string(),
            slug: None,
            sort_order: -1,
            enabled: true,
        };
        assert!(req.validate_business_rules().contains_key("sort_order"));
    }

    #[test]
    fn test_update_requires_some_field() {
        let req = UpdateCategoryRequest::default();
        assert!(req.validate_business_rules().contains_key("fields"));
    }

    #[test]
    fn test_update_enabled_only() {
        let req = UpdateCategoryRequest {
            enabled: Some(false),
            ..Default::default()
        };
        assert!(req.validate_business_rules().is_empty());
    }
}
