//! Article DTOs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{clean_opt, rule, RuleErrors};
use crate::application::commands::{CreateArticle, SetArticleStatus, UpdateArticle};
use crate::application::ports::ArticleRecord;
use crate::domain::{ArticleStatus, ArticleTitle, CoverUrl};
use crate::infrastructure::http::sort::SortSpec;

/// 允许排序的文章字段
pub const ARTICLE_SORT_FIELDS: &[&str] = &[
    "id",
    "title",
    "status",
    "view_count",
    "release_time",
    "created_at",
    "updated_at",
];

/// 对外友好名 -> 真实列名
const ARTICLE_SORT_ALIASES: &[(&str, &str)] = &[("date", "release_time"), ("views", "view_count")];

/// 解析文章排序参数并渲染为 ORDER BY 子句体
///
/// 支持逗号分隔的多字段排序（按出现顺序定优先级），
/// 未提供时默认 created_at desc
pub fn parse_article_sort(raw: Option<&str>) -> Result<String, Vec<String>> {
    let mut specs = SortSpec::parse_list(raw.unwrap_or("created_at"));
    if specs.is_empty() {
        specs.push(SortSpec::parse("created_at"));
    }

    let mut errors = Vec::new();
    let specs: Vec<SortSpec> = specs
        .into_iter()
        .map(|mut spec| {
            if let Some((_, column)) = ARTICLE_SORT_ALIASES
                .iter()
                .find(|(name, _)| *name == spec.field())
            {
                spec = spec.with_alias(*column);
            }
            spec.with_available_fields(ARTICLE_SORT_FIELDS.iter().copied())
        })
        .inspect(|spec| {
            if let Err(mut problems) = spec.validate() {
                errors.append(&mut problems);
            }
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(SortSpec::render_chain(&specs))
}

fn default_status() -> i32 {
    ArticleStatus::Pending.as_i32()
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

// ============================================================================
// 列表查询参数
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    /// `"<field>[:<asc|desc>]"`
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub keyword: Option<String>,
}

// ============================================================================
// 创建文章
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// 1=已上线 2=待发布 3=已删除，默认待发布
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default)]
    pub release_time: Option<DateTime<Utc>>,
}

impl CreateArticleRequest {
    /// 字符串清洗
    pub fn sanitize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.content = self.content.trim().to_string();
        self.summary = clean_opt(self.summary);
        self.cover_url = clean_opt(self.cover_url);
        self.source_url = clean_opt(self.source_url);
        self.author = clean_opt(self.author);
        self
    }

    /// 跨字段业务规则，按需调用
    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();
        let now = Utc::now();

        if let Err(e) = ArticleTitle::new(self.title.clone()) {
            rule(&mut errors, "title", e.to_string());
        }
        if self.content.is_empty() {
            rule(&mut errors, "content", "正文不能为空");
        }
        let status = match ArticleStatus::from_i32(self.status) {
            Some(status) => status,
            None => {
                rule(&mut errors, "status", format!("无效的状态值: {}", self.status));
                return errors;
            }
        };

        validate_release_time(&mut errors, self.release_time, Some(status), now);

        if let Some(cover_url) = &self.cover_url {
            if let Err(e) = CoverUrl::new(cover_url.clone()) {
                rule(&mut errors, "cover_url", e.to_string());
            }
        }

        errors
    }

    pub fn into_command(self) -> CreateArticle {
        CreateArticle {
            title: self.title,
            summary: self.summary,
            content: self.content,
            category_id: self.category_id,
            cover_url: self.cover_url,
            source_url: self.source_url,
            author: self.author,
            status: ArticleStatus::from_i32(self.status).unwrap_or_default(),
            release_time: self.release_time,
        }
    }
}

/// 发布时间与状态的提示性校验:
/// - 已过期却仍是待发布 -> release_time 错误
/// - 在未来却已是已上线 -> release_time 错误
///
/// 状态本身的跳转不受限制
fn validate_release_time(
    errors: &mut RuleErrors,
    release_time: Option<DateTime<Utc>>,
    status: Option<ArticleStatus>,
    now: DateTime<Utc>,
) {
    let (Some(release_time), Some(status)) = (release_time, status) else {
        return;
    };
    if release_time < now && status == ArticleStatus::Pending {
        rule(
            errors,
            "release_time",
            "发布时间已过期，但文章仍处于待发布状态",
        );
    }
    if release_time > now && status == ArticleStatus::Active {
        rule(
            errors,
            "release_time",
            "发布时间在未来，但文章已处于上线状态",
        );
    }
}

// ============================================================================
// 更新文章（部分更新，None 字段保持原值）
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub release_time: Option<DateTime<Utc>>,
}

impl UpdateArticleRequest {
    pub fn sanitize(mut self) -> Self {
        self.title = clean_opt(self.title);
        self.summary = clean_opt(self.summary);
        self.content = clean_opt(self.content);
        self.cover_url = clean_opt(self.cover_url);
        self.author = clean_opt(self.author);
        self
    }

    /// 是否携带任何可更新字段
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.summary.is_some()
            || self.content.is_some()
            || self.category_id.is_some()
            || self.cover_url.is_some()
            || self.author.is_some()
            || self.status.is_some()
            || self.release_time.is_some()
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();
        let now = Utc::now();

        if !self.has_updates() {
            rule(&mut errors, "fields", "更新请求至少需要一个字段");
            return errors;
        }

        let status = match self.status {
            Some(raw) => match ArticleStatus::from_i32(raw) {
                Some(status) => Some(status),
                None => {
                    rule(&mut errors, "status", format!("无效的状态值: {}", raw));
                    None
                }
            },
            None => None,
        };

        if let Some(title) = &self.title {
            if let Err(e) = ArticleTitle::new(title.clone()) {
                rule(&mut errors, "title", e.to_string());
            }
        }

        // 两个字段都出现时才能判断矛盾
        validate_release_time(&mut errors, self.release_time, status, now);

        if let Some(cover_url) = &self.cover_url {
            if let Err(e) = CoverUrl::new(cover_url.clone()) {
                rule(&mut errors, "cover_url", e.to_string());
            }
        }

        errors
    }

    pub fn into_command(self, article_id: i64) -> UpdateArticle {
        UpdateArticle {
            article_id,
            title: self.title,
            summary: self.summary,
            content: self.content,
            category_id: self.category_id,
            cover_url: self.cover_url,
            author: self.author,
            status: self.status.and_then(ArticleStatus::from_i32),
            release_time: self.release_time,
        }
    }
}

// ============================================================================
// 批量设置状态
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SetArticleStatusRequest {
    #[serde(default)]
    pub article_ids: Vec<i64>,
    pub status: i32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub operation_time: Option<DateTime<Utc>>,
}

impl SetArticleStatusRequest {
    pub fn sanitize(mut self) -> Self {
        self.reason = clean_opt(self.reason);
        self
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();
        let now = Utc::now();

        if self.article_ids.is_empty() {
            rule(&mut errors, "article_ids", "文章 ID 列表不能为空");
        } else {
            let mut seen = std::collections::HashSet::new();
            if !self.article_ids.iter().all(|id| seen.insert(id)) {
                rule(&mut errors, "article_ids", "文章 ID 列表不能有重复");
            }
        }

        match ArticleStatus::from_i32(self.status) {
            Some(ArticleStatus::Deleted) => {
                // 删除必须给出原因，除非强制操作
                if !self.force && self.reason.is_none() {
                    rule(&mut errors, "reason", "删除操作必须填写原因");
                }
            }
            Some(_) => {}
            None => {
                rule(&mut errors, "status", format!("无效的状态值: {}", self.status));
            }
        }

        if let Some(operation_time) = self.operation_time {
            if operation_time > now && !self.force {
                rule(&mut errors, "operation_time", "操作时间不能在未来");
            }
            if operation_time < now - Duration::days(365) {
                rule(&mut errors, "operation_time", "操作时间不能早于一年前");
            }
        }

        errors
    }

    pub fn into_command(self) -> SetArticleStatus {
        SetArticleStatus {
            article_ids: self.article_ids,
            status: ArticleStatus::from_i32(self.status).unwrap_or_default(),
            reason: self.reason,
            force: self.force,
            operation_time: self.operation_time,
        }
    }
}

// ============================================================================
// 展示投影
// ============================================================================

/// 文章展示投影（含派生的展示字段，非持久化模型）
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub category_id: Option<i64>,
    pub cover_url: Option<String>,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub status: i32,
    pub status_text: &'static str,
    pub release_time: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRecord> for ArticleView {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            summary: record.summary,
            content: record.content,
            category_id: record.category_id,
            cover_url: record.cover_url,
            source_url: record.source_url,
            author: record.author,
            status: record.status.as_i32(),
            status_text: record.status.description(),
            release_time: record.release_time,
            view_count: record.view_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateArticleRequest {
        CreateArticleRequest {
            title: "本周要闻".to_string(),
            summary: None,
            content: "正文".to_string(),
            category_id: None,
            cover_url: None,
            source_url: None,
            author: None,
            status: 2,
            release_time: None,
        }
    }

    #[test]
    fn test_create_valid() {
        assert!(create_request().validate_business_rules().is_empty());
    }

    #[test]
    fn test_create_empty_title() {
        let mut req = create_request();
        req.title = "   ".to_string();
        let errors = req.sanitize().validate_business_rules();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn test_create_bad_status() {
        let mut req = create_request();
        req.status = 9;
        assert!(req.validate_business_rules().contains_key("status"));
    }

    #[test]
    fn test_past_release_with_pending_flagged() {
        let mut req = create_request();
        req.status = 2;
        req.release_time = Some(Utc::now() - Duration::days(2));
        assert!(req.validate_business_rules().contains_key("release_time"));
    }

    #[test]
    fn test_future_release_with_active_flagged() {
        let mut req = create_request();
        req.status = 1;
        req.release_time = Some(Utc::now() + Duration::days(2));
        assert!(req.validate_business_rules().contains_key("release_time"));
    }

    #[test]
    fn test_consistent_release_status_passes() {
        let mut req = create_request();
        req.status = 1;
        req.release_time = Some(Utc::now() - Duration::days(2));
        assert!(req.validate_business_rules().is_empty());

        req.status = 2;
        req.release_time = Some(Utc::now() + Duration::days(2));
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_bad_cover_url() {
        let mut req = create_request();
        req.cover_url = Some("not a url".to_string());
        assert!(req.validate_business_rules().contains_key("cover_url"));

        req.cover_url = Some("https://cdn.example.com/a.jpg".to_string());
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_update_requires_some_field() {
        let req = UpdateArticleRequest::default();
        assert!(!req.has_updates());
        assert!(req.validate_business_rules().contains_key("fields"));
    }

    #[test]
    fn test_update_with_field_passes() {
        let req = UpdateArticleRequest {
            title: Some("新标题".to_string()),
            ..Default::default()
        };
        assert!(req.has_updates());
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_update_empty_body_after_sanitize() {
        // 只传空白字符串等价于没传
        let req = UpdateArticleRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        }
        .sanitize();
        assert!(req.validate_business_rules().contains_key("fields"));
    }

    fn status_request() -> SetArticleStatusRequest {
        SetArticleStatusRequest {
            article_ids: vec![1, 2, 3],
            status: 1,
            reason: None,
            force: false,
            operation_time: None,
        }
    }

    #[test]
    fn test_set_status_valid() {
        assert!(status_request().validate_business_rules().is_empty());
    }

    #[test]
    fn test_set_status_duplicate_ids() {
        let mut req = status_request();
        req.article_ids = vec![1, 2, 1];
        assert!(req.validate_business_rules().contains_key("article_ids"));
    }

    #[test]
    fn test_set_status_empty_ids() {
        let mut req = status_request();
        req.article_ids.clear();
        assert!(req.validate_business_rules().contains_key("article_ids"));
    }

    #[test]
    fn test_delete_requires_reason() {
        let mut req = status_request();
        req.status = 3;
        req.reason = None;
        assert!(req.validate_business_rules().contains_key("reason"));

        req.force = true;
        assert!(req.validate_business_rules().is_empty());

        req.force = false;
        req.reason = Some("内容违规".to_string());
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_operation_time_window() {
        let mut req = status_request();
        req.operation_time = Some(Utc::now() + Duration::hours(2));
        assert!(req.validate_business_rules().contains_key("operation_time"));

        // force 放开未来时间限制
        req.force = true;
        assert!(req.validate_business_rules().is_empty());

        // 但一年前的时间无论如何都不行
        req.operation_time = Some(Utc::now() - Duration::days(400));
        assert!(req.validate_business_rules().contains_key("operation_time"));
    }

    #[test]
    fn test_sort_parsing_with_alias() {
        let order_by = parse_article_sort(Some("date:asc")).unwrap();
        assert_eq!(order_by, "release_time ASC");
    }

    #[test]
    fn test_sort_rejects_unknown_field() {
        assert!(parse_article_sort(Some("password")).is_err());
        // 链中任意一个非法字段都拒绝
        assert!(parse_article_sort(Some("title:asc,password")).is_err());
    }

    #[test]
    fn test_sort_default() {
        assert_eq!(parse_article_sort(None).unwrap(), "created_at DESC");
    }

    #[test]
    fn test_sort_chain_keeps_order() {
        let order_by = parse_article_sort(Some("status:asc,views,date:asc")).unwrap();
        assert_eq!(order_by, "status ASC, view_count DESC, release_time ASC");
    }

    #[test]
    fn test_view_carries_status_text() {
        let record = ArticleRecord {
            id: 1,
            title: "t".to_string(),
            summary: None,
            content: "c".to_string(),
            category_id: None,
            cover_url: None,
            source_url: None,
            author: None,
            status: ArticleStatus::Active,
            release_time: None,
            view_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = ArticleView::from(record);
        assert_eq!(view.status, 1);
        assert_eq!(view.status_text, "已上线");
    }
}
