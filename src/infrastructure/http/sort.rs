//! Sort - 排序参数解析
//!
//! 入参格式 `"<field>[:<asc|desc>]"`，方向大小写不敏感，
//! 非法方向静默回落到 desc。字段经允许列表校验后才可进入 SQL。

use serde::{Deserialize, Serialize};

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// 解析方向，`"asc"` 以外的任何输入回落到 desc（非严格校验）
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// SQL 关键字形式
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Desc
    }
}

/// 排序说明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
    /// 多字段排序时的次序，越小越靠前
    priority: u32,
    /// 真实查询列名，非空时覆盖 field
    alias: Option<String>,
    /// 允许排序的字段列表，空表示不限制
    available_fields: Vec<String>,
    /// 调用方自备表达式，to_query_string 原样输出
    custom: bool,
}

impl SortSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into().trim().to_string(),
            direction: SortDirection::default(),
            priority: 0,
            alias: None,
            available_fields: Vec::new(),
            custom: false,
        }
    }

    /// 解析 `"field"` 或 `"field:direction"`，最多按第一个冒号切分
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(2, ':');
        let field = parts.next().unwrap_or("").trim().to_string();
        let direction = parts
            .next()
            .map(SortDirection::parse)
            .unwrap_or_default();
        Self {
            field,
            direction,
            priority: 0,
            alias: None,
            available_fields: Vec::new(),
            custom: false,
        }
    }

    /// 解析逗号分隔的多字段排序，按出现顺序分配 priority
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(priority, part)| Self::parse(part).with_priority(priority as u32))
            .collect()
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// 真实查询字段：alias 非空时取 alias，否则取 field
    pub fn actual_field(&self) -> &str {
        match &self.alias {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.field,
        }
    }

    // ------------------------------------------------------------------
    // 不可变更新，返回修改后的副本
    // ------------------------------------------------------------------

    pub fn with_field(&self, field: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.field = field.into().trim().to_string();
        copy
    }

    pub fn with_direction(&self, direction: SortDirection) -> Self {
        let mut copy = self.clone();
        copy.direction = direction;
        copy
    }

    pub fn with_priority(&self, priority: u32) -> Self {
        let mut copy = self.clone();
        copy.priority = priority;
        copy
    }

    pub fn with_alias(&self, alias: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.alias = Some(alias.into());
        copy
    }

    pub fn with_available_fields<I, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut copy = self.clone();
        copy.available_fields = fields.into_iter().map(Into::into).collect();
        copy
    }

    /// 调用方自备表达式（不再转义），to_query_string 原样返回
    pub fn with_custom_expression(&self, expression: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.alias = Some(expression.into());
        copy.custom = true;
        copy
    }

    // ------------------------------------------------------------------
    // 校验与输出
    // ------------------------------------------------------------------

    /// 允许列表为空，或 field / alias 在列表中
    pub fn is_field_valid(&self) -> bool {
        if self.available_fields.is_empty() {
            return true;
        }
        self.available_fields
            .iter()
            .any(|f| f == &self.field || Some(f.as_str()) == self.alias.as_deref())
    }

    /// 校验，返回全部问题
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.field.is_empty() {
            errors.push("排序字段不能为空".to_string());
        }
        if !self.is_field_valid() {
            errors.push(format!("不支持按 {} 排序", self.field));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 渲染排序子句
    ///
    /// custom 时原样输出 actual_field，否则 `"<actual_field> <ASC|DESC>"`
    pub fn to_query_string(&self) -> String {
        if self.custom {
            self.actual_field().to_string()
        } else {
            format!("{} {}", self.actual_field(), self.direction.as_sql())
        }
    }

    /// 将多个排序说明按 priority 渲染为一个 ORDER BY 子句体
    pub fn render_chain(specs: &[SortSpec]) -> String {
        let mut ordered: Vec<&SortSpec> = specs.iter().collect();
        ordered.sort_by_key(|spec| spec.priority);
        ordered
            .iter()
            .map(|spec| spec.to_query_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_only_defaults_desc() {
        let spec = SortSpec::parse("created_at");
        assert_eq!(spec.field(), "created_at");
        assert_eq!(spec.direction(), SortDirection::Desc);
    }

    #[test]
    fn test_parse_with_direction() {
        let spec = SortSpec::parse("name:asc");
        assert_eq!(spec.field(), "name");
        assert_eq!(spec.direction(), SortDirection::Asc);
        assert_eq!(spec.direction().as_str(), "asc");
    }

    #[test]
    fn test_direction_case_insensitive() {
        assert_eq!(SortSpec::parse("name:ASC").direction(), SortDirection::Asc);
        assert_eq!(SortSpec::parse("name:Asc").direction(), SortDirection::Asc);
        assert_eq!(SortSpec::parse("name:DESC").direction(), SortDirection::Desc);
    }

    #[test]
    fn test_invalid_direction_falls_back_to_desc() {
        assert_eq!(
            SortSpec::parse("name:sideways").direction(),
            SortDirection::Desc
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec = SortSpec::parse("  title : asc ");
        assert_eq!(spec.field(), "title");
        assert_eq!(spec.direction(), SortDirection::Asc);
    }

    #[test]
    fn test_only_first_colon_splits() {
        let spec = SortSpec::parse("a:b:c");
        assert_eq!(spec.field(), "a");
        // "b:c" 不是 asc，回落 desc
        assert_eq!(spec.direction(), SortDirection::Desc);
    }

    #[test]
    fn test_alias_overrides_field() {
        let spec = SortSpec::parse("date:asc").with_alias("release_time");
        assert_eq!(spec.actual_field(), "release_time");
        assert_eq!(spec.to_query_string(), "release_time ASC");
    }

    #[test]
    fn test_empty_alias_ignored() {
        let spec = SortSpec::parse("title").with_alias("");
        assert_eq!(spec.actual_field(), "title");
    }

    #[test]
    fn test_custom_expression_verbatim() {
        let spec = SortSpec::new("hot").with_custom_expression("view_count * 2 DESC");
        assert_eq!(spec.to_query_string(), "view_count * 2 DESC");
    }

    #[test]
    fn test_allow_list() {
        let spec = SortSpec::parse("title:asc").with_available_fields(["title", "created_at"]);
        assert!(spec.is_field_valid());
        assert!(spec.validate().is_ok());

        let spec = SortSpec::parse("password:asc").with_available_fields(["title"]);
        assert!(!spec.is_field_valid());
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_alias_satisfies_allow_list() {
        let spec = SortSpec::parse("date")
            .with_alias("release_time")
            .with_available_fields(["release_time", "title"]);
        assert!(spec.is_field_valid());
    }

    #[test]
    fn test_empty_allow_list_unrestricted() {
        assert!(SortSpec::parse("anything").is_field_valid());
    }

    #[test]
    fn test_empty_field_invalid() {
        let errors = SortSpec::parse("").validate().unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_with_helpers_leave_original_untouched() {
        let original = SortSpec::parse("title:asc");
        let modified = original
            .with_field("created_at")
            .with_direction(SortDirection::Desc)
            .with_priority(3);

        assert_eq!(original.field(), "title");
        assert_eq!(original.direction(), SortDirection::Asc);
        assert_eq!(original.priority(), 0);

        assert_eq!(modified.field(), "created_at");
        assert_eq!(modified.direction(), SortDirection::Desc);
        assert_eq!(modified.priority(), 3);
    }

    #[test]
    fn test_parse_list_assigns_priorities() {
        let specs = SortSpec::parse_list("status:asc, release_time:desc, id");
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].priority(), 0);
        assert_eq!(specs[1].priority(), 1);
        assert_eq!(specs[2].priority(), 2);
    }

    #[test]
    fn test_render_chain_follows_priority() {
        let specs = vec![
            SortSpec::parse("id").with_priority(2),
            SortSpec::parse("status:asc").with_priority(0),
            SortSpec::parse("release_time").with_priority(1),
        ];
        assert_eq!(
            SortSpec::render_chain(&specs),
            "status ASC, release_time DESC, id DESC"
        );
    }
}
