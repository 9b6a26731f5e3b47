//! Category Commands

/// 创建栏目命令
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub slug: Option<String>,
    pub sort_order: i64,
    pub enabled: bool,
}

/// 更新栏目命令（None 字段保持原值）
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub category_id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sort_order: Option<i64>,
    pub enabled: Option<bool>,
}

/// 删除栏目命令
#[derive(Debug, Clone)]
pub struct DeleteCategory {
    pub category_id: i64,
}
