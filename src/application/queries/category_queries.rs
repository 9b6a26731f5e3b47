//! Category Queries

/// 获取栏目详情查询
#[derive(Debug, Clone)]
pub struct GetCategory {
    pub category_id: i64,
}

/// 列出所有栏目查询
#[derive(Debug, Clone)]
pub struct ListCategories;
