//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::ArticleStatus;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Article Repository
// ============================================================================

/// 文章实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub category_id: Option<i64>,
    pub cover_url: Option<String>,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub status: ArticleStatus,
    pub release_time: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 文章列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub status: Option<ArticleStatus>,
    pub category_id: Option<i64>,
    /// 标题关键字（LIKE 匹配）
    pub keyword: Option<String>,
}

/// Article Repository Port
#[async_trait]
pub trait ArticleRepositoryPort: Send + Sync {
    /// 插入文章，返回自增 ID
    async fn insert(&self, article: &ArticleRecord) -> Result<i64, RepositoryError>;

    /// 更新文章（按 ID 全量覆盖）
    async fn update(&self, article: &ArticleRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找文章
    async fn find_by_id(&self, id: i64) -> Result<Option<ArticleRecord>, RepositoryError>;

    /// 根据来源地址查找（同步去重用）
    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<ArticleRecord>, RepositoryError>;

    /// 分页查询，返回 (当前页记录, 总数)
    ///
    /// `order_by` 必须是上游经过允许列表校验后渲染出的子句
    async fn find_page(
        &self,
        filter: &ArticleFilter,
        order_by: &str,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<ArticleRecord>, u64), RepositoryError>;

    /// 批量更新状态，返回受影响行数
    async fn update_status(
        &self,
        ids: &[i64],
        status: ArticleStatus,
    ) -> Result<u64, RepositoryError>;

    /// 删除文章
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Category Repository
// ============================================================================

/// 栏目实体（用于持久化）
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub sort_order: i64,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category Repository Port
#[async_trait]
pub trait CategoryRepositoryPort: Send + Sync {
    /// 插入栏目，返回自增 ID
    async fn insert(&self, category: &CategoryRecord) -> Result<i64, RepositoryError>;

    /// 更新栏目
    async fn update(&self, category: &CategoryRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找栏目
    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>, RepositoryError>;

    /// 获取所有栏目（按 sort_order 升序）
    async fn find_all(&self) -> Result<Vec<CategoryRecord>, RepositoryError>;

    /// 删除栏目
    ///
    /// 仍被文章引用时返回 [`RepositoryError::ForeignKey`]
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Account Repository
// ============================================================================

/// 公众号账号实体（用于持久化）
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: i64,
    pub name: String,
    pub app_id: String,
    pub app_secret: String,
    pub token: Option<String>,
    pub encoding_aes_key: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account Repository Port
#[async_trait]
pub trait AccountRepositoryPort: Send + Sync {
    /// 插入账号，返回自增 ID
    ///
    /// AppID 重复时返回 [`RepositoryError::Duplicate`]
    async fn insert(&self, account: &AccountRecord) -> Result<i64, RepositoryError>;

    /// 更新账号
    async fn update(&self, account: &AccountRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找账号
    async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, RepositoryError>;

    /// 根据 AppID 查找账号
    async fn find_by_app_id(&self, app_id: &str)
        -> Result<Option<AccountRecord>, RepositoryError>;

    /// 获取所有账号
    async fn find_all(&self) -> Result<Vec<AccountRecord>, RepositoryError>;

    /// 删除账号
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Read Log Repository
// ============================================================================

/// 阅读日志实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ReadLogRecord {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub session_id: Option<String>,
    pub ip_address: Option<String>,
    pub duration_seconds: i64,
    pub is_completed: bool,
    pub read_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Read Log Repository Port
#[async_trait]
pub trait ReadLogRepositoryPort: Send + Sync {
    /// 插入阅读日志，返回自增 ID
    async fn insert(&self, log: &ReadLogRecord) -> Result<i64, RepositoryError>;

    /// 分页查询（可按文章过滤），返回 (当前页记录, 总数)
    async fn find_page(
        &self,
        article_id: Option<i64>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<ReadLogRecord>, u64), RepositoryError>;

    /// 统计指定时刻之前的日志数量（清理前预估用）
    async fn count_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;

    /// 删除指定时刻之前的日志，返回删除数量
    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
