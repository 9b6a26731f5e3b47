//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、SyncQueue、WeChatClient）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Account commands
    CreateAccount,
    DeleteAccount,
    UpdateAccount,
    // Article commands
    CreateArticle,
    DeleteArticle,
    SetArticleStatus,
    UpdateArticle,
    // Category commands
    CreateCategory,
    DeleteCategory,
    UpdateCategory,
    // Read log commands
    CleanupReadLogs,
    RecordReadLog,
    // Sync commands
    TriggerSync,
    // Handlers
    handlers::{
        CleanupReadLogsHandler, CreateAccountHandler, CreateArticleHandler,
        CreateCategoryHandler, DeleteAccountHandler, DeleteArticleHandler,
        DeleteCategoryHandler, RecordReadLogHandler, SetArticleStatusHandler,
        SetStatusOutcome, TriggerSyncHandler, UpdateAccountHandler, UpdateArticleHandler,
        UpdateCategoryHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Repositories
    AccountRecord,
    AccountRepositoryPort,
    ArticleFilter,
    ArticleRecord,
    ArticleRepositoryPort,
    CategoryRecord,
    CategoryRepositoryPort,
    ReadLogRecord,
    ReadLogRepositoryPort,
    RepositoryError,
    // Sync queue
    QueueError,
    RetryPolicy,
    SyncQueuePort,
    SyncScope,
    SyncTask,
    SyncTaskMessage,
    SyncTaskState,
    SyncType,
    // WeChat client
    RemoteArticle,
    WeChatClientPort,
    WeChatError,
};

pub use queries::{
    // Account queries
    GetAccount,
    ListAccounts,
    // Article queries
    ArticlePage,
    GetArticle,
    ListArticles,
    // Category queries
    GetCategory,
    ListCategories,
    // Read log queries
    ListReadLogs,
    ReadLogPage,
    // Sync queries
    GetSyncTask,
    // Handlers
    handlers::{
        GetAccountHandler, GetArticleHandler, GetCategoryHandler, GetSyncTaskHandler,
        ListAccountsHandler, ListArticlesHandler, ListCategoriesHandler, ListReadLogsHandler,
    },
};
