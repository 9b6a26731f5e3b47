//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod repositories;
mod sync_queue;
mod wechat;

pub use repositories::{
    AccountRecord, AccountRepositoryPort, ArticleFilter, ArticleRecord, ArticleRepositoryPort,
    CategoryRecord, CategoryRepositoryPort, ReadLogRecord, ReadLogRepositoryPort, RepositoryError,
};
pub use sync_queue::{
    QueueError, RetryPolicy, SyncQueuePort, SyncScope, SyncTask, SyncTaskMessage, SyncTaskState,
    SyncType, DEFAULT_TASK_TIMEOUT_SECS, DEFAULT_TASK_TTL_SECS,
};
pub use wechat::{RemoteArticle, WeChatClientPort, WeChatError};
