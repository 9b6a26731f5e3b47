//! 命令处理器

mod account_handlers;
mod article_handlers;
mod category_handlers;
mod read_log_handlers;
mod sync_handlers;

pub use account_handlers::{CreateAccountHandler, DeleteAccountHandler, UpdateAccountHandler};
pub use article_handlers::{
    CreateArticleHandler, DeleteArticleHandler, SetArticleStatusHandler, SetStatusOutcome,
    UpdateArticleHandler,
};
pub use category_handlers::{
    CreateCategoryHandler, DeleteCategoryHandler, UpdateCategoryHandler,
};
pub use read_log_handlers::{CleanupOutcome, CleanupReadLogsHandler, RecordReadLogHandler};
pub use sync_handlers::TriggerSyncHandler;
