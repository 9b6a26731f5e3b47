//! 查询处理器

mod account_handlers;
mod article_handlers;
mod category_handlers;
mod read_log_handlers;
mod sync_handlers;

pub use account_handlers::{GetAccountHandler, ListAccountsHandler};
pub use article_handlers::{GetArticleHandler, ListArticlesHandler};
pub use category_handlers::{GetCategoryHandler, ListCategoriesHandler};
pub use read_log_handlers::ListReadLogsHandler;
pub use sync_handlers::GetSyncTaskHandler;
