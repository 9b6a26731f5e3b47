//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CleanupReadLogsHandler, CreateAccountHandler, CreateArticleHandler, CreateCategoryHandler,
    DeleteAccountHandler, DeleteArticleHandler, DeleteCategoryHandler, RecordReadLogHandler,
    SetArticleStatusHandler, TriggerSyncHandler, UpdateAccountHandler, UpdateArticleHandler,
    UpdateCategoryHandler,
    // Query handlers
    GetAccountHandler, GetArticleHandler, GetCategoryHandler, GetSyncTaskHandler,
    ListAccountsHandler, ListArticlesHandler, ListCategoriesHandler, ListReadLogsHandler,
    // Ports
    AccountRepositoryPort, ArticleRepositoryPort, CategoryRepositoryPort,
    ReadLogRepositoryPort, SyncQueuePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub article_repo: Arc<dyn ArticleRepositoryPort>,
    pub category_repo: Arc<dyn CategoryRepositoryPort>,
    pub account_repo: Arc<dyn AccountRepositoryPort>,
    pub read_log_repo: Arc<dyn ReadLogRepositoryPort>,
    pub sync_queue: Arc<dyn SyncQueuePort>,

    // ========== Command Handlers ==========
    pub create_article_handler: CreateArticleHandler,
    pub update_article_handler: UpdateArticleHandler,
    pub set_article_status_handler: SetArticleStatusHandler,
    pub delete_article_handler: DeleteArticleHandler,
    pub create_category_handler: CreateCategoryHandler,
    pub update_category_handler: UpdateCategoryHandler,
    pub delete_category_handler: DeleteCategoryHandler,
    pub create_account_handler: CreateAccountHandler,
    pub update_account_handler: UpdateAccountHandler,
    pub delete_account_handler: DeleteAccountHandler,
    pub record_read_log_handler: RecordReadLogHandler,
    pub cleanup_read_logs_handler: CleanupReadLogsHandler,
    pub trigger_sync_handler: TriggerSyncHandler,

    // ========== Query Handlers ==========
    pub get_article_handler: GetArticleHandler,
    pub list_articles_handler: ListArticlesHandler,
    pub get_category_handler: GetCategoryHandler,
    pub list_categories_handler: ListCategoriesHandler,
    pub get_account_handler: GetAccountHandler,
    pub list_accounts_handler: ListAccountsHandler,
    pub list_read_logs_handler: ListReadLogsHandler,
    pub get_sync_task_handler: GetSyncTaskHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        article_repo: Arc<dyn ArticleRepositoryPort>,
        category_repo: Arc<dyn CategoryRepositoryPort>,
        account_repo: Arc<dyn AccountRepositoryPort>,
        read_log_repo: Arc<dyn ReadLogRepositoryPort>,
        sync_queue: Arc<dyn SyncQueuePort>,
    ) -> Self {
        Self {
            // Command handlers
            create_article_handler: CreateArticleHandler::new(
                article_repo.clone(),
                category_repo.clone(),
            ),
            update_article_handler: UpdateArticleHandler::new(
                article_repo.clone(),
                category_repo.clone(),
            ),
            set_article_status_handler: SetArticleStatusHandler::new(article_repo.clone()),
            delete_article_handler: DeleteArticleHandler::new(article_repo.clone()),
            create_category_handler: CreateCategoryHandler::new(category_repo.clone()),
            update_category_handler: UpdateCategoryHandler::new(category_repo.clone()),
            delete_category_handler: DeleteCategoryHandler::new(category_repo.clone()),
            create_account_handler: CreateAccountHandler::new(account_repo.clone()),
            update_account_handler: UpdateAccountHandler::new(account_repo.clone()),
            delete_account_handler: DeleteAccountHandler::new(account_repo.clone()),
            record_read_log_handler: RecordReadLogHandler::new(
                read_log_repo.clone(),
                article_repo.clone(),
            ),
            cleanup_read_logs_handler: CleanupReadLogsHandler::new(read_log_repo.clone()),
            trigger_sync_handler: TriggerSyncHandler::new(
                account_repo.clone(),
                sync_queue.clone(),
            ),

            // Query handlers
            get_article_handler: GetArticleHandler::new(article_repo.clone()),
            list_articles_handler: ListArticlesHandler::new(article_repo.clone()),
            get_category_handler: GetCategoryHandler::new(category_repo.clone()),
            list_categories_handler: ListCategoriesHandler::new(category_repo.clone()),
            get_account_handler: GetAccountHandler::new(account_repo.clone()),
            list_accounts_handler: ListAccountsHandler::new(account_repo.clone()),
            list_read_logs_handler: ListReadLogsHandler::new(read_log_repo.clone()),
            get_sync_task_handler: GetSyncTaskHandler::new(sync_queue.clone()),

            // Ports
            article_repo,
            category_repo,
            account_repo,
            read_log_repo,
            sync_queue,
        }
    }
}
