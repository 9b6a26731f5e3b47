//! Sync Command Handlers

use std::sync::Arc;

use crate::application::commands::TriggerSync;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AccountRepositoryPort, SyncQueuePort, SyncTask, SyncTaskMessage,
};

/// TriggerSync Handler
///
/// 校验账号后构造同步消息入队，立即返回任务信息
pub struct TriggerSyncHandler {
    account_repo: Arc<dyn AccountRepositoryPort>,
    sync_queue: Arc<dyn SyncQueuePort>,
}

impl TriggerSyncHandler {
    pub fn new(
        account_repo: Arc<dyn AccountRepositoryPort>,
        sync_queue: Arc<dyn SyncQueuePort>,
    ) -> Self {
        Self {
            account_repo,
            sync_queue,
        }
    }

    pub async fn handle(&self, command: TriggerSync) -> Result<SyncTask, ApplicationError> {
        let account = self
            .account_repo
            .find_by_id(command.account_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Account", command.account_id))?;

        let message = SyncTaskMessage::new(
            command.account_id,
            command.sync_type,
            command.sync_scope,
            command.article_limit,
            command.force_sync,
            command.custom_options,
        );
        let task_id = self.sync_queue.enqueue(message)?;

        let task = self
            .sync_queue
            .get(&task_id)
            .ok_or_else(|| ApplicationError::internal("Task vanished right after enqueue"))?;

        tracing::info!(
            task_id = %task_id,
            account_id = account.id,
            app_id = %account.app_id,
            sync_type = task.message.sync_type.as_str(),
            priority = task.message.priority,
            "Sync task enqueued"
        );

        Ok(task)
    }
}
