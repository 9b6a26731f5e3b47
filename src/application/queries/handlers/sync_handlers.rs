//! Sync Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SyncQueuePort, SyncTask};
use crate::application::queries::GetSyncTask;

/// GetSyncTask Handler
pub struct GetSyncTaskHandler {
    sync_queue: Arc<dyn SyncQueuePort>,
}

impl GetSyncTaskHandler {
    pub fn new(sync_queue: Arc<dyn SyncQueuePort>) -> Self {
        Self { sync_queue }
    }

    pub async fn handle(&self, query: GetSyncTask) -> Result<SyncTask, ApplicationError> {
        self.sync_queue
            .get(&query.task_id)
            .ok_or_else(|| ApplicationError::not_found("SyncTask", query.task_id))
    }
}
