//! Read Log Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ReadLogRepositoryPort;
use crate::application::queries::{ListReadLogs, ReadLogPage};

/// ListReadLogs Handler
pub struct ListReadLogsHandler {
    read_log_repo: Arc<dyn ReadLogRepositoryPort>,
}

impl ListReadLogsHandler {
    pub fn new(read_log_repo: Arc<dyn ReadLogRepositoryPort>) -> Self {
        Self { read_log_repo }
    }

    pub async fn handle(&self, query: ListReadLogs) -> Result<ReadLogPage, ApplicationError> {
        let (items, total) = self
            .read_log_repo
            .find_page(query.article_id, query.offset, query.limit)
            .await?;

        Ok(ReadLogPage { items, total })
    }
}
