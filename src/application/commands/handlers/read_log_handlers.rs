//! Read Log Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{CleanupReadLogs, RecordReadLog};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArticleRepositoryPort, ReadLogRecord, ReadLogRepositoryPort,
};

/// RecordReadLog Handler
pub struct RecordReadLogHandler {
    read_log_repo: Arc<dyn ReadLogRepositoryPort>,
    article_repo: Arc<dyn ArticleRepositoryPort>,
}

impl RecordReadLogHandler {
    pub fn new(
        read_log_repo: Arc<dyn ReadLogRepositoryPort>,
        article_repo: Arc<dyn ArticleRepositoryPort>,
    ) -> Self {
        Self {
            read_log_repo,
            article_repo,
        }
    }

    pub async fn handle(
        &self,
        command: RecordReadLog,
    ) -> Result<ReadLogRecord, ApplicationError> {
        // 文章必须存在
        self.article_repo
            .find_by_id(command.article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article", command.article_id))?;

        let mut log = ReadLogRecord {
            id: 0,
            article_id: command.article_id,
            user_id: command.user_id,
            session_id: command.session_id,
            ip_address: command.ip_address,
            duration_seconds: command.duration_seconds,
            is_completed: command.is_completed,
            read_time: command.read_time,
            created_at: Utc::now(),
        };

        let id = self.read_log_repo.insert(&log).await?;
        log.id = id;

        tracing::debug!(
            read_log_id = id,
            article_id = log.article_id,
            duration = log.duration_seconds,
            "Read log recorded"
        );

        Ok(log)
    }
}

/// 清理结果
#[derive(Debug, Clone)]
pub struct CleanupOutcome {
    /// 实际删除（或 dry_run 下将被删除）的数量
    pub affected: u64,
    pub dry_run: bool,
}

/// CleanupReadLogs Handler
pub struct CleanupReadLogsHandler {
    read_log_repo: Arc<dyn ReadLogRepositoryPort>,
}

impl CleanupReadLogsHandler {
    pub fn new(read_log_repo: Arc<dyn ReadLogRepositoryPort>) -> Self {
        Self { read_log_repo }
    }

    pub async fn handle(
        &self,
        command: CleanupReadLogs,
    ) -> Result<CleanupOutcome, ApplicationError> {
        let affected = if command.dry_run {
            self.read_log_repo.count_before(command.cutoff).await?
        } else {
            self.read_log_repo.delete_before(command.cutoff).await?
        };

        tracing::info!(
            cutoff = %command.cutoff,
            affected = affected,
            dry_run = command.dry_run,
            "Read logs cleanup"
        );

        Ok(CleanupOutcome {
            affected,
            dry_run: command.dry_run,
        })
    }
}
