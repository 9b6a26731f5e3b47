//! Read Log Commands

use chrono::{DateTime, Utc};

/// 记录阅读日志命令
#[derive(Debug, Clone)]
pub struct RecordReadLog {
    pub article_id: i64,
    pub user_id: i64,
    pub session_id: Option<String>,
    pub ip_address: Option<String>,
    pub duration_seconds: i64,
    pub is_completed: bool,
    pub read_time: DateTime<Utc>,
}

/// 清理历史阅读日志命令
#[derive(Debug, Clone)]
pub struct CleanupReadLogs {
    /// 删除该时刻之前的日志
    pub cutoff: DateTime<Utc>,
    /// 只统计不删除
    pub dry_run: bool,
}
