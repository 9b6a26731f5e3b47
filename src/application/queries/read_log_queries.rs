//! Read Log Queries

use crate::application::ports::ReadLogRecord;

/// 阅读日志分页列表查询
#[derive(Debug, Clone)]
pub struct ListReadLogs {
    pub article_id: Option<i64>,
    pub offset: u64,
    pub limit: u64,
}

/// 分页查询结果
#[derive(Debug, Clone)]
pub struct ReadLogPage {
    pub items: Vec<ReadLogRecord>,
    pub total: u64,
}
