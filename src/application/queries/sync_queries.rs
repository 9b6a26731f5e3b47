//! Sync Queries

/// 查询同步任务状态
#[derive(Debug, Clone)]
pub struct GetSyncTask {
    pub task_id: String,
}
