//! Sync Queue Port - 同步任务队列
//!
//! 素材同步以消息形式进入队列，由后台 Worker 消费。
//! 本层只负责构造消息与重试/超时元数据，不执行同步本身。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// 任务默认存活时间（秒），超过未被消费则作废
pub const DEFAULT_TASK_TTL_SECS: u64 = 3600;

/// 单次同步执行默认超时（秒）
pub const DEFAULT_TASK_TIMEOUT_SECS: u64 = 600;

/// 队列错误
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue full: {0}")]
    Full(String),

    #[error("Task not found: {0}")]
    NotFound(String),
}

/// 同步方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncType {
    /// 全量同步
    Full,
    /// 增量同步（默认）
    Incremental,
}

impl SyncType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncType::Full => "full",
            SyncType::Incremental => "incremental",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "full" => Some(SyncType::Full),
            "incremental" => Some(SyncType::Incremental),
            _ => None,
        }
    }
}

impl Default for SyncType {
    fn default() -> Self {
        SyncType::Incremental
    }
}

/// 同步范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncScope {
    /// 所有图文素材
    All,
    /// 仅最近发布（受 article_limit 限制）
    Latest,
}

impl SyncScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncScope::All => "all",
            SyncScope::Latest => "latest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(SyncScope::All),
            "latest" => Some(SyncScope::Latest),
            _ => None,
        }
    }
}

impl Default for SyncScope {
    fn default() -> Self {
        SyncScope::Latest
    }
}

/// 重试策略
///
/// 指数退避: base * multiplier^attempt，封顶 max_delay_ms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub multiplier: u32,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            multiplier: 2,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// 第 attempt 次失败后的等待时长（attempt 从 0 计）
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = (self.multiplier as u64).saturating_pow(attempt);
        let delay = self.base_delay_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

/// 同步任务消息
///
/// 队列上的载荷，字段与出站消息格式一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncTaskMessage {
    pub task_id: String,
    pub account_id: i64,
    pub sync_type: SyncType,
    pub sync_scope: SyncScope,
    pub article_limit: u32,
    pub force_sync: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<Value>,
    /// 队列优先级，强制同步 8，普通 5
    pub priority: u8,
    pub retry: RetryPolicy,
    pub ttl_secs: u64,
    pub timeout_secs: u64,
    pub created_at: DateTime<Utc>,
}

impl SyncTaskMessage {
    pub fn new(
        account_id: i64,
        sync_type: SyncType,
        sync_scope: SyncScope,
        article_limit: u32,
        force_sync: bool,
        custom_options: Option<Value>,
    ) -> Self {
        Self {
            task_id: Uuid::new_v4().to_string(),
            account_id,
            sync_type,
            sync_scope,
            article_limit,
            force_sync,
            custom_options,
            priority: if force_sync { 8 } else { 5 },
            retry: RetryPolicy::default(),
            ttl_secs: DEFAULT_TASK_TTL_SECS,
            timeout_secs: DEFAULT_TASK_TIMEOUT_SECS,
            created_at: Utc::now(),
        }
    }

    /// 是否已超过存活时间
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.created_at);
        age.num_seconds() >= 0 && age.num_seconds() as u64 > self.ttl_secs
    }
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTaskState {
    /// 排队中
    Queued,
    /// 执行中
    Running,
    /// 已完成
    Succeeded,
    /// 失败（重试耗尽）
    Failed,
    /// 过期未执行
    Expired,
}

impl SyncTaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncTaskState::Queued => "queued",
            SyncTaskState::Running => "running",
            SyncTaskState::Succeeded => "succeeded",
            SyncTaskState::Failed => "failed",
            SyncTaskState::Expired => "expired",
        }
    }
}

/// 注册表中的任务条目
#[derive(Debug, Clone)]
pub struct SyncTask {
    pub message: SyncTaskMessage,
    pub state: SyncTaskState,
    pub attempts: u32,
    pub synced_articles: u64,
    pub last_error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SyncTask {
    pub fn new(message: SyncTaskMessage) -> Self {
        Self {
            message,
            state: SyncTaskState::Queued,
            attempts: 0,
            synced_articles: 0,
            last_error: None,
            completed_at: None,
        }
    }
}

/// Sync Queue Port
///
/// 入队 + 任务注册表查询；实现在 infrastructure/queue
pub trait SyncQueuePort: Send + Sync {
    /// 消息入队，返回 task_id
    fn enqueue(&self, message: SyncTaskMessage) -> Result<String, QueueError>;

    /// 查询任务
    fn get(&self, task_id: &str) -> Option<SyncTask>;

    /// 更新任务状态
    fn set_state(&self, task_id: &str, state: SyncTaskState) -> Result<(), QueueError>;

    /// 记录一次失败尝试
    fn record_attempt(&self, task_id: &str, error: String) -> Result<(), QueueError>;

    /// 标记成功并记录同步数量
    fn set_succeeded(&self, task_id: &str, synced_articles: u64) -> Result<(), QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delays_double_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
        // 远超重试次数时仍封顶 30s
        assert_eq!(policy.delay_for(10), Duration::from_millis(30_000));
    }

    #[test]
    fn test_priority_follows_force_flag() {
        let normal = SyncTaskMessage::new(1, SyncType::Incremental, SyncScope::Latest, 20, false, None);
        let forced = SyncTaskMessage::new(1, SyncType::Full, SyncScope::All, 20, true, None);
        assert_eq!(normal.priority, 5);
        assert_eq!(forced.priority, 8);
    }

    #[test]
    fn test_message_defaults() {
        let msg = SyncTaskMessage::new(7, SyncType::Incremental, SyncScope::Latest, 20, false, None);
        assert_eq!(msg.retry.max_retries, 3);
        assert_eq!(msg.ttl_secs, DEFAULT_TASK_TTL_SECS);
        assert_eq!(msg.timeout_secs, DEFAULT_TASK_TIMEOUT_SECS);
        assert!(!msg.task_id.is_empty());
    }

    #[test]
    fn test_expiry() {
        let mut msg = SyncTaskMessage::new(1, SyncType::Full, SyncScope::All, 20, false, None);
        msg.ttl_secs = 60;
        let now = msg.created_at + chrono::Duration::seconds(61);
        assert!(msg.is_expired(now));
        let now = msg.created_at + chrono::Duration::seconds(59);
        assert!(!msg.is_expired(now));
    }
}
