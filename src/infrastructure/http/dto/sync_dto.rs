//! Sync DTOs - 素材同步

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{rule, RuleErrors};
use crate::application::commands::TriggerSync;
use crate::application::ports::{SyncScope, SyncTask, SyncType};

/// 单次同步拉取数量上限
const MAX_ARTICLE_LIMIT: u32 = 100;

fn default_article_limit() -> u32 {
    20
}

// ============================================================================
// 触发同步
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SyncRequest {
    /// "full" | "incremental"，默认 incremental
    #[serde(default)]
    pub sync_type: Option<String>,
    /// "all" | "latest"，默认 latest
    #[serde(default)]
    pub sync_scope: Option<String>,
    #[serde(default = "default_article_limit")]
    pub article_limit: u32,
    #[serde(default)]
    pub force_sync: bool,
    /// 透传给任务消息的自定义参数
    #[serde(default)]
    pub custom_options: Option<Value>,
}

impl SyncRequest {
    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();

        if let Some(raw) = &self.sync_type {
            if SyncType::from_str(raw).is_none() {
                rule(&mut errors, "sync_type", format!("未知的同步方式: {}", raw));
            }
        }
        if let Some(raw) = &self.sync_scope {
            if SyncScope::from_str(raw).is_none() {
                rule(&mut errors, "sync_scope", format!("未知的同步范围: {}", raw));
            }
        }
        if self.article_limit == 0 || self.article_limit > MAX_ARTICLE_LIMIT {
            rule(
                &mut errors,
                "article_limit",
                format!("单次同步数量必须在 1 到 {} 之间", MAX_ARTICLE_LIMIT),
            );
        }

        errors
    }

    pub fn into_command(self, account_id: i64) -> TriggerSync {
        TriggerSync {
            account_id,
            sync_type: self
                .sync_type
                .as_deref()
                .and_then(SyncType::from_str)
                .unwrap_or_default(),
            sync_scope: self
                .sync_scope
                .as_deref()
                .and_then(SyncScope::from_str)
                .unwrap_or_default(),
            article_limit: self.article_limit,
            force_sync: self.force_sync,
            custom_options: self.custom_options,
        }
    }
}

// ============================================================================
// 展示投影
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SyncTaskView {
    pub task_id: String,
    pub account_id: i64,
    pub sync_type: &'static str,
    pub sync_scope: &'static str,
    pub article_limit: u32,
    pub force_sync: bool,
    pub priority: u8,
    pub state: &'static str,
    pub attempts: u32,
    pub synced_articles: u64,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<SyncTask> for SyncTaskView {
    fn from(task: SyncTask) -> Self {
        Self {
            task_id: task.message.task_id,
            account_id: task.message.account_id,
            sync_type: task.message.sync_type.as_str(),
            sync_scope: task.message.sync_scope.as_str(),
            article_limit: task.message.article_limit,
            force_sync: task.message.force_sync,
            priority: task.message.priority,
            state: task.state.as_str(),
            attempts: task.attempts,
            synced_articles: task.synced_articles,
            last_error: task.last_error,
            created_at: task.message.created_at,
            completed_at: task.completed_at,
        }
    }
}
