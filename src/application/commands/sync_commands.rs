//! Sync Commands

use serde_json::Value;

use crate::application::ports::{SyncScope, SyncType};

/// 触发素材同步命令
///
/// 只负责构造消息并入队，不等待同步完成
#[derive(Debug, Clone)]
pub struct TriggerSync {
    pub account_id: i64,
    pub sync_type: SyncType,
    pub sync_scope: SyncScope,
    pub article_limit: u32,
    pub force_sync: bool,
    pub custom_options: Option<Value>,
}
