//! Worker Layer - Background Task Processing
//!
//! 实现 SyncWorker，消费同步任务消息

mod sync_worker;

pub use sync_worker::{SyncWorker, SyncWorkerConfig};
