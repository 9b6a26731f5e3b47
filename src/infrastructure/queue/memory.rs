//! In-Memory Sync Queue Implementation
//!
//! DashMap 任务注册表 + mpsc 队列通道。
//! 入队只投递 task_id，消息本体由 Worker 从注册表取

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::application::ports::{
    QueueError, SyncQueuePort, SyncTask, SyncTaskMessage, SyncTaskState,
};

/// 内存同步队列
pub struct InMemorySyncQueue {
    /// task_id -> SyncTask
    tasks: DashMap<String, SyncTask>,
    /// 任务队列发送端
    queue_sender: mpsc::Sender<String>,
}

impl InMemorySyncQueue {
    pub fn new(queue_sender: mpsc::Sender<String>) -> Self {
        Self {
            tasks: DashMap::new(),
            queue_sender,
        }
    }
}

impl SyncQueuePort for InMemorySyncQueue {
    fn enqueue(&self, message: SyncTaskMessage) -> Result<String, QueueError> {
        let task_id = message.task_id.clone();
        self.tasks.insert(task_id.clone(), SyncTask::new(message));

        if let Err(e) = self.queue_sender.try_send(task_id.clone()) {
            // 投递失败的任务不留在注册表里
            self.tasks.remove(&task_id);
            tracing::warn!(task_id = %task_id, error = %e, "Failed to enqueue sync task");
            return Err(QueueError::Full(e.to_string()));
        }

        tracing::debug!(task_id = %task_id, "Sync task enqueued");
        Ok(task_id)
    }

    fn get(&self, task_id: &str) -> Option<SyncTask> {
        self.tasks.get(task_id).map(|entry| entry.value().clone())
    }

    fn set_state(&self, task_id: &str, state: SyncTaskState) -> Result<(), QueueError> {
        let mut task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| QueueError::NotFound(task_id.to_string()))?;

        let old_state = task.state;
        task.state = state;
        if matches!(
            state,
            SyncTaskState::Succeeded | SyncTaskState::Failed | SyncTaskState::Expired
        ) {
            task.completed_at = Some(Utc::now());
        }

        tracing::debug!(
            task_id = %task_id,
            old_state = old_state.as_str(),
            new_state = state.as_str(),
            "Sync task state changed"
        );
        Ok(())
    }

    fn record_attempt(&self, task_id: &str, error: String) -> Result<(), QueueError> {
        let mut task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| QueueError::NotFound(task_id.to_string()))?;

        task.attempts += 1;
        task.last_error = Some(error);
        Ok(())
    }

    fn set_succeeded(&self, task_id: &str, synced_articles: u64) -> Result<(), QueueError> {
        let mut task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| QueueError::NotFound(task_id.to_string()))?;

        task.state = SyncTaskState::Succeeded;
        task.synced_articles = synced_articles;
        task.completed_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{SyncScope, SyncType};

    fn message() -> SyncTaskMessage {
        SyncTaskMessage::new(1, SyncType::Incremental, SyncScope::Latest, 20, false, None)
    }

    #[tokio::test]
    async fn test_enqueue_delivers_task_id() {
        let (tx, mut rx) = mpsc::channel(10);
        let queue = InMemorySyncQueue::new(tx);

        let task_id = queue.enqueue(message()).unwrap();
        assert_eq!(rx.recv().await.unwrap(), task_id);

        let task = queue.get(&task_id).unwrap();
        assert_eq!(task.state, SyncTaskState::Queued);
        assert_eq!(task.attempts, 0);
    }

    #[tokio::test]
    async fn test_full_channel_rejects_and_cleans_registry() {
        let (tx, _rx) = mpsc::channel(1);
        let queue = InMemorySyncQueue::new(tx);

        queue.enqueue(message()).unwrap();
        let err = queue.enqueue(message()).unwrap_err();
        assert!(matches!(err, QueueError::Full(_)));

        // 注册表里只剩第一个任务
        assert_eq!(queue.tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let (tx, _rx) = mpsc::channel(10);
        let queue = InMemorySyncQueue::new(tx);
        let task_id = queue.enqueue(message()).unwrap();

        queue.set_state(&task_id, SyncTaskState::Running).unwrap();
        assert_eq!(queue.get(&task_id).unwrap().state, SyncTaskState::Running);
        assert!(queue.get(&task_id).unwrap().completed_at.is_none());

        queue.record_attempt(&task_id, "network down".to_string()).unwrap();
        let task = queue.get(&task_id).unwrap();
        assert_eq!(task.attempts, 1);
        assert_eq!(task.last_error.as_deref(), Some("network down"));

        queue.set_succeeded(&task_id, 12).unwrap();
        let task = queue.get(&task_id).unwrap();
        assert_eq!(task.state, SyncTaskState::Succeeded);
        assert_eq!(task.synced_articles, 12);
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn test_unknown_task_errors() {
        let (tx, _rx) = mpsc::channel(1);
        let queue = InMemorySyncQueue::new(tx);
        assert!(queue.get("missing").is_none());
        assert!(matches!(
            queue.set_state("missing", SyncTaskState::Running),
            Err(QueueError::NotFound(_))
        ));
    }
}
