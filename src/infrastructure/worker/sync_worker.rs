//! Sync Worker - Background Material Sync Processor
//!
//! 从队列消费同步任务，按消息自带的重试策略执行：
//! 指数退避重试，单次执行受 timeout_secs 约束，
//! 超过 TTL 未被消费的任务直接作废

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AccountRecord, ArticleRecord, ArticleRepositoryPort, RemoteArticle, SyncQueuePort,
    SyncScope, SyncTask, SyncTaskState, SyncType, WeChatClientPort,
};
use crate::domain::ArticleStatus;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct SyncWorkerConfig {
    /// 最大并发同步任务数
    pub max_concurrent: usize,
    /// 每次向素材接口请求的条数
    pub batch_size: u32,
}

impl Default for SyncWorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 2,
            batch_size: 20,
        }
    }
}

/// 同步 Worker
///
/// 后台任务处理器，从队列消费任务并拉取公众号素材入库
pub struct SyncWorker {
    config: SyncWorkerConfig,
    queue_receiver: mpsc::Receiver<String>,
    sync_queue: Arc<dyn SyncQueuePort>,
    account_repo: Arc<dyn crate::application::ports::AccountRepositoryPort>,
    article_repo: Arc<dyn ArticleRepositoryPort>,
    wechat_client: Arc<dyn WeChatClientPort>,
}

impl SyncWorker {
    pub fn new(
        config: SyncWorkerConfig,
        queue_receiver: mpsc::Receiver<String>,
        sync_queue: Arc<dyn SyncQueuePort>,
        account_repo: Arc<dyn crate::application::ports::AccountRepositoryPort>,
        article_repo: Arc<dyn ArticleRepositoryPort>,
        wechat_client: Arc<dyn WeChatClientPort>,
    ) -> Self {
        Self {
            config,
            queue_receiver,
            sync_queue,
            account_repo,
            article_repo,
            wechat_client,
        }
    }

    /// 启动 Worker
    pub async fn run(mut self) {
        tracing::info!(
            max_concurrent = self.config.max_concurrent,
            "SyncWorker started"
        );

        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.config.max_concurrent));

        while let Some(task_id) = self.queue_receiver.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::error!("Failed to acquire semaphore permit");
                    continue;
                }
            };

            let sync_queue = self.sync_queue.clone();
            let account_repo = self.account_repo.clone();
            let article_repo = self.article_repo.clone();
            let wechat_client = self.wechat_client.clone();
            let batch_size = self.config.batch_size;

            tokio::spawn(async move {
                let _permit = permit; // 持有 permit 直到任务完成

                Self::process_task(
                    &task_id,
                    sync_queue,
                    account_repo,
                    article_repo,
                    wechat_client,
                    batch_size,
                )
                .await;
            });
        }

        tracing::info!("SyncWorker stopped");
    }

    /// 处理单个任务
    async fn process_task(
        task_id: &str,
        sync_queue: Arc<dyn SyncQueuePort>,
        account_repo: Arc<dyn crate::application::ports::AccountRepositoryPort>,
        article_repo: Arc<dyn ArticleRepositoryPort>,
        wechat_client: Arc<dyn WeChatClientPort>,
        batch_size: u32,
    ) {
        let task = match sync_queue.get(task_id) {
            Some(task) => task,
            None => {
                tracing::warn!(task_id = %task_id, "Task not found, skipping");
                return;
            }
        };

        // Check 1: 是否超过存活时间
        if task.message.is_expired(Utc::now()) {
            tracing::warn!(task_id = %task_id, "Task expired before execution");
            let _ = sync_queue.set_state(task_id, SyncTaskState::Expired);
            return;
        }

        // Check 2: 账号是否仍然存在
        let account = match account_repo.find_by_id(task.message.account_id).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::warn!(
                    task_id = %task_id,
                    account_id = task.message.account_id,
                    "Account gone, failing task"
                );
                let _ = sync_queue.record_attempt(task_id, "account not found".to_string());
                let _ = sync_queue.set_state(task_id, SyncTaskState::Failed);
                return;
            }
            Err(e) => {
                let _ = sync_queue.record_attempt(task_id, e.to_string());
                let _ = sync_queue.set_state(task_id, SyncTaskState::Failed);
                return;
            }
        };

        let _ = sync_queue.set_state(task_id, SyncTaskState::Running);

        let retry = task.message.retry.clone();
        let timeout = std::time::Duration::from_secs(task.message.timeout_secs);

        for attempt in 0..=retry.max_retries {
            let outcome = tokio::time::timeout(
                timeout,
                Self::sync_once(
                    &task,
                    &account,
                    article_repo.as_ref(),
                    wechat_client.as_ref(),
                    batch_size,
                ),
            )
            .await;

            match outcome {
                Ok(Ok(synced)) => {
                    let _ = sync_queue.set_succeeded(task_id, synced);
                    tracing::info!(
                        task_id = %task_id,
                        account_id = account.id,
                        synced = synced,
                        attempt = attempt,
                        "Sync task completed"
                    );
                    return;
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        task_id = %task_id,
                        attempt = attempt,
                        error = %e,
                        "Sync attempt failed"
                    );
                    let _ = sync_queue.record_attempt(task_id, e.to_string());
                }
                Err(_) => {
                    tracing::warn!(
                        task_id = %task_id,
                        attempt = attempt,
                        timeout_secs = task.message.timeout_secs,
                        "Sync attempt timed out"
                    );
                    let _ = sync_queue.record_attempt(task_id, "sync timed out".to_string());
                }
            }

            if attempt < retry.max_retries {
                tokio::time::sleep(retry.delay_for(attempt)).await;
            }
        }

        let _ = sync_queue.set_state(task_id, SyncTaskState::Failed);
        tracing::error!(task_id = %task_id, "Sync task failed after retries");
    }

    /// 执行一次完整同步，返回落库的文章数
    async fn sync_once(
        task: &SyncTask,
        account: &AccountRecord,
        article_repo: &dyn ArticleRepositoryPort,
        wechat_client: &dyn WeChatClientPort,
        batch_size: u32,
    ) -> Result<u64, ApplicationError> {
        let access_token = wechat_client
            .fetch_access_token(&account.app_id, &account.app_secret)
            .await?;

        let limit = match task.message.sync_scope {
            SyncScope::Latest => task.message.article_limit as usize,
            SyncScope::All => usize::MAX,
        };
        // 全量或强制同步时已有记录也回写，增量只补新素材
        let refresh_existing =
            task.message.sync_type == SyncType::Full || task.message.force_sync;

        let mut synced: u64 = 0;
        let mut offset: u32 = 0;

        loop {
            let remaining = limit.saturating_sub(offset as usize);
            if remaining == 0 {
                break;
            }
            let count = (batch_size as usize).min(remaining).max(1) as u32;

            let batch = wechat_client
                .fetch_articles(&access_token, offset, count)
                .await?;
            let fetched = batch.len();

            for remote in batch {
                if Self::upsert_article(article_repo, remote, refresh_existing).await? {
                    synced += 1;
                }
            }

            if fetched < count as usize {
                break;
            }
            offset += fetched as u32;
        }

        Ok(synced)
    }

    /// 按来源地址去重入库，返回是否写库
    async fn upsert_article(
        article_repo: &dyn ArticleRepositoryPort,
        remote: RemoteArticle,
        refresh_existing: bool,
    ) -> Result<bool, ApplicationError> {
        let existing = match &remote.content_source_url {
            Some(source_url) => article_repo.find_by_source_url(source_url).await?,
            None => None,
        };

        let now = Utc::now();
        match existing {
            Some(_) if !refresh_existing => Ok(false),
            Some(mut article) => {
                article.title = remote.title;
                article.summary = remote.digest;
                article.content = remote.content;
                article.author = remote.author;
                article.cover_url = remote.thumb_url;
                article.release_time = remote.publish_time;
                article.updated_at = now;
                article_repo.update(&article).await?;
                Ok(true)
            }
            None => {
                let article = ArticleRecord {
                    id: 0,
                    title: remote.title,
                    summary: remote.digest,
                    content: remote.content,
                    category_id: None,
                    cover_url: remote.thumb_url,
                    source_url: remote.content_source_url,
                    author: remote.author,
                    // 远端素材均为已发布内容
                    status: ArticleStatus::Active,
                    release_time: remote.publish_time,
                    view_count: 0,
                    created_at: now,
                    updated_at: now,
                };
                article_repo.insert(&article).await?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AccountRepositoryPort, RetryPolicy, SyncTaskMessage, SyncType,
    };
    use crate::infrastructure::adapters::FakeWeChatClient;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteAccountRepository,
        SqliteArticleRepository,
    };
    use crate::infrastructure::queue::InMemorySyncQueue;

    struct Fixture {
        queue: Arc<InMemorySyncQueue>,
        account_id: i64,
        article_repo: Arc<SqliteArticleRepository>,
    }

    fn remote(title: &str, source: &str) -> RemoteArticle {
        RemoteArticle {
            title: title.to_string(),
            author: Some("编辑部".to_string()),
            digest: None,
            content: "正文".to_string(),
            content_source_url: Some(source.to_string()),
            thumb_url: None,
            publish_time: None,
        }
    }

    async fn start_worker(articles: Vec<RemoteArticle>, failures: u32) -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let account_repo = Arc::new(SqliteAccountRepository::new(pool.clone()));
        let article_repo = Arc::new(SqliteArticleRepository::new(pool));

        let now = Utc::now();
        let account_id = account_repo
            .insert(&AccountRecord {
                id: 0,
                name: "测试".to_string(),
                app_id: "wx1234567890abcdef".to_string(),
                app_secret: "0123456789abcdef0123456789abcdef".to_string(),
                token: None,
                encoding_aes_key: None,
                description: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let (tx, rx) = mpsc::channel(16);
        let queue = Arc::new(InMemorySyncQueue::new(tx));
        let wechat = Arc::new(FakeWeChatClient::new(articles).with_failures(failures));

        let worker = SyncWorker::new(
            SyncWorkerConfig {
                max_concurrent: 1,
                batch_size: 2,
            },
            rx,
            queue.clone(),
            account_repo,
            article_repo.clone(),
            wechat,
        );
        tokio::spawn(worker.run());

        Fixture {
            queue,
            account_id,
            article_repo,
        }
    }

    /// 轮询等待任务进入终态
    async fn wait_terminal(queue: &InMemorySyncQueue, task_id: &str) -> SyncTask {
        for _ in 0..200 {
            if let Some(task) = queue.get(task_id) {
                if matches!(
                    task.state,
                    SyncTaskState::Succeeded | SyncTaskState::Failed | SyncTaskState::Expired
                ) {
                    return task;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("task {} never reached a terminal state", task_id);
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            base_delay_ms: 1,
            multiplier: 2,
            max_delay_ms: 10,
        }
    }

    #[tokio::test]
    async fn test_sync_succeeds_and_persists_articles() {
        let fixture = start_worker(
            vec![remote("a", "https://mp.example.com/1"), remote("b", "https://mp.example.com/2")],
            0,
        )
        .await;

        let mut message = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Incremental,
            SyncScope::Latest,
            10,
            false,
            None,
        );
        message.retry = fast_retry();
        let task_id = fixture.queue.enqueue(message).unwrap();

        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.state, SyncTaskState::Succeeded);
        assert_eq!(task.synced_articles, 2);

        let found = fixture
            .article_repo
            .find_by_source_url("https://mp.example.com/1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "a");
        assert_eq!(found.status, ArticleStatus::Active);
    }

    #[tokio::test]
    async fn test_sync_retries_through_transient_failures() {
        let fixture = start_worker(vec![remote("a", "https://mp.example.com/1")], 2).await;

        let mut message = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Incremental,
            SyncScope::Latest,
            10,
            false,
            None,
        );
        message.retry = fast_retry();
        let task_id = fixture.queue.enqueue(message).unwrap();

        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.state, SyncTaskState::Succeeded);
        // 前两次失败被记录
        assert_eq!(task.attempts, 2);
    }

    #[tokio::test]
    async fn test_sync_fails_after_retry_budget() {
        let fixture = start_worker(vec![remote("a", "https://mp.example.com/1")], 99).await;

        let mut message = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Incremental,
            SyncScope::Latest,
            10,
            false,
            None,
        );
        message.retry = fast_retry();
        let task_id = fixture.queue.enqueue(message).unwrap();

        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.state, SyncTaskState::Failed);
        assert_eq!(task.attempts, 4); // 首次 + 3 次重试
        assert!(task.last_error.is_some());
    }

    #[tokio::test]
    async fn test_incremental_skips_existing_full_refreshes() {
        let fixture = start_worker(vec![remote("a", "https://mp.example.com/1")], 0).await;

        let mut first = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Incremental,
            SyncScope::Latest,
            10,
            false,
            None,
        );
        first.retry = fast_retry();
        let task_id = fixture.queue.enqueue(first).unwrap();
        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.synced_articles, 1);

        // 增量重跑：素材已存在，跳过
        let mut second = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Incremental,
            SyncScope::Latest,
            10,
            false,
            None,
        );
        second.retry = fast_retry();
        let task_id = fixture.queue.enqueue(second).unwrap();
        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.state, SyncTaskState::Succeeded);
        assert_eq!(task.synced_articles, 0);

        // 全量重跑：已有记录也回写
        let mut third = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Full,
            SyncScope::All,
            10,
            false,
            None,
        );
        third.retry = fast_retry();
        let task_id = fixture.queue.enqueue(third).unwrap();
        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.synced_articles, 1);
    }

    #[tokio::test]
    async fn test_expired_task_skipped() {
        let fixture = start_worker(vec![], 0).await;

        let mut message = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Full,
            SyncScope::All,
            10,
            false,
            None,
        );
        message.ttl_secs = 0;
        message.created_at = Utc::now() - chrono::Duration::seconds(10);
        let task_id = fixture.queue.enqueue(message).unwrap();

        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.state, SyncTaskState::Expired);
    }

    #[tokio::test]
    async fn test_sync_respects_article_limit() {
        let articles: Vec<RemoteArticle> = (0..5)
            .map(|i| remote(&format!("n{}", i), &format!("https://mp.example.com/{}", i)))
            .collect();
        let fixture = start_worker(articles, 0).await;

        let mut message = SyncTaskMessage::new(
            fixture.account_id,
            SyncType::Incremental,
            SyncScope::Latest,
            3,
            false,
            None,
        );
        message.retry = fast_retry();
        let task_id = fixture.queue.enqueue(message).unwrap();

        let task = wait_terminal(&fixture.queue, &task_id).await;
        assert_eq!(task.state, SyncTaskState::Succeeded);
        assert_eq!(task.synced_articles, 3);
    }
}
