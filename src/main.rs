//! Wepress - 公众号新闻内容管理后端
//!
//! - Domain: article/, account/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, queue, worker, adapters

use std::sync::Arc;

use tokio::sync::mpsc;
use wepress::config::{load_config, print_config};
use wepress::infrastructure::adapters::{WeChatHttpClient, WeChatHttpClientConfig};
use wepress::infrastructure::http::{
    install_debug_mode, AppState, CorsPolicy, HttpServer, ServerConfig,
};
use wepress::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAccountRepository,
    SqliteArticleRepository, SqliteCategoryRepository, SqliteReadLogRepository,
};
use wepress::infrastructure::queue::InMemorySyncQueue;
use wepress::infrastructure::worker::{SyncWorker, SyncWorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},wepress={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Wepress - 公众号新闻内容管理后端");
    print_config(&config);

    // debug 开关进程内只装载一次
    install_debug_mode(config.api.debug);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let article_repo = Arc::new(SqliteArticleRepository::new(pool.clone()));
    let category_repo = Arc::new(SqliteCategoryRepository::new(pool.clone()));
    let account_repo = Arc::new(SqliteAccountRepository::new(pool.clone()));
    let read_log_repo = Arc::new(SqliteReadLogRepository::new(pool.clone()));

    // 创建 WeChat 客户端
    let wechat_config = WeChatHttpClientConfig {
        base_url: config.sync.wechat_base_url.clone(),
        timeout_secs: config.sync.request_timeout_secs,
    };
    let wechat_client = Arc::new(
        WeChatHttpClient::new(wechat_config)
            .map_err(|e| anyhow::anyhow!("Failed to build WeChat client: {}", e))?,
    );

    // 创建同步任务队列
    let (task_tx, task_rx) = mpsc::channel(config.sync.queue_capacity);
    let sync_queue = Arc::new(InMemorySyncQueue::new(task_tx));

    // 创建并启动 SyncWorker
    let worker_config = SyncWorkerConfig {
        max_concurrent: config.sync.max_concurrent,
        batch_size: config.sync.batch_size,
    };
    let worker = SyncWorker::new(
        worker_config,
        task_rx,
        sync_queue.clone(),
        account_repo.clone(),
        article_repo.clone(),
        wechat_client.clone(),
    );
    tokio::spawn(worker.run());

    // 创建 HTTP 服务器
    let cors = CorsPolicy {
        api_prefix: config.api.prefix.clone(),
        allowed_origins: config.api.cors.allowed_origins.clone(),
        max_age_secs: config.api.cors.max_age_secs,
    };
    let server_config =
        ServerConfig::new(&config.server.host, config.server.port).with_cors(cors);
    let state = AppState::new(
        article_repo,
        category_repo,
        account_repo,
        read_log_repo,
        sync_queue,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
