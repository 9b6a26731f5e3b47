//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// API 层配置（debug 开关、CORS）
    #[serde(default)]
    pub api: ApiConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 素材同步配置
    #[serde(default)]
    pub sync: SyncConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// API 层配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API 路由前缀
    #[serde(default = "default_api_prefix")]
    pub prefix: String,

    /// debug 模式：错误响应透出原始错误文案
    #[serde(default)]
    pub debug: bool,

    /// CORS 策略
    #[serde(default)]
    pub cors: CorsConfig,
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: default_api_prefix(),
            debug: false,
            cors: CorsConfig::default(),
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// 允许的来源，含 "*" 表示任意来源
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// 预检结果缓存时长（秒）
    #[serde(default = "default_cors_max_age")]
    pub max_age_secs: u64,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            max_age_secs: default_cors_max_age(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/wepress.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 素材同步配置
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// 任务队列容量
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Worker 最大并发任务数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 每次向素材接口请求的条数
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// 微信接口基础 URL
    #[serde(default = "default_wechat_base_url")]
    pub wechat_base_url: String,

    /// 微信接口单请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_queue_capacity() -> usize {
    1000
}

fn default_max_concurrent() -> usize {
    2
}

fn default_batch_size() -> u32 {
    20
}

fn default_wechat_base_url() -> String {
    "https://api.weixin.qq.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            max_concurrent: default_max_concurrent(),
            batch_size: default_batch_size(),
            wechat_base_url: default_wechat_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.api.prefix, "/api");
        assert!(!config.api.debug);
        assert_eq!(config.api.cors.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.database.path, "data/wepress.db");
        assert_eq!(config.sync.wechat_base_url, "https://api.weixin.qq.com");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/wepress.db?mode=rwc");
    }
}
