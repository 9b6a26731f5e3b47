//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `WEPRESS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `WEPRESS_SERVER__HOST=127.0.0.1`
/// - `WEPRESS_SERVER__PORT=8080`
/// - `WEPRESS_API__DEBUG=true`
/// - `WEPRESS_DATABASE__PATH=/data/wepress.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("api.prefix", "/api")?
        .set_default("api.debug", false)?
        .set_default("api.cors.allowed_origins", vec!["*".to_string()])?
        .set_default("api.cors.max_age_secs", 3600)?
        .set_default("database.path", "data/wepress.db")?
        .set_default("database.max_connections", 5)?
        .set_default("sync.queue_capacity", 1000)?
        .set_default("sync.max_concurrent", 2)?
        .set_default("sync.batch_size", 20)?
        .set_default("sync.wechat_base_url", "https://api.weixin.qq.com")?
        .set_default("sync.request_timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: WEPRESS_，层级分隔符: __ (双下划线)
    // 例如: WEPRESS_API__DEBUG=true
    builder = builder.add_source(
        Environment::with_prefix("WEPRESS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if !config.api.prefix.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "API prefix must start with '/'".to_string(),
        ));
    }

    if config.sync.queue_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "Sync queue capacity cannot be 0".to_string(),
        ));
    }

    if config.sync.wechat_base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "WeChat base URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("API Prefix: {}", config.api.prefix);
    tracing::info!("Debug Mode: {}", config.api.debug);
    tracing::info!("CORS Origins: {:?}", config.api.cors.allowed_origins);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!(
        "Database Max Connections: {}",
        config.database.max_connections
    );
    tracing::info!("Sync Queue Capacity: {}", config.sync.queue_capacity);
    tracing::info!("Sync Max Concurrent: {}", config.sync.max_concurrent);
    tracing::info!("WeChat Base URL: {}", config.sync.wechat_base_url);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_prefix() {
        let mut config = AppConfig::default();
        config.api.prefix = "api".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 6000

[api]
debug = true

[api.cors]
allowed_origins = ["https://admin.example.com"]
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 6000);
        assert!(config.api.debug);
        assert_eq!(
            config.api.cors.allowed_origins,
            vec!["https://admin.example.com".to_string()]
        );
        // 未覆盖的键保持默认
        assert_eq!(config.database.path, "data/wepress.db");
    }
}
