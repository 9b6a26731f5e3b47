//! Wepress - 公众号新闻内容管理后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Article Context: 文章状态机与值对象
//! - Account Context: 公众号凭证值对象
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, SyncQueue, WeChatClient）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（分页/排序/DTO 校验/统一信封/异常映射/CORS）
//! - Persistence: SQLite 存储
//! - Queue: 同步任务内存队列
//! - Worker: SyncWorker 后台素材同步
//! - Adapters: WeChat 素材接口客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
