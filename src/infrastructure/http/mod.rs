//! HTTP Layer - RESTful API
//!
//! 请求/响应契约层：分页、排序、DTO 校验、统一信封、异常映射、CORS

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod server;
pub mod sort;
pub mod state;

pub use error::{install_debug_mode, ApiError, ApiJson};
pub use middleware::CorsPolicy;
pub use pagination::{PageLinks, PageMeta, Pagination};
pub use response::ApiResponse;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use sort::{SortDirection, SortSpec};
pub use state::AppState;
