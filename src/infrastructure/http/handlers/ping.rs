//! Ping Handler
//!
//! 健康检查端点

use serde::Serialize;

use crate::infrastructure::http::response::ApiResponse;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping() -> ApiResponse {
    ApiResponse::success(&PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
