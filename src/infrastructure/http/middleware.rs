//! HTTP Middleware
//!
//! - CORS: 单一策略表（来源列表 / 方法 / 头 / max-age），只作用于 API 前缀。
//!   OPTIONS 预检在这里短路返回 200，不进入正常路由。
//! - 错误日志: 4xx 记 warn，5xx 记 error。

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};

/// 允许的跨域方法，固定列表
const ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";

/// 允许的跨域请求头，含请求追踪头
const ALLOWED_HEADERS: &str = "Content-Type,Authorization,Accept,X-Request-Id";

/// CORS 策略表
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// 受保护的路由前缀，前缀之外不做任何处理
    pub api_prefix: String,
    /// 允许的来源；包含 "*" 表示任意来源
    pub allowed_origins: Vec<String>,
    /// 预检结果缓存时长（秒）
    pub max_age_secs: u64,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            allowed_origins: vec!["*".to_string()],
            max_age_secs: 3600,
        }
    }
}

impl CorsPolicy {
    /// 计算 Allow-Origin 的值：来源在列表中则回显，
    /// 否则列表含 "*" 时给通配，都不满足时不输出该头
    fn origin_value(&self, request_origin: Option<&str>) -> Option<String> {
        if let Some(origin) = request_origin {
            if self.allowed_origins.iter().any(|o| o == origin) {
                return Some(origin.to_string());
            }
        }
        if self.allowed_origins.iter().any(|o| o == "*") {
            return Some("*".to_string());
        }
        None
    }
}

fn apply_cors_headers(headers: &mut HeaderMap, policy: &CorsPolicy, origin: Option<&str>) {
    if let Some(value) = policy
        .origin_value(origin)
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    if let Ok(value) = HeaderValue::from_str(&policy.max_age_secs.to_string()) {
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("false"),
    );
}

/// CORS 中间件
///
/// API 前缀下的 OPTIONS 请求直接短路 200；
/// 其余 API 响应统一补跨域头；前缀外的路径原样放行
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(&policy.api_prefix) {
        return next.run(request).await;
    }

    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_cors_headers(response.headers_mut(), &policy, origin.as_deref());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut(), &policy, origin.as_deref());
    response
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，状态码为 4xx 或 5xx 时记录日志。
/// 业务错误文案在 ApiError::into_response() 中已单独记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}
