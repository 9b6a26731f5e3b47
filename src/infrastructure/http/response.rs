//! Response Envelope - 统一响应结构
//!
//! 所有 API 出口都包在同一个信封里:
//! `{ "status": "<code>", "message", "data", "timestamp", "path"?, "errors"? }`
//!
//! 状态码收敛规则（历史契约，调用方已依赖，保持原样）:
//! - 成功响应的状态码超出 [200, 299] 时静默回落到 200
//! - 错误响应的状态码超出 [100, 599] 时回落到 500
//! - 错误响应误用 2xx 时改写为 400
//! - no_content 固定 204 且信封仍带 body（不含 data 键）

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::pagination::Pagination;

/// 统一响应信封
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    #[serde(skip)]
    http_status: StatusCode,
    /// HTTP 状态码的字符串形式
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    /// Unix 秒
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

impl ApiResponse {
    fn build(http_status: StatusCode, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            http_status,
            status: http_status.as_u16().to_string(),
            message: message.into(),
            data,
            timestamp: Utc::now().timestamp(),
            path: None,
            errors: None,
        }
    }

    // ------------------------------------------------------------------
    // 成功响应
    // ------------------------------------------------------------------

    /// 200 成功
    pub fn success<T: Serialize>(data: &T) -> Self {
        Self::success_with_status(data, 200)
    }

    /// 指定状态码的成功响应，超出 2xx 范围时静默回落 200
    pub fn success_with_status<T: Serialize>(data: &T, status: u16) -> Self {
        let status = coerce_success_status(status);
        Self::build(status, "success", Some(normalize(data)))
    }

    /// 200 成功，data 为 null
    pub fn ok() -> Self {
        Self::build(StatusCode::OK, "success", Some(Value::Null))
    }

    /// 201 已创建
    pub fn created<T: Serialize>(data: &T) -> Self {
        Self::success_with_status(data, 201)
    }

    /// 202 已受理（异步处理）
    pub fn accepted<T: Serialize>(data: &T) -> Self {
        Self::success_with_status(data, 202)
    }

    /// 204 无内容
    ///
    /// 信封仍输出 status/message/timestamp，只是没有 data 键
    pub fn no_content() -> Self {
        Self::build(StatusCode::NO_CONTENT, "success", None)
    }

    /// 分页成功响应，data = { items, pagination }
    pub fn paginated<T: Serialize>(items: &[T], pager: &Pagination) -> Self {
        let data = json!({
            "items": normalize_each(items),
            "pagination": pager.meta(),
        });
        Self::build(StatusCode::OK, "success", Some(data))
    }

    /// 带导航链接的分页成功响应，data = { items, pagination, links }
    ///
    /// first/prev/next/last 的 URL 由调用方的 `url_for` 生成
    pub fn paginated_with_links<T, F>(items: &[T], pager: &Pagination, url_for: F) -> Self
    where
        T: Serialize,
        F: Fn(u64) -> String,
    {
        let data = json!({
            "items": normalize_each(items),
            "pagination": pager.meta(),
            "links": pager.links(url_for),
        });
        Self::build(StatusCode::OK, "success", Some(data))
    }

    // ------------------------------------------------------------------
    // 错误响应
    // ------------------------------------------------------------------

    /// 错误响应，状态码按收敛规则修正
    pub fn error(message: impl Into<String>, status: u16) -> Self {
        let status = coerce_error_status(status);
        Self::build(status, message, Some(Value::Null))
    }

    /// 带字段错误明细的错误响应
    pub fn error_with_details(
        message: impl Into<String>,
        status: u16,
        details: BTreeMap<String, String>,
    ) -> Self {
        let mut response = Self::error(message, status);
        response.errors = Some(details);
        response
    }

    /// 400 请求有误
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(message, 400)
    }

    /// 401 未认证
    pub fn unauthorized() -> Self {
        Self::error("Unauthorized", 401)
    }

    /// 403 无权限
    pub fn forbidden() -> Self {
        Self::error("Forbidden", 403)
    }

    /// 404 不存在
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(message, 404)
    }

    /// 422 校验失败
    pub fn validation_error(details: BTreeMap<String, String>) -> Self {
        Self::error_with_details("Validation failed", 422, details)
    }

    /// 500 内部错误
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::error(message, 500)
    }

    // ------------------------------------------------------------------
    // 补充字段
    // ------------------------------------------------------------------

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    // ------------------------------------------------------------------
    // 读取
    // ------------------------------------------------------------------

    pub fn status_code(&self) -> StatusCode {
        self.http_status
    }

    pub fn status_str(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        self.errors.as_ref()
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.http_status, Json(&self)).into_response()
    }
}

/// 成功状态码收敛: 非 2xx 一律回落 200
fn coerce_success_status(status: u16) -> StatusCode {
    let status = if (200..=299).contains(&status) {
        status
    } else {
        200
    };
    StatusCode::from_u16(status).unwrap_or(StatusCode::OK)
}

/// 错误状态码收敛: 超出 [100,599] 回落 500，误用 2xx 改写 400
fn coerce_error_status(status: u16) -> StatusCode {
    let status = if !(100..=599).contains(&status) {
        500
    } else if (200..=299).contains(&status) {
        400
    } else {
        status
    };
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

// ----------------------------------------------------------------------
// 数据归一化
// ----------------------------------------------------------------------

/// 序列化为 JSON 值，失败时降级为 `{error}`，绝不向外抛
pub fn normalize<T: Serialize>(data: &T) -> Value {
    match serde_json::to_value(data) {
        Ok(value) => value,
        Err(err) => degraded(None, &err),
    }
}

/// 逐元素归一化，单个元素失败只影响该元素
pub fn normalize_each<T: Serialize>(items: &[T]) -> Value {
    Value::Array(items.iter().map(normalize).collect())
}

/// 带标识的归一化，失败时降级为 `{id, error}`
pub fn normalize_identified<T: Serialize, I: Serialize>(data: &T, id: &I) -> Value {
    match serde_json::to_value(data) {
        Ok(value) => value,
        Err(err) => degraded(serde_json::to_value(id).ok(), &err),
    }
}

fn degraded(id: Option<Value>, err: &serde_json::Error) -> Value {
    match id {
        Some(id) => json!({ "id": id, "error": err.to_string() }),
        None => json!({ "error": err.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::to_value;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Sample {
        id: i64,
        title: String,
    }

    fn sample() -> Sample {
        Sample {
            id: 1,
            title: "头条".to_string(),
        }
    }

    /// 非字符串键的 Map 序列化必然失败，用来验证降级路径
    fn unserializable() -> HashMap<(u8, u8), &'static str> {
        let mut map = HashMap::new();
        map.insert((1, 2), "x");
        map
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = to_value(ApiResponse::success(&sample())).unwrap();
        assert_eq!(body["status"], "200");
        assert_eq!(body["message"], "success");
        assert_eq!(body["data"]["title"], "头条");
        assert!(body["timestamp"].is_i64());
        assert!(body.get("path").is_none());
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn test_success_out_of_range_coerced_to_200() {
        let response = ApiResponse::success_with_status(&sample(), 350);
        assert_eq!(response.status_str(), "200");
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = ApiResponse::success_with_status(&sample(), 500);
        assert_eq!(response.status_str(), "200");
    }

    #[test]
    fn test_error_success_code_coerced_to_400() {
        let response = ApiResponse::error("x", 250);
        assert_eq!(response.status_str(), "400");
    }

    #[test]
    fn test_error_out_of_range_coerced_to_500() {
        assert_eq!(ApiResponse::error("x", 700).status_str(), "500");
        assert_eq!(ApiResponse::error("x", 99).status_str(), "500");
        assert_eq!(ApiResponse::error("x", 0).status_str(), "500");
    }

    #[test]
    fn test_error_keeps_valid_code() {
        assert_eq!(ApiResponse::error("x", 404).status_str(), "404");
        assert_eq!(ApiResponse::error("x", 422).status_str(), "422");
    }

    #[test]
    fn test_errors_key_only_with_details() {
        let body = to_value(ApiResponse::bad_request("bad")).unwrap();
        assert!(body.get("errors").is_none());

        let mut details = BTreeMap::new();
        details.insert("title".to_string(), "标题不能为空".to_string());
        let body = to_value(ApiResponse::validation_error(details)).unwrap();
        assert_eq!(body["status"], "422");
        assert_eq!(body["errors"]["title"], "标题不能为空");
    }

    #[test]
    fn test_no_content_keeps_envelope_without_data() {
        let response = ApiResponse::no_content();
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
        let body = to_value(response).unwrap();
        assert_eq!(body["status"], "204");
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].is_i64());
    }

    #[test]
    fn test_named_shortcuts() {
        assert_eq!(ApiResponse::created(&sample()).status_str(), "201");
        assert_eq!(ApiResponse::accepted(&sample()).status_str(), "202");
        assert_eq!(ApiResponse::bad_request("x").status_str(), "400");
        assert_eq!(ApiResponse::unauthorized().status_str(), "401");
        assert_eq!(ApiResponse::forbidden().status_str(), "403");
        assert_eq!(ApiResponse::not_found("x").status_str(), "404");
        assert_eq!(ApiResponse::internal_server_error("x").status_str(), "500");
    }

    #[test]
    fn test_with_path() {
        let body = to_value(ApiResponse::ok().with_path("/api/articles")).unwrap();
        assert_eq!(body["path"], "/api/articles");
    }

    #[test]
    fn test_paginated_shape() {
        let pager = Pagination::compute(2, 20, 45);
        let items = vec![sample(), sample()];
        let body = to_value(ApiResponse::paginated(&items, &pager)).unwrap();
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["pagination"]["current_page"], 2);
        assert_eq!(body["data"]["pagination"]["total"], 45);
        assert_eq!(body["data"]["pagination"]["last_page"], 3);
    }

    #[test]
    fn test_paginated_with_links_shape() {
        let pager = Pagination::compute(2, 20, 45);
        let items = vec![sample()];
        let body = to_value(ApiResponse::paginated_with_links(&items, &pager, |page| {
            format!("/api/articles?page={}", page)
        }))
        .unwrap();
        assert_eq!(body["data"]["links"]["prev"], "/api/articles?page=1");
        assert_eq!(body["data"]["links"]["next"], "/api/articles?page=3");
        assert_eq!(body["data"]["links"]["first"], "/api/articles?page=1");
        assert_eq!(body["data"]["links"]["last"], "/api/articles?page=3");
    }

    #[test]
    fn test_normalize_degrades_instead_of_failing() {
        let value = normalize(&unserializable());
        assert!(value.get("error").is_some());
    }

    #[test]
    fn test_normalize_identified_keeps_id() {
        let value = normalize_identified(&unserializable(), &42);
        assert_eq!(value["id"], 42);
        assert!(value.get("error").is_some());
    }

    #[test]
    fn test_normalize_each_isolates_bad_elements() {
        let items = vec![unserializable()];
        let value = normalize_each(&items);
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert!(array[0].get("error").is_some());
    }
}
