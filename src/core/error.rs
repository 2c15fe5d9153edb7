//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 核心错误类型
///
/// 页面以已序列化的 JSON 携带，核心层不依赖具体的应用视图。
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    /// 未匹配任何路由，携带 404 页面
    PageNotFound(serde_json::Value),
    /// 表单校验失败，携带带有字段错误的表单页面
    Validation(serde_json::Value),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<serde_json::Value>,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message, page) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            CoreError::PageNotFound(page) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "页面不存在".to_string(),
                Some(page),
            ),
            CoreError::Validation(page) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                "表单校验失败，请修正标出的字段".to_string(),
                Some(page),
            ),
            CoreError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                msg,
                None,
            ),
        };

        let error_response = ErrorResponse {
            success: false,
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            page,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_of(error: CoreError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_carries_page() {
        let page = json!({"view": "creating", "errors": {"name": "obrigatório"}});
        let (status, body) = body_of(CoreError::Validation(page.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_FAILED");
        assert_eq!(body["code"], 422);
        assert_eq!(body["page"], page);
    }

    #[tokio::test]
    async fn test_plain_errors_have_no_page() {
        let (status, body) = body_of(CoreError::NotFound("商品 x 不存在".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "商品 x 不存在");
        assert!(body.get("page").is_none());

        let (status, _) = body_of(CoreError::BadRequest("bad".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
