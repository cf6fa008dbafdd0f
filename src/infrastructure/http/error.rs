//! HTTP Error Handling
//!
//! 错误响应体统一为 `{"detail": "..."}`，状态码使用真实的 HTTP 状态

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    PayloadTooLarge(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(status = 404, error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = 400, error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(status = 413, error = %msg, "Payload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = 500, error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(status = 503, error = %msg, "Service unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::TranscriptionUnintelligible => ApiError::BadRequest(e.to_string()),
            ApplicationError::TranscriptionUnavailable(_) => ApiError::ServiceUnavailable(e.to_string()),
            ApplicationError::GenerationFailed(_) => ApiError::Internal(e.to_string()),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    /// 请求体读取失败：超出大小限制为 413，其余为 400
    pub fn from_body_error(status: StatusCode, msg: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(msg)
        } else {
            ApiError::BadRequest(msg)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::from_body_error(rejection.status(), rejection.body_text())
    }
}
