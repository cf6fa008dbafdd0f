//! Root & Ping Handlers
//!
//! 存活与健康检查

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::RootResponse;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// 根路径
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        message: "Story Generator API is running",
    })
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub text_model: bool,
}

/// 健康检查：探测文本模型服务
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let text_model = state.text_generator.health_check().await;
    Json(HealthResponse {
        status: if text_model { "ok" } else { "degraded" },
        text_model,
    })
}
