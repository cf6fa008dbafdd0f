//! HTTP Routes
//!
//! API Endpoints:
//! - /                                           GET   存活检查
//! - /api/ping                                   GET   版本
//! - /api/health                                 GET   文本模型健康检查
//! - /api/generate-story                         POST  生成下一章
//! - /api/story-progress/:story_id               GET   故事进度
//! - /api/stories                                GET   列出所有故事
//! - /api/plot-analysis                          POST  情节分析
//! - /api/generate-branch                        POST  生成替代分支
//! - /api/preview-branch/:story_id/:branch_id    POST  预览分支
//! - /api/validate-branch/:story_id/:branch_id   POST  校验分支
//! - /api/speech-to-text                         POST  语音转文字（multipart）
//! - /api/speech-story-input                     POST  语音描述生成下一章（multipart）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .merge(story_routes())
        .merge(branch_routes())
        .merge(speech_routes())
}

/// Story 路由
fn story_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-story", post(handlers::generate_story))
        .route("/story-progress/:story_id", get(handlers::story_progress))
        .route("/stories", get(handlers::list_stories))
        .route("/plot-analysis", post(handlers::plot_analysis))
}

/// Branch 路由
fn branch_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-branch", post(handlers::generate_branch))
        .route("/preview-branch/:story_id/:branch_id", post(handlers::preview_branch))
        .route("/validate-branch/:story_id/:branch_id", post(handlers::validate_branch))
}

/// Speech 路由
fn speech_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/speech-to-text", post(handlers::speech_to_text))
        .route("/speech-story-input", post(handlers::speech_story_input))
}
