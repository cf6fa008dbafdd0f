//! HTTP Middleware
//!
//! 请求日志：记录耗时，失败请求附带路径中的 story_id / branch_id

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

/// 路径中携带的故事与分支 ID
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RouteIds<'a> {
    pub story_id: Option<&'a str>,
    pub branch_id: Option<&'a str>,
}

/// 从 `/api/story-progress/:story_id` 与 `/api/{preview,validate}-branch/:story_id/:branch_id`
/// 中取出 ID，其余路径返回空
pub fn route_ids(path: &str) -> RouteIds<'_> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["api", "story-progress", story_id] => RouteIds {
            story_id: Some(*story_id),
            branch_id: None,
        },
        ["api", "preview-branch" | "validate-branch", story_id, branch_id] => RouteIds {
            story_id: Some(*story_id),
            branch_id: Some(*branch_id),
        },
        _ => RouteIds::default(),
    }
}

/// 请求日志中间件
///
/// 4xx 记 warn，5xx 记 error，其余记 debug。错误原因在 ApiError::into_response() 中记录，
/// 这里补充路由上下文与耗时。
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    let ids = route_ids(&path);
    let story_id = ids.story_id.unwrap_or_default();
    let branch_id = ids.branch_id.unwrap_or_default();

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, story_id, branch_id, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, latency_ms, story_id, branch_id, "Request rejected");
    } else {
        tracing::debug!(%method, %path, status, latency_ms, "Request completed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeTextGenerator, HttpTranscriber, HttpTranscriberConfig};
    use crate::infrastructure::http::{create_routes, AppState};
    use crate::infrastructure::memory::{InMemoryBranchRegistry, InMemoryStoryStore};
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn app(generator: FakeTextGenerator) -> Router {
        let state = AppState::new(
            Arc::new(generator),
            Arc::new(InMemoryStoryStore::new()),
            Arc::new(InMemoryBranchRegistry::new()),
            Arc::new(HttpTranscriber::new(HttpTranscriberConfig::default()).unwrap()),
        );
        create_routes()
            .layer(axum::middleware::from_fn(request_logging_middleware))
            .with_state(Arc::new(state))
    }

    #[test]
    fn test_route_ids() {
        assert_eq!(
            route_ids("/api/preview-branch/s1/b7"),
            RouteIds {
                story_id: Some("s1"),
                branch_id: Some("b7"),
            }
        );
        assert_eq!(route_ids("/api/validate-branch/s1/b7").branch_id, Some("b7"));
        assert_eq!(
            route_ids("/api/story-progress/s1"),
            RouteIds {
                story_id: Some("s1"),
                branch_id: None,
            }
        );
        assert_eq!(route_ids("/api/generate-story"), RouteIds::default());
        assert_eq!(route_ids("/"), RouteIds::default());
    }

    #[tokio::test]
    async fn test_unknown_branch_passes_through() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/preview-branch/s1/missing")
            .body(Body::empty())
            .unwrap();

        let response = app(FakeTextGenerator::fixed("unused")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["detail"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn test_generation_failure_passes_through() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/plot-analysis")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"story": "Once."}"#))
            .unwrap();

        let response = app(FakeTextGenerator::failing("down")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let request = HttpRequest::builder()
            .uri("/api/story-progress/s1")
            .body(Body::empty())
            .unwrap();

        let response = app(FakeTextGenerator::fixed("unused")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
