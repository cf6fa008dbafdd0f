//! Story HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GenerateChapter, GetStoryProgress, ListStories};
use crate::infrastructure::http::dto::{
    GenerateStoryRequest, StoryOverviewResponse, StoryProgressResponse, StoryResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成下一章
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateStoryRequest>, JsonRejection>,
) -> Result<Json<StoryResponse>, ApiError> {
    let Json(req) = payload?;
    let (story_id, params) = req.into_parts();

    let result = state
        .generate_chapter_handler
        .handle(GenerateChapter { story_id, params })
        .await?;

    Ok(Json(result.into()))
}

/// 故事进度
pub async fn story_progress(
    State(state): State<Arc<AppState>>,
    Path(story_id): Path<String>,
) -> Result<Json<StoryProgressResponse>, ApiError> {
    let progress = state
        .story_progress_handler
        .handle(GetStoryProgress { story_id })
        .await?;

    Ok(Json(progress.into()))
}

/// 列出所有故事
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoryOverviewResponse>>, ApiError> {
    let stories = state.list_stories_handler.handle(ListStories).await?;
    Ok(Json(stories.into_iter().map(Into::into).collect()))
}
