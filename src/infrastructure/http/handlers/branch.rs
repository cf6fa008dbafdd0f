//! Branch HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{ApplicationError, GenerateBranches, PreviewBranch, ValidateBranch};
use crate::domain::branch::{AlternativeBranch, BranchPreview, ValidationResult};
use crate::infrastructure::http::dto::GenerateBranchRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成替代分支（最多 3 个）
pub async fn generate_branch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateBranchRequest>, JsonRejection>,
) -> Result<Json<Vec<AlternativeBranch>>, ApiError> {
    let Json(req) = payload?;
    let chapter_id = req.chapter_id();

    let preserved_elements = req
        .preserved_elements
        .into_iter()
        .map(|e| e.into_domain())
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApplicationError::from)?;

    let branches = state
        .generate_branches_handler
        .handle(GenerateBranches {
            story_id: req.story_id,
            chapter_id,
            chapter_content: req.chapter_content,
            story_context: req.story_context,
            preserved_elements,
        })
        .await?;

    Ok(Json(branches))
}

/// 预览分支
pub async fn preview_branch(
    State(state): State<Arc<AppState>>,
    Path((story_id, branch_id)): Path<(String, String)>,
) -> Result<Json<BranchPreview>, ApiError> {
    let preview = state
        .preview_branch_handler
        .handle(PreviewBranch { story_id, branch_id })
        .await?;
    Ok(Json(preview))
}

/// 校验分支连续性
pub async fn validate_branch(
    State(state): State<Arc<AppState>>,
    Path((story_id, branch_id)): Path<(String, String)>,
) -> Result<Json<ValidationResult>, ApiError> {
    let result = state
        .validate_branch_handler
        .handle(ValidateBranch { story_id, branch_id })
        .await?;
    Ok(Json(result))
}
