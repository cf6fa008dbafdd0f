//! Plot Analysis HTTP Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::AnalyzePlot;
use crate::domain::analysis::PlotAnalysis;
use crate::infrastructure::http::dto::PlotAnalysisRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 情节分析
pub async fn plot_analysis(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlotAnalysisRequest>, JsonRejection>,
) -> Result<Json<PlotAnalysis>, ApiError> {
    let Json(req) = payload?;
    let analysis = state
        .analyze_plot_handler
        .handle(AnalyzePlot { story: req.story })
        .await?;
    Ok(Json(analysis))
}
