use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::analyze::analyze_request::AnalyzeRequest,
};

/// HTTP endpoint running one repository valuation.
///
/// Responds with the normalized `AnalysisResult` in the `data` field, or an
/// error envelope whose status reflects where the pipeline failed.
#[instrument(
    name = "analyze_route",
    skip(state, body),
    fields(
        repository = %body.repository,
        deep = body.include_deep_analysis,
        protocol = %state.client.protocol_for(body.include_deep_analysis)
    )
)]
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> AppResult<Response> {
    let result = state
        .client
        .analyze(&body.repository, body.include_deep_analysis)
        .await?;

    info!(score = result.score, status = %result.status, "analysis served");

    Ok(ApiResponse::success(result).into_response_with_status(StatusCode::OK))
}
