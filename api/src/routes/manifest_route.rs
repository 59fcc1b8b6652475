use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use tracing::instrument;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
};

/// Passes the remote tool manifest through unchanged.
#[instrument(name = "manifest_route", skip(state))]
pub async fn manifest_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let manifest = state.client.manifest().await?;
    Ok(ApiResponse::success(manifest).into_response_with_status(StatusCode::OK))
}
