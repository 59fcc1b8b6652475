use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use chrono::{SecondsFormat, Utc};
use tracing::instrument;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::health::health_response::HealthResponse,
};

/// Local liveness plus a probe of the remote valuation service.
///
/// Always answers 200: this process is alive even when the remote is not.
#[instrument(name = "health_route", skip(state))]
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let remote = state.client.health().await;

    ApiResponse::success(HealthResponse {
        status: if remote.ok { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
        checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        remote,
    })
    .into_response_with_status(StatusCode::OK)
}
