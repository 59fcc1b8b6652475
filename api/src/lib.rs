use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::{AppState, api_address},
    error_handler::{AppError, AppResult},
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        analyze::analyze_route::analyze_route, health::health_route::health_route,
        manifest_route::manifest_route,
    },
};

/// Builds the router over an already constructed state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_route))
        .route("/health", get(health_route))
        .route("/manifest", get(manifest_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(Arc::new(state))
}

/// Loads configuration from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = AppState::from_env()?;
    let addr = api_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(%addr, base_url = %state.client.base_url(), "api listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
