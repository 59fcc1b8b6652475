use std::time::Instant;

use valuation_client::{ValuationClient, ValuationConfig};

use crate::error_handler::AppResult;

/// Listener address used when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";

/// Shared state for all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client for the remote valuation service (pooled connections).
    pub client: ValuationClient,
    /// Process start, reported as uptime by `/health`.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(client: ValuationClient) -> Self {
        Self {
            client,
            started_at: Instant::now(),
        }
    }

    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Invalid `VALUATION_*` values surface as a configuration error.
    pub fn from_env() -> AppResult<Self> {
        let cfg = ValuationConfig::from_env()?;
        Ok(Self::new(ValuationClient::new(cfg)?))
    }
}

/// Listener address from `API_ADDRESS`, falling back to [`DEFAULT_API_ADDRESS`].
pub fn api_address() -> String {
    std::env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string())
}
