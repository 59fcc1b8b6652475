use serde::Serialize;
use valuation_client::RemoteHealth;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the remote answered, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    /// RFC3339 UTC time of this check.
    pub checked_at: String,
    pub remote: RemoteHealth,
}
