//! Remote health snapshot.
//!
//! [`RemoteHealth`] is JSON-serializable and suitable for a `/health`
//! endpoint. Producing it never fails: transport errors, timeouts and
//! non-2xx answers are reported as `ok = false` with a short message.

use serde::Serialize;
use serde_json::Value;

/// Health of the remote valuation service as seen from this process.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteHealth {
    /// Probed URL.
    pub endpoint: String,
    pub ok: bool,
    /// Measured round-trip latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message.
    pub message: String,
    /// Body returned by the remote, when it was JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RemoteHealth {
    #[inline]
    pub(crate) fn ok(endpoint: &str, latency_ms: u128, details: Value) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ok: true,
            latency_ms,
            message: "remote service is reachable".to_string(),
            details: Some(details),
        }
    }

    #[inline]
    pub(crate) fn fail(endpoint: &str, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ok: false,
            latency_ms,
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_snapshot_omits_details() {
        let h = RemoteHealth::fail("http://svc/health", 12, "timeout");
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["ok"], false);
        assert!(v.get("details").is_none());
    }

    #[test]
    fn ok_snapshot_carries_details() {
        let h = RemoteHealth::ok("http://svc/health", 3, json!({"status": "healthy"}));
        assert!(h.ok);
        assert_eq!(h.details, Some(json!({"status": "healthy"})));
    }
}
