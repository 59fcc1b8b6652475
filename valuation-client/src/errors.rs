//! Crate-wide error hierarchy for valuation-client.
//!
//! Every failure of an analysis request ends up as one [`ValuationError`].
//! Variants stay distinguishable so callers can pick different user
//! messages; [`ValuationError::user_message`] provides the default wording
//! and never includes raw remote bodies.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use valuation_normalizer::NormalizeError;

/// Convenient alias for crate-wide results.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Root error type for the valuation-client crate.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Input is neither `owner/repo` nor a GitHub URL.
    #[error("invalid repository format: '{input}'")]
    InvalidRepositoryFormat { input: String },

    /// Transport failure without an HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// A single remote call exceeded its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The remote answered with a non-success status.
    ///
    /// `body` is kept for diagnostics only and is not part of `Display`.
    #[error("remote service returned HTTP {status} for {url}")]
    RemoteService {
        status: u16,
        url: String,
        body: String,
    },

    /// Envelope or payload could not be decoded.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Every legacy endpoint candidate failed.
    #[error("all legacy endpoints failed: {}", describe_failures(.0))]
    ProbeExhausted(Vec<ProbeFailure>),

    /// Invalid configuration (base URL, timeout, protocol).
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ValuationError {
    /// Stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ValuationError::InvalidRepositoryFormat { .. } => "INVALID_REPOSITORY_FORMAT",
            ValuationError::Network(_) => "NETWORK_ERROR",
            ValuationError::Timeout(_) => "TIMEOUT",
            ValuationError::RemoteService { .. } => "REMOTE_SERVICE_ERROR",
            ValuationError::Normalize(NormalizeError::EnvelopeParse(_)) => "ENVELOPE_PARSE_ERROR",
            ValuationError::Normalize(NormalizeError::MalformedResponse(_)) => {
                "MALFORMED_RESPONSE"
            }
            ValuationError::ProbeExhausted(_) => "PROBE_EXHAUSTED",
            ValuationError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Message safe to show to an end user.
    pub fn user_message(&self) -> String {
        match self {
            ValuationError::InvalidRepositoryFormat { .. } => "Invalid repository format. \
                Please use 'owner/repo' format (e.g., 'facebook/react') or a GitHub URL."
                .to_string(),
            ValuationError::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            ValuationError::Timeout(_) => "Request timed out. Please try again.".to_string(),
            ValuationError::RemoteService { status, .. } => format!(
                "Failed to analyze repository ({status}). \
                 Please check the repository name and try again."
            ),
            ValuationError::Normalize(_) => "Failed to parse analysis data.".to_string(),
            ValuationError::ProbeExhausted(_) => {
                "Failed to analyze repository. No valuation endpoint responded successfully."
                    .to_string()
            }
            ValuationError::Config(_) => {
                "The valuation service is not configured correctly.".to_string()
            }
        }
    }
}

/// The last failure observed for one legacy endpoint candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    /// `"<METHOD> <path>"`, e.g. `"POST /api/analyze"`.
    pub endpoint: String,
    pub reason: String,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.endpoint, self.reason)
    }
}

fn describe_failures(failures: &[ProbeFailure]) -> String {
    failures
        .iter()
        .map(ProbeFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration errors, raised at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value had the wrong format (e.g., invalid URL).
    #[error("invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// A number failed to parse or was out of range.
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Unknown value for `VALUATION_PROTOCOL`.
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),
}

/// Maps a `reqwest` failure to the crate error.
///
/// `timeout` is the deadline the caller applied, reported back on timeouts.
pub(crate) fn transport_error(e: reqwest::Error, timeout: Duration) -> ValuationError {
    if e.is_timeout() {
        return ValuationError::Timeout(timeout);
    }
    ValuationError::Network(e.to_string())
}

/// Trims a response body to a short single-line snippet for logs.
pub(crate) fn make_snippet(body: &str) -> String {
    const MAX: usize = 300;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX {
        return flat;
    }
    let cut: String = flat.chars().take(MAX).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_hides_body() {
        let err = ValuationError::RemoteService {
            status: 502,
            url: "https://svc/mcp/invoke".into(),
            body: "Traceback (most recent call last): secret internals".into(),
        };
        assert!(!err.user_message().contains("Traceback"));
        assert!(!err.to_string().contains("Traceback"));
        assert!(err.user_message().contains("502"));
        assert_eq!(err.code(), "REMOTE_SERVICE_ERROR");
    }

    #[test]
    fn normalize_errors_keep_their_codes() {
        let env: ValuationError = NormalizeError::EnvelopeParse("x".into()).into();
        let bad: ValuationError = NormalizeError::MalformedResponse("x".into()).into();
        assert_eq!(env.code(), "ENVELOPE_PARSE_ERROR");
        assert_eq!(bad.code(), "MALFORMED_RESPONSE");
        assert_eq!(env.user_message(), "Failed to parse analysis data.");
    }

    #[test]
    fn probe_exhausted_lists_each_endpoint() {
        let err = ValuationError::ProbeExhausted(vec![
            ProbeFailure {
                endpoint: "POST /api/analyze".into(),
                reason: "HTTP 404".into(),
            },
            ProbeFailure {
                endpoint: "GET /analyze/a/b".into(),
                reason: "timeout".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("POST /api/analyze (HTTP 404)"));
        assert!(text.contains("GET /analyze/a/b (timeout)"));
    }

    #[test]
    fn snippets_are_flattened_and_truncated() {
        assert_eq!(make_snippet("a\n  b\tc"), "a b c");
        let long = "x".repeat(400);
        let s = make_snippet(&long);
        assert_eq!(s.chars().count(), 301);
        assert!(s.ends_with('…'));
    }
}
