//! Legacy probing of older flat endpoints.
//!
//! Candidates are tried one after another; the first 2xx answer wins and the
//! rest are never contacted. A 2xx body that is not JSON ends the probe with
//! `MalformedResponse` instead of moving on.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{ProbeFailure, ValuationError, ValuationResult};
use crate::protocols::transport::Transport;
use crate::protocols::types::ProbeCandidate;
use crate::repo_ref::RepositoryReference;

pub async fn fetch(transport: &Transport, repo: &RepositoryReference) -> ValuationResult<Value> {
    let candidates = ProbeCandidate::ordered_for(repo);
    let mut failures = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let endpoint = candidate.label();
        debug!(%endpoint, "probing legacy endpoint");

        match transport
            .send(candidate.method, &candidate.path, candidate.body.as_ref())
            .await
        {
            Ok(value) => {
                info!(%endpoint, attempts = failures.len() + 1, "legacy endpoint answered");
                return Ok(value);
            }
            Err(e @ ValuationError::Normalize(_)) => {
                warn!(%endpoint, error = %e, "legacy endpoint answered 2xx with an unusable body");
                return Err(e);
            }
            Err(e) => {
                warn!(%endpoint, error = %e, "legacy endpoint failed");
                failures.push(ProbeFailure {
                    endpoint,
                    reason: failure_reason(&e),
                });
            }
        }
    }

    Err(ValuationError::ProbeExhausted(failures))
}

fn failure_reason(e: &ValuationError) -> String {
    match e {
        ValuationError::RemoteService { status, .. } => format!("HTTP {status}"),
        ValuationError::Timeout(_) => "timeout".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn reasons_are_short() {
        let remote = ValuationError::RemoteService {
            status: 404,
            url: "http://x/api/analyze".into(),
            body: "<html>not found</html>".into(),
        };
        assert_eq!(failure_reason(&remote), "HTTP 404");
        assert_eq!(
            failure_reason(&ValuationError::Timeout(Duration::from_secs(1))),
            "timeout"
        );
        assert_eq!(
            failure_reason(&ValuationError::Network("connection refused".into())),
            "network error: connection refused"
        );
    }
}
