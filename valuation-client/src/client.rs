//! `ValuationClient`: the single entry point callers use.
//!
//! A request runs parse -> select -> fetch -> normalize and is all-or-nothing:
//! any failing step aborts it and nothing partial is returned.

use std::time::Instant;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};
use valuation_normalizer::{AnalysisResult, normalize};

use crate::config::ValuationConfig;
use crate::errors::{ValuationResult, transport_error};
use crate::health::RemoteHealth;
use crate::protocols::transport::Transport;
use crate::protocols::types::{HEALTH_PATH, MANIFEST_PATH};
use crate::protocols::{Protocol, agent, legacy_probe, two_call};
use crate::repo_ref::RepositoryReference;

/// Client for the remote valuation service; cheap to clone.
#[derive(Debug, Clone)]
pub struct ValuationClient {
    transport: Transport,
    protocol_override: Option<Protocol>,
}

impl ValuationClient {
    /// Builds a client with a reusable HTTP connection pool.
    ///
    /// # Errors
    /// - [`crate::ValuationError::Config`] if the config is invalid;
    /// - [`crate::ValuationError::Network`] if the HTTP client cannot be built.
    pub fn new(cfg: ValuationConfig) -> ValuationResult<Self> {
        cfg.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("unicorn-hunter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| transport_error(e, cfg.timeout))?;

        info!(
            base_url = %cfg.base_url,
            timeout_secs = cfg.timeout.as_secs(),
            protocol_override = ?cfg.protocol_override,
            "ValuationClient initialized"
        );

        Ok(Self {
            transport: Transport::new(http, &cfg.base_url, cfg.timeout),
            protocol_override: cfg.protocol_override,
        })
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Protocol that would serve a request with the given flag.
    pub fn protocol_for(&self, include_deep_analysis: bool) -> Protocol {
        Protocol::select(include_deep_analysis, self.protocol_override)
    }

    /// Parses `input`, fetches the raw payload and normalizes it.
    ///
    /// # Errors
    /// Any [`crate::ValuationError`]; the first failing step wins.
    pub async fn analyze(
        &self,
        input: &str,
        include_deep_analysis: bool,
    ) -> ValuationResult<AnalysisResult> {
        let repo = RepositoryReference::parse(input)?;
        let protocol = self.protocol_for(include_deep_analysis);
        let started = Instant::now();

        info!(
            owner = repo.owner(),
            repo = repo.repo(),
            %protocol,
            include_deep_analysis,
            "analysis started"
        );

        let raw = self.fetch_raw(&repo, protocol).await?;
        let result = normalize(&raw)?;

        info!(
            owner = repo.owner(),
            repo = repo.repo(),
            %protocol,
            score = result.score,
            status = %result.status,
            latency_ms = started.elapsed().as_millis(),
            "analysis completed"
        );
        Ok(result)
    }

    /// Fetches the raw payload for `repo` using `protocol`, without normalizing.
    pub async fn fetch_raw(
        &self,
        repo: &RepositoryReference,
        protocol: Protocol,
    ) -> ValuationResult<Value> {
        debug!(owner = repo.owner(), repo = repo.repo(), %protocol, "fetching raw payload");
        match protocol {
            Protocol::AgentMode => agent::fetch(&self.transport, repo).await,
            Protocol::TwoCallMode => two_call::fetch(&self.transport, repo).await,
            Protocol::LegacyProbe => legacy_probe::fetch(&self.transport, repo).await,
        }
    }

    /// Probes `GET /health` on the remote. Never fails.
    pub async fn health(&self) -> RemoteHealth {
        let endpoint = self.transport.url(HEALTH_PATH);
        let started = Instant::now();

        let result = self
            .transport
            .send::<Value>(Method::GET, HEALTH_PATH, None)
            .await;
        let latency_ms = started.elapsed().as_millis();

        match result {
            Ok(details) => {
                info!(%endpoint, latency_ms, "remote health probe ok");
                RemoteHealth::ok(&endpoint, latency_ms, details)
            }
            Err(e) => {
                warn!(%endpoint, latency_ms, error = %e, "remote health probe failed");
                RemoteHealth::fail(&endpoint, latency_ms, e.to_string())
            }
        }
    }

    /// Fetches the remote tool manifest (`GET /mcp/manifest`).
    pub async fn manifest(&self) -> ValuationResult<Value> {
        self.transport
            .send::<Value>(Method::GET, MANIFEST_PATH, None)
            .await
    }
}

/// One-shot convenience: builds a client from `cfg` and analyzes `input`.
///
/// # Errors
/// See [`ValuationClient::new`] and [`ValuationClient::analyze`].
pub async fn analyze(
    cfg: ValuationConfig,
    input: &str,
    include_deep_analysis: bool,
) -> ValuationResult<AnalysisResult> {
    ValuationClient::new(cfg)?
        .analyze(input, include_deep_analysis)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValuationError;

    #[test]
    fn override_applies_to_both_modes() {
        let cfg = ValuationConfig {
            protocol_override: Some(Protocol::LegacyProbe),
            ..ValuationConfig::default()
        };
        let client = ValuationClient::new(cfg).unwrap();
        assert_eq!(client.protocol_for(true), Protocol::LegacyProbe);
        assert_eq!(client.protocol_for(false), Protocol::LegacyProbe);
    }

    #[test]
    fn rejects_invalid_config() {
        let err = ValuationClient::new(ValuationConfig::with_base_url("localhost:1")).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn invalid_repository_fails_before_any_call() {
        // Port 9 is never contacted: parsing fails first.
        let client = ValuationClient::new(ValuationConfig::with_base_url("http://127.0.0.1:9")).unwrap();
        let err = client.analyze("not a repo", true).await.unwrap_err();
        assert!(matches!(err, ValuationError::InvalidRepositoryFormat { .. }));
    }
}
