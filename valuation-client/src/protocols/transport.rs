//! Shared HTTP plumbing for every protocol.
//!
//! Each call runs under its own `tokio::time::timeout`; dropping the future
//! aborts the in-flight request. Non-2xx responses become
//! [`ValuationError::RemoteService`]: the summary line carries a snippet,
//! the full body is logged separately at debug level.

use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};
use valuation_normalizer::NormalizeError;

use crate::errors::{ValuationError, ValuationResult, make_snippet, transport_error};
use crate::protocols::types::{INVOKE_PATH, ToolCall};

#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl Transport {
    pub fn new(http: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /mcp/invoke` with the given tool call; returns the raw JSON.
    pub async fn invoke(&self, call: &ToolCall<'_>) -> ValuationResult<Value> {
        debug!(tool = call.tool, "invoking remote tool");
        self.send(Method::POST, INVOKE_PATH, Some(call)).await
    }

    /// Performs one request and decodes a JSON body.
    ///
    /// # Errors
    /// - [`ValuationError::Timeout`] when the deadline elapses;
    /// - [`ValuationError::Network`] for transport failures;
    /// - [`ValuationError::RemoteService`] for non-2xx statuses;
    /// - [`NormalizeError::MalformedResponse`] when the body is not JSON.
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> ValuationResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let started = Instant::now();

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let round_trip = async {
            let resp = request.send().await?;
            let status = resp.status();
            let text = resp.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = match tokio::time::timeout(self.timeout, round_trip).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) => {
                warn!(%method, %url, error = %e, "transport failure");
                return Err(transport_error(e, self.timeout));
            }
            Err(_) => {
                warn!(
                    %method,
                    %url,
                    timeout_ms = self.timeout.as_millis(),
                    "remote call timed out"
                );
                return Err(ValuationError::Timeout(self.timeout));
            }
        };

        let latency_ms = started.elapsed().as_millis();

        if !status.is_success() {
            error!(
                %method,
                %url,
                %status,
                snippet = %make_snippet(&text),
                latency_ms,
                "remote returned non-success status"
            );
            debug!(%url, %status, body = %text, "remote error body");
            return Err(ValuationError::RemoteService {
                status: status.as_u16(),
                url,
                body: text,
            });
        }

        debug!(%method, %url, %status, latency_ms, body_len = text.len(), "remote call succeeded");

        serde_json::from_str(&text).map_err(|e| {
            error!(%url, error = %e, snippet = %make_snippet(&text), "response body is not JSON");
            NormalizeError::MalformedResponse(format!("body from {path} is not JSON: {e}")).into()
        })
    }
}
