//! Runtime configuration for the valuation client.
//!
//! # Environment variables
//! - `VALUATION_API_BASE`     = remote base URL (default: the hosted service)
//! - `VALUATION_TIMEOUT_SECS` = per-call timeout in seconds (default: 30)
//! - `VALUATION_PROTOCOL`     = optional override: `agent`, `two-call`, `legacy`

use std::time::Duration;

use crate::errors::{ConfigError, ValuationResult};
use crate::protocols::Protocol;

/// Hosted valuation service.
pub const DEFAULT_BASE_URL: &str = "https://valuation-mcp-server-lwo3sf5jba-uc.a.run.app";

/// Deadline applied to every individual remote call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuationConfig {
    /// Base URL, e.g. "https://valuation-mcp-server-....run.app".
    pub base_url: String,
    pub timeout: Duration,
    /// Forces one protocol regardless of the deep-analysis flag.
    pub protocol_override: Option<Protocol>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            protocol_override: None,
        }
    }
}

impl ValuationConfig {
    /// Config pointing at `base_url` with default timeout and no override.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Loads the configuration from process environment.
    ///
    /// # Errors
    /// [`ConfigError`] for an invalid URL, timeout or protocol name.
    pub fn from_env() -> ValuationResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ValuationResult<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = get("VALUATION_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match get("VALUATION_TIMEOUT_SECS") {
            Some(v) => {
                let secs = v
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or(ConfigError::InvalidNumber {
                        var: "VALUATION_TIMEOUT_SECS",
                        reason: "expected a positive integer (seconds)",
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let protocol_override = get("VALUATION_PROTOCOL")
            .map(|v| v.parse::<Protocol>())
            .transpose()?;

        let cfg = Self {
            base_url,
            timeout,
            protocol_override,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates the base URL scheme and the timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidFormat {
                var: "VALUATION_API_BASE",
                reason: "must start with http:// or https://",
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidNumber {
                var: "VALUATION_TIMEOUT_SECS",
                reason: "expected a positive integer (seconds)",
            });
        }
        Ok(())
    }
}
