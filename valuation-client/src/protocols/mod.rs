//! Calling conventions against the valuation service.
//!
//! The service has been reached in three ways over time; each lives in its
//! own module and shares one [`transport::Transport`]:
//!   * [`agent`]: single `agent_executor` call, yields codebase analysis
//!   * [`two_call`]: `analyze_github_repository` then `unicorn_hunter`
//!   * [`legacy_probe`]: ordered probing of older flat endpoints
//!
//! [`Protocol::select`] picks agent mode for deep analysis and the two-call
//! mode otherwise. The legacy probe is only used when configured explicitly.

pub mod agent;
pub mod legacy_probe;
pub mod transport;
pub mod two_call;
pub mod types;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    AgentMode,
    TwoCallMode,
    LegacyProbe,
}

impl Protocol {
    /// Chooses the protocol for one request.
    ///
    /// An explicit override wins; otherwise deep analysis goes through the
    /// agent and plain analysis through the two-call sequence.
    pub fn select(include_deep_analysis: bool, override_with: Option<Protocol>) -> Protocol {
        match override_with {
            Some(p) => p,
            None if include_deep_analysis => Protocol::AgentMode,
            None => Protocol::TwoCallMode,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::AgentMode => "agent",
            Protocol::TwoCallMode => "two-call",
            Protocol::LegacyProbe => "legacy",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agent" | "agent-mode" => Ok(Protocol::AgentMode),
            "two-call" | "two_call" | "two-call-mode" => Ok(Protocol::TwoCallMode),
            "legacy" | "legacy-probe" => Ok(Protocol::LegacyProbe),
            other => Err(ConfigError::UnsupportedProtocol(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_analysis_selects_agent() {
        assert_eq!(Protocol::select(true, None), Protocol::AgentMode);
        assert_eq!(Protocol::select(false, None), Protocol::TwoCallMode);
    }

    #[test]
    fn override_wins() {
        assert_eq!(
            Protocol::select(true, Some(Protocol::LegacyProbe)),
            Protocol::LegacyProbe
        );
        assert_eq!(
            Protocol::select(false, Some(Protocol::AgentMode)),
            Protocol::AgentMode
        );
    }

    #[test]
    fn parses_names() {
        assert_eq!("Agent".parse::<Protocol>().unwrap(), Protocol::AgentMode);
        assert_eq!("two_call".parse::<Protocol>().unwrap(), Protocol::TwoCallMode);
        assert_eq!(" legacy-probe ".parse::<Protocol>().unwrap(), Protocol::LegacyProbe);
        assert!("rest".parse::<Protocol>().is_err());
        assert_eq!(Protocol::TwoCallMode.to_string(), "two-call");
    }
}
