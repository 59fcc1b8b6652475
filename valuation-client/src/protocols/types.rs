//! Wire types for the tool-invocation endpoint and the legacy probe.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::repo_ref::RepositoryReference;

/// Path of the tool-invocation endpoint.
pub const INVOKE_PATH: &str = "/mcp/invoke";
/// Remote liveness endpoint.
pub const HEALTH_PATH: &str = "/health";
/// Remote tool manifest.
pub const MANIFEST_PATH: &str = "/mcp/manifest";

pub const TOOL_ANALYZE_REPOSITORY: &str = "analyze_github_repository";
pub const TOOL_UNICORN_HUNTER: &str = "unicorn_hunter";
pub const TOOL_AGENT_EXECUTOR: &str = "agent_executor";

/// Body of `POST /mcp/invoke`.
#[derive(Debug, Serialize)]
pub struct ToolCall<'a> {
    pub tool: &'static str,
    pub arguments: ToolArguments<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolArguments<'a> {
    Repository { owner: &'a str, repo: &'a str },
    RepoData { repo_data: &'a Value },
    Agent { input: String },
}

impl<'a> ToolCall<'a> {
    pub fn analyze_repository(repo: &'a RepositoryReference) -> Self {
        Self {
            tool: TOOL_ANALYZE_REPOSITORY,
            arguments: ToolArguments::Repository {
                owner: repo.owner(),
                repo: repo.repo(),
            },
        }
    }

    pub fn unicorn_hunter(repo_data: &'a Value) -> Self {
        Self {
            tool: TOOL_UNICORN_HUNTER,
            arguments: ToolArguments::RepoData { repo_data },
        }
    }

    /// Natural-language request asking the agent for a deep analysis.
    pub fn agent(repo: &RepositoryReference) -> Self {
        Self {
            tool: TOOL_AGENT_EXECUTOR,
            arguments: ToolArguments::Agent {
                input: format!("what's the unicorn score for {repo} with codebase analysis?"),
            },
        }
    }
}

/// One endpoint shape tried by the legacy probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeCandidate {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ProbeCandidate {
    /// `"<METHOD> <path>"` label used in logs and aggregated errors.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Candidate list in probing order.
    pub fn ordered_for(repo: &RepositoryReference) -> Vec<ProbeCandidate> {
        let full_name = repo.to_string();
        let by_parts = json!({ "owner": repo.owner(), "repo": repo.repo() });
        let by_name = json!({ "repository": full_name });

        vec![
            ProbeCandidate {
                method: Method::POST,
                path: "/api/analyze".to_string(),
                body: Some(by_name.clone()),
            },
            ProbeCandidate {
                method: Method::POST,
                path: "/valuation".to_string(),
                body: Some(by_parts.clone()),
            },
            ProbeCandidate {
                method: Method::GET,
                path: format!("/analyze/{full_name}"),
                body: None,
            },
            ProbeCandidate {
                method: Method::POST,
                path: "/api/valuation".to_string(),
                body: Some(by_name),
            },
            ProbeCandidate {
                method: Method::POST,
                path: "/".to_string(),
                body: Some(by_parts),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn react() -> RepositoryReference {
        RepositoryReference::parse("facebook/react").unwrap()
    }

    #[test]
    fn tool_calls_serialize_to_wire_shape() {
        let repo = react();
        assert_eq!(
            serde_json::to_value(ToolCall::analyze_repository(&repo)).unwrap(),
            json!({"tool": "analyze_github_repository", "arguments": {"owner": "facebook", "repo": "react"}})
        );

        let data = json!({"metrics": {"stars": 1}});
        assert_eq!(
            serde_json::to_value(ToolCall::unicorn_hunter(&data)).unwrap(),
            json!({"tool": "unicorn_hunter", "arguments": {"repo_data": {"metrics": {"stars": 1}}}})
        );

        assert_eq!(
            serde_json::to_value(ToolCall::agent(&repo)).unwrap(),
            json!({"tool": "agent_executor", "arguments": {
                "input": "what's the unicorn score for facebook/react with codebase analysis?"
            }})
        );
    }

    #[test]
    fn probe_candidates_keep_their_order() {
        let labels: Vec<String> = ProbeCandidate::ordered_for(&react())
            .iter()
            .map(ProbeCandidate::label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "POST /api/analyze",
                "POST /valuation",
                "GET /analyze/facebook/react",
                "POST /api/valuation",
                "POST /",
            ]
        );
    }
}
