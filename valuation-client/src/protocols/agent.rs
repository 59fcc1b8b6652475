//! Agent mode: one `agent_executor` call producing repository data, score
//! and codebase analysis in a single enveloped response.

use serde_json::Value;
use tracing::{debug, info, warn};
use valuation_normalizer::envelope::{is_envelope, unwrap_envelope};
use valuation_normalizer::extract::{self, Sources};

use crate::errors::ValuationResult;
use crate::protocols::transport::Transport;
use crate::protocols::types::ToolCall;
use crate::repo_ref::RepositoryReference;

/// Component keys only produced when the agent ran a codebase analysis.
pub const CODEBASE_COMPONENTS: [&str; 4] = [
    "code_quality",
    "maintainability",
    "test_reliability",
    "security_posture",
];

/// Runs the agent call and returns the unwrapped payload.
pub async fn fetch(transport: &Transport, repo: &RepositoryReference) -> ValuationResult<Value> {
    let raw = transport.invoke(&ToolCall::agent(repo)).await?;
    let payload = unwrap_envelope(&raw)?.into_owned();

    debug!(
        owner = repo.owner(),
        repo = repo.repo(),
        enveloped = is_envelope(&raw),
        keys = ?top_level_keys(&payload),
        has_analysis = payload.get("analysis").is_some(),
        has_unicorn_hunter = payload.get("unicorn_hunter").is_some(),
        "agent payload decoded"
    );

    let missing = missing_codebase_components(&payload);
    if missing.is_empty() {
        info!(owner = repo.owner(), repo = repo.repo(), "agent returned codebase components");
    } else {
        warn!(
            owner = repo.owner(),
            repo = repo.repo(),
            missing_codebase_components = ?missing,
            "deep analysis requested but codebase components are missing"
        );
    }

    Ok(payload)
}

/// Codebase component keys absent from the payload's component scores.
pub fn missing_codebase_components(payload: &Value) -> Vec<&'static str> {
    let sources = Sources::resolve(payload);
    let components = extract::COMPONENT_SCORES.first(&sources, Value::as_object);

    CODEBASE_COMPONENTS
        .iter()
        .copied()
        .filter(|key| components.is_none_or(|map| !map.contains_key(*key)))
        .collect()
}

fn top_level_keys(payload: &Value) -> Vec<&str> {
    payload
        .as_object()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
