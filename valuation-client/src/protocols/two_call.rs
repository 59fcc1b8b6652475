//! Two-call mode: fetch repository data, then score it.
//!
//! The calls are strictly sequential because the second one consumes the
//! decoded output of the first.

use serde_json::Value;
use tracing::debug;
use valuation_normalizer::NormalizeError;
use valuation_normalizer::envelope::{is_envelope, unwrap_envelope};

use crate::errors::ValuationResult;
use crate::protocols::transport::Transport;
use crate::protocols::types::ToolCall;
use crate::repo_ref::RepositoryReference;

pub async fn fetch(transport: &Transport, repo: &RepositoryReference) -> ValuationResult<Value> {
    let first = transport.invoke(&ToolCall::analyze_repository(repo)).await?;
    let repo_data = unwrap_envelope(&first)?.into_owned();
    debug!(
        owner = repo.owner(),
        repo = repo.repo(),
        enveloped = is_envelope(&first),
        "repository data received"
    );

    let second = transport.invoke(&ToolCall::unicorn_hunter(&repo_data)).await?;
    let score = unwrap_envelope(&second)?.into_owned();
    debug!(
        owner = repo.owner(),
        repo = repo.repo(),
        enveloped = is_envelope(&second),
        "score received"
    );

    Ok(merge(score, repo_data)?)
}

/// Attaches step-1 output to the step-2 object under `repo_data`.
///
/// A `repo_data` key already present in the score object is left alone.
///
/// # Errors
/// [`NormalizeError::MalformedResponse`] if the score is not an object.
pub fn merge(score: Value, repo_data: Value) -> Result<Value, NormalizeError> {
    let Value::Object(mut map) = score else {
        return Err(NormalizeError::MalformedResponse(
            "unicorn_hunter did not return a JSON object".to_string(),
        ));
    };
    map.entry("repo_data").or_insert(repo_data);
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_adds_repo_data() {
        let merged = merge(
            json!({"unicorn_score": 72}),
            json!({"metrics": {"stars": 10}}),
        )
        .unwrap();
        assert_eq!(
            merged,
            json!({"unicorn_score": 72, "repo_data": {"metrics": {"stars": 10}}})
        );
    }

    #[test]
    fn merge_keeps_existing_repo_data() {
        let merged = merge(
            json!({"unicorn_score": 1, "repo_data": {"metrics": {"stars": 5}}}),
            json!({"metrics": {"stars": 99}}),
        )
        .unwrap();
        assert_eq!(merged["repo_data"]["metrics"]["stars"], 5);
    }

    #[test]
    fn merge_rejects_non_object_score() {
        assert!(matches!(
            merge(json!([1, 2]), json!({})),
            Err(NormalizeError::MalformedResponse(_))
        ));
    }
}
