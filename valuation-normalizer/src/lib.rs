//! Response normalization for the repository valuation service.
//!
//! The service has answered with several payload shapes over time:
//!   * flat tool responses (`score`, `valuations`, `componentScores`, ...)
//!   * two-call responses (`repo_data` plus a snake_case score object)
//!   * agent-executor responses wrapped in a `content[0].text` envelope,
//!     carrying `analysis` and `unicorn_hunter` objects
//!
//! [`normalize`] maps any of them into one [`AnalysisResult`]. It is a pure
//! transform: only a broken envelope or a non-object payload is an error,
//! every other gap degrades to a default.

pub mod coerce;
pub mod enrichment;
pub mod envelope;
mod errors;
pub mod extract;
pub mod format;
pub mod model;

pub use errors::{NormalizeError, NormalizeResult};
pub use model::*;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    coerce::{coerce_count, coerce_f64, number_or_zero},
    extract::Sources,
    format::{format_valuation, status_from_score, title_case_key},
};

/// Parses a raw response body and normalizes it.
///
/// # Errors
/// [`NormalizeError::MalformedResponse`] if `body` is not JSON, otherwise
/// whatever [`normalize`] returns.
pub fn normalize_str(body: &str) -> NormalizeResult<AnalysisResult> {
    let raw: Value = serde_json::from_str(body)
        .map_err(|e| NormalizeError::MalformedResponse(format!("body is not JSON: {e}")))?;
    normalize(&raw)
}

/// Normalizes a raw payload of any known shape into an [`AnalysisResult`].
///
/// # Errors
/// - [`NormalizeError::EnvelopeParse`] for a broken `content` envelope;
/// - [`NormalizeError::MalformedResponse`] if the payload is not an object.
pub fn normalize(raw: &Value) -> NormalizeResult<AnalysisResult> {
    let working = envelope::unwrap_envelope(raw)?;
    let payload = working.as_ref();

    if !payload.is_object() {
        return Err(NormalizeError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_kind(payload)
        )));
    }

    let src = Sources::resolve(payload);

    let score = extract::SCORE.first(&src, coerce_f64).unwrap_or(0.0);
    let status = extract::STATUS
        .first(&src, |v| v.as_str().filter(|s| !s.trim().is_empty()))
        .map(str::to_owned)
        .unwrap_or_else(|| status_from_score(score).to_string());

    let component_scores = extract::COMPONENT_SCORES
        .first(&src, component_scores)
        .unwrap_or_default();

    let ranges = extract::VALUATION_RANGES.first(&src, Value::as_object);
    let valuations = Valuations {
        conservative: format_valuation(ranges.and_then(|r| r.get("conservative"))),
        realistic: format_valuation(ranges.and_then(|r| r.get("realistic"))),
        optimistic: format_valuation(ranges.and_then(|r| r.get("optimistic"))),
    };

    let metrics = RepoMetrics {
        stars: extract::STARS.first(&src, coerce_count).unwrap_or(0),
        forks: extract::FORKS.first(&src, coerce_count).unwrap_or(0),
        watchers: extract::WATCHERS.first(&src, coerce_count).unwrap_or(0),
        contributors: extract::CONTRIBUTORS.first(&src, coerce_count).unwrap_or(0),
        language: extract::LANGUAGE
            .first(&src, |v| v.as_str().filter(|s| !s.trim().is_empty()))
            .map(str::to_owned)
            .unwrap_or_else(|| RepoMetrics::default().language),
    };

    let result = AnalysisResult {
        score,
        status,
        valuations,
        component_scores,
        metrics,
        interpretation: extract::INTERPRETATION.first(&src, enrichment::interpretation),
        package_stats: extract::PACKAGE_STATS.first(&src, enrichment::package_stats),
        ecosystem_adoption_score: extract::ECOSYSTEM_ADOPTION_SCORE.first(&src, coerce_f64),
        summary: extract::SUMMARY.first(&src, |v| v.as_str().map(str::to_owned)),
        codebase_analysis: extract::CODEBASE_ANALYSIS.first(&src, enrichment::codebase_analysis),
    };

    debug!(
        score = result.score,
        status = %result.status,
        components = result.component_scores.len(),
        has_codebase = result.codebase_analysis.is_some(),
        has_package_stats = result.package_stats.is_some(),
        "payload normalized"
    );

    Ok(result)
}

/// Converts a component-score mapping (or the flat array form) into
/// display entries, preserving source order.
fn component_scores(raw: &Value) -> Option<Vec<ComponentScore>> {
    match raw {
        Value::Object(map) => Some(from_mapping(map)),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| {
                    let name = item.get("name")?.as_str()?;
                    Some(ComponentScore {
                        name: title_case_key(name),
                        score: number_or_zero(item.get("score")),
                        weight: item.get("weight").and_then(coerce_f64).unwrap_or(1.0),
                    })
                })
                .collect(),
        ),
        _ => None,
    }
}

fn from_mapping(map: &Map<String, Value>) -> Vec<ComponentScore> {
    map.iter()
        .map(|(key, value)| ComponentScore {
            name: title_case_key(key),
            score: number_or_zero(Some(value)),
            weight: 1.0,
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
