//! Canonical analysis record consumed by the presentation layer.
//!
//! Field names serialize as camelCase. Optional groups are skipped when
//! absent, so a missing group is never rendered as `null`.

use serde::{Deserialize, Serialize};

/// The single stable schema produced by [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Unicorn score, 0-100 expected but not clamped.
    pub score: f64,
    pub status: String,
    pub valuations: Valuations,
    /// Source mapping order is preserved.
    pub component_scores: Vec<ComponentScore>,
    pub metrics: RepoMetrics,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Interpretation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_stats: Option<PackageStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem_adoption_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codebase_analysis: Option<CodebaseAnalysis>,
}

/// Formatted currency strings (e.g. `"$3.8M"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuations {
    pub conservative: String,
    pub realistic: String,
    pub optimistic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    /// Human title, e.g. `"Community Momentum"`.
    pub name: String,
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetrics {
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub contributors: u64,
    pub language: String,
}

impl Default for RepoMetrics {
    fn default() -> Self {
        Self {
            stars: 0,
            forks: 0,
            watchers: 0,
            contributors: 0,
            language: "Unknown".to_string(),
        }
    }
}

/// Natural-language explanation attached to the score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_note: Option<String>,
    #[serde(default)]
    pub factors_considered: Vec<String>,
}

/// Package-registry adoption data (npm, PyPI, crates.io, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PackageCounters>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCounters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_downloads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_downloads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_versions: Option<u64>,
}

/// Codebase-quality metrics, present only in deep (agent mode) analyses.
///
/// Every subgroup is omitted when none of its fields were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodebaseAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_complexity: Option<CodeComplexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_scores: Option<QualityScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_coverage: Option<TestCoverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
}

impl CodebaseAnalysis {
    pub fn is_empty(&self) -> bool {
        self.code_complexity.is_none()
            && self.quality_scores.is_none()
            && self.test_coverage.is_none()
            && self.dependencies.is_none()
            && self.architecture.is_none()
            && self.documentation.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeComplexity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_cyclomatic_complexity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cyclomatic_complexity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplication_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainability_index: Option<f64>,
    /// Fraction in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_debt_ratio: Option<f64>,
    /// Smells per 1K lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_smell_density: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCoverage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_test_coverage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_dependencies: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdated_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_vulnerabilities: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    /// 0-10, higher is better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modularity_score: Option<f64>,
    /// Lower is better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    /// 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_coverage: Option<f64>,
}
