//! Optional enrichment groups: interpretation, package stats and
//! codebase analysis.
//!
//! Each builder renames snake_case source keys to the canonical camelCase
//! fields and returns `None` when nothing usable was found, so the group
//! is omitted from the serialized result.

use serde_json::Value;

use crate::coerce::{coerce_count, coerce_f64, coerce_string};
use crate::model::{
    Architecture, CodeComplexity, CodebaseAnalysis, DependencyStats, Documentation,
    Interpretation, PackageCounters, PackageStats, QualityScores, TestCoverage,
};

fn ratio(group: &Value, key: &str) -> Option<f64> {
    group.get(key).and_then(coerce_f64)
}

fn count(group: &Value, key: &str) -> Option<u64> {
    group.get(key).and_then(coerce_count)
}

fn text(group: &Value, key: &str) -> Option<String> {
    group.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Copies `score_meaning`, `valuation_note` and `factors_considered`.
///
/// Non-string entries in `factors_considered` are dropped.
pub fn interpretation(raw: &Value) -> Option<Interpretation> {
    if !raw.is_object() {
        return None;
    }

    let factors_considered = raw
        .get("factors_considered")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Some(Interpretation {
        score_meaning: text(raw, "score_meaning"),
        valuation_note: text(raw, "valuation_note"),
        factors_considered,
    })
}

/// Builds [`PackageStats`] from the `package_stats` object.
pub fn package_stats(raw: &Value) -> Option<PackageStats> {
    if !raw.is_object() {
        return None;
    }

    let stats = raw
        .get("stats")
        .filter(|s| s.is_object())
        .map(|s| PackageCounters {
            weekly_downloads: count(s, "weekly_downloads"),
            monthly_downloads: count(s, "monthly_downloads"),
            latest_version: s.get("latest_version").and_then(coerce_string),
            total_versions: count(s, "total_versions"),
        });

    Some(PackageStats {
        status: text(raw, "status").unwrap_or_else(|| "unknown".to_string()),
        package_manager: text(raw, "package_manager"),
        package_name: text(raw, "package_name"),
        stats,
    })
}

/// Builds [`CodebaseAnalysis`]; `None` when no subgroup has any field.
pub fn codebase_analysis(raw: &Value) -> Option<CodebaseAnalysis> {
    if !raw.is_object() {
        return None;
    }

    let analysis = CodebaseAnalysis {
        code_complexity: raw.get("code_complexity").and_then(code_complexity),
        quality_scores: raw.get("quality_scores").and_then(quality_scores),
        test_coverage: raw.get("test_coverage").and_then(test_coverage),
        dependencies: raw.get("dependencies").and_then(dependencies),
        architecture: raw.get("architecture").and_then(architecture),
        documentation: raw.get("documentation").and_then(documentation),
    };

    (!analysis.is_empty()).then_some(analysis)
}

fn code_complexity(g: &Value) -> Option<CodeComplexity> {
    let out = CodeComplexity {
        average_cyclomatic_complexity: ratio(g, "average_cyclomatic_complexity"),
        max_cyclomatic_complexity: ratio(g, "max_cyclomatic_complexity"),
        duplication_percentage: ratio(g, "duplication_percentage"),
    };
    (out != CodeComplexity::default()).then_some(out)
}

fn quality_scores(g: &Value) -> Option<QualityScores> {
    let out = QualityScores {
        maintainability_index: ratio(g, "maintainability_index"),
        technical_debt_ratio: ratio(g, "technical_debt_ratio"),
        code_smell_density: ratio(g, "code_smell_density"),
    };
    (out != QualityScores::default()).then_some(out)
}

fn test_coverage(g: &Value) -> Option<TestCoverage> {
    let out = TestCoverage {
        overall_coverage: ratio(g, "overall_coverage"),
        unit_test_coverage: ratio(g, "unit_test_coverage"),
    };
    (out != TestCoverage::default()).then_some(out)
}

fn dependencies(g: &Value) -> Option<DependencyStats> {
    let out = DependencyStats {
        total_dependencies: count(g, "total_dependencies"),
        outdated_count: count(g, "outdated_count"),
        security_vulnerabilities: count(g, "security_vulnerabilities"),
    };
    (out != DependencyStats::default()).then_some(out)
}

fn architecture(g: &Value) -> Option<Architecture> {
    let out = Architecture {
        modularity_score: ratio(g, "modularity_score"),
        coupling_score: ratio(g, "coupling_score"),
    };
    (out != Architecture::default()).then_some(out)
}

fn documentation(g: &Value) -> Option<Documentation> {
    let out = Documentation {
        readme_quality_score: ratio(g, "readme_quality_score"),
        comment_coverage: ratio(g, "comment_coverage"),
    };
    (out != Documentation::default()).then_some(out)
}
