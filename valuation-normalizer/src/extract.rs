//! Ordered field extractors over the polymorphic payload.
//!
//! Each canonical field has a [`Chain`]: a priority-ordered list of JSON
//! paths rooted at the payload, the repository-data object or the
//! score-bearing object. The first path that resolves to an acceptable
//! value wins. Adding a newly observed payload shape means appending one
//! extractor, not another `if` ladder.

use std::fmt;

use serde_json::Value;
use tracing::trace;

/// Where an extractor path starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// The unwrapped payload itself.
    Payload,
    /// `payload.analysis` or `payload.repo_data`, when present.
    RepoData,
    /// `payload.unicorn_hunter`, or the payload itself.
    ScoreObject,
}

impl Root {
    fn label(self) -> &'static str {
        match self {
            Root::Payload => "payload",
            Root::RepoData => "repo_data",
            Root::ScoreObject => "score_object",
        }
    }
}

/// Resolved starting objects for one payload.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'v> {
    pub payload: &'v Value,
    pub repo_data: Option<&'v Value>,
    pub score_object: &'v Value,
}

impl<'v> Sources<'v> {
    /// Probes the repository-data and score-bearing objects.
    pub fn resolve(payload: &'v Value) -> Self {
        let bare = Sources {
            payload,
            repo_data: None,
            score_object: payload,
        };

        let repo_data = REPO_DATA.first(&bare, |v| v.is_object().then_some(v));
        let score_object = SCORE_OBJECT
            .first(&bare, |v| v.is_object().then_some(v))
            .unwrap_or(payload);

        Sources {
            payload,
            repo_data,
            score_object,
        }
    }

    fn root(&self, root: Root) -> Option<&'v Value> {
        match root {
            Root::Payload => Some(self.payload),
            Root::RepoData => self.repo_data,
            Root::ScoreObject => Some(self.score_object),
        }
    }
}

/// A pure path lookup: `root.path[0].path[1]...`.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    pub root: Root,
    pub path: &'static [&'static str],
}

impl Extractor {
    pub const fn new(root: Root, path: &'static [&'static str]) -> Self {
        Self { root, path }
    }

    /// Resolves the path; `null` counts as absent.
    pub fn probe<'v>(&self, sources: &Sources<'v>) -> Option<&'v Value> {
        let mut cur = sources.root(self.root)?;
        for key in self.path {
            cur = cur.get(key)?;
        }
        (!cur.is_null()).then_some(cur)
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root.label())?;
        for key in self.path {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

/// Priority-ordered extractors for one canonical field.
#[derive(Debug, Clone, Copy)]
pub struct Chain {
    pub field: &'static str,
    pub extractors: &'static [Extractor],
}

impl Chain {
    /// Returns the first value that is present and accepted by `accept`.
    pub fn first<'v, T>(
        &self,
        sources: &Sources<'v>,
        mut accept: impl FnMut(&'v Value) -> Option<T>,
    ) -> Option<T> {
        for extractor in self.extractors {
            if let Some(out) = extractor.probe(sources).and_then(&mut accept) {
                trace!(field = self.field, source = %extractor, "extractor matched");
                return Some(out);
            }
        }
        trace!(field = self.field, "no extractor matched; using default");
        None
    }
}

use Root::{Payload, RepoData, ScoreObject};

pub const REPO_DATA: Chain = Chain {
    field: "repo_data",
    extractors: &[
        Extractor::new(Payload, &["analysis"]),
        Extractor::new(Payload, &["repo_data"]),
    ],
};

pub const SCORE_OBJECT: Chain = Chain {
    field: "score_object",
    extractors: &[Extractor::new(Payload, &["unicorn_hunter"])],
};

pub const SCORE: Chain = Chain {
    field: "score",
    extractors: &[
        Extractor::new(ScoreObject, &["unicorn_score"]),
        Extractor::new(Payload, &["score"]),
    ],
};

/// Only the score object carries a display status; a top-level `status`
/// next to `unicorn_hunter` is the tool's own result flag.
pub const STATUS: Chain = Chain {
    field: "status",
    extractors: &[Extractor::new(ScoreObject, &["status"])],
};

pub const COMPONENT_SCORES: Chain = Chain {
    field: "component_scores",
    extractors: &[
        Extractor::new(ScoreObject, &["component_scores"]),
        Extractor::new(Payload, &["component_scores"]),
        Extractor::new(Payload, &["componentScores"]),
    ],
};

pub const VALUATION_RANGES: Chain = Chain {
    field: "valuations",
    extractors: &[
        Extractor::new(ScoreObject, &["speculative_valuation_ranges"]),
        Extractor::new(Payload, &["valuations"]),
    ],
};

pub const STARS: Chain = Chain {
    field: "metrics.stars",
    extractors: &[
        Extractor::new(RepoData, &["metrics", "stars"]),
        Extractor::new(Payload, &["metrics", "stars"]),
    ],
};

pub const FORKS: Chain = Chain {
    field: "metrics.forks",
    extractors: &[
        Extractor::new(RepoData, &["metrics", "forks"]),
        Extractor::new(Payload, &["metrics", "forks"]),
    ],
};

pub const WATCHERS: Chain = Chain {
    field: "metrics.watchers",
    extractors: &[
        Extractor::new(RepoData, &["metrics", "watchers"]),
        Extractor::new(Payload, &["metrics", "watchers"]),
    ],
};

pub const CONTRIBUTORS: Chain = Chain {
    field: "metrics.contributors",
    extractors: &[
        Extractor::new(RepoData, &["development", "contributors"]),
        Extractor::new(Payload, &["metrics", "contributors"]),
    ],
};

pub const LANGUAGE: Chain = Chain {
    field: "metrics.language",
    extractors: &[
        Extractor::new(RepoData, &["basic_info", "primary_language"]),
        Extractor::new(Payload, &["metrics", "language"]),
    ],
};

pub const INTERPRETATION: Chain = Chain {
    field: "interpretation",
    extractors: &[Extractor::new(ScoreObject, &["interpretation"])],
};

pub const PACKAGE_STATS: Chain = Chain {
    field: "package_stats",
    extractors: &[
        Extractor::new(Payload, &["package_stats"]),
        Extractor::new(Payload, &["packageStats"]),
    ],
};

pub const ECOSYSTEM_ADOPTION_SCORE: Chain = Chain {
    field: "ecosystem_adoption_score",
    extractors: &[
        Extractor::new(Payload, &["ecosystem_adoption_score"]),
        Extractor::new(ScoreObject, &["ecosystem_adoption_score"]),
    ],
};

pub const SUMMARY: Chain = Chain {
    field: "summary",
    extractors: &[
        Extractor::new(Payload, &["summary"]),
        Extractor::new(ScoreObject, &["summary"]),
    ],
};

pub const CODEBASE_ANALYSIS: Chain = Chain {
    field: "codebase_analysis",
    extractors: &[
        Extractor::new(ScoreObject, &["codebase_analysis"]),
        Extractor::new(Payload, &["codebase_analysis"]),
    ],
};
