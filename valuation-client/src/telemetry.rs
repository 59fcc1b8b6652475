use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the workspace crates whose events this layer renders.
pub const TARGET_PREFIXES: [&str; 4] = [
    "unicorn_hunter",
    "api",
    "valuation_client",
    "valuation_normalizer",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

fn is_workspace_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|prefix| {
        target
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// Formatting layer that renders ONLY events emitted by the workspace crates.
///
/// - RFC3339 UTC timestamps
/// - compact single-line format with `file:line`
/// - span close events (durations of instrumented handlers)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_workspace)
}

/// Directives like `valuation_client=debug` for every workspace crate.
pub fn level_directives(level: Level) -> Result<Vec<Directive>, ParseError> {
    let level = level.as_str().to_lowercase();
    TARGET_PREFIXES
        .iter()
        .map(|prefix| Directive::from_str(&format!("{prefix}={level}")))
        .collect()
}

/// `EnvFilter` from `RUST_LOG` (or `default`), with the workspace crates
/// raised to `level`.
///
/// Directives already present in `RUST_LOG` for a workspace crate are kept
/// when `RUST_LOG` is set.
pub fn env_filter_with_level(default: &str, level: Level) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(from_env) => Ok(from_env),
        Err(_) => level_directives(level)?
            .into_iter()
            .try_fold(EnvFilter::try_new(default)?, |f, d| Ok(f.add_directive(d))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_workspace_targets_only() {
        assert!(is_workspace_target("valuation_client"));
        assert!(is_workspace_target("valuation_client::protocols::agent"));
        assert!(is_workspace_target("api::routes::analyze"));
        assert!(!is_workspace_target("apix"));
        assert!(!is_workspace_target("hyper::proto"));
    }

    #[test]
    fn builds_one_directive_per_crate() {
        let ds = level_directives(Level::DEBUG).unwrap();
        assert_eq!(ds.len(), TARGET_PREFIXES.len());
    }
}
