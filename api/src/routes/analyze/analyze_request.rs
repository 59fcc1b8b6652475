use serde::Deserialize;

/// Request body for `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// `owner/repo` or a GitHub URL.
    pub repository: String,
    /// Ask the remote for codebase analysis (agent mode). Defaults to `true`.
    #[serde(default = "default_deep_analysis")]
    pub include_deep_analysis: bool,
}

fn default_deep_analysis() -> bool {
    true
}
