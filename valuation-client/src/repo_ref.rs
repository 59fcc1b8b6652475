//! Parsing of free-form repository input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::errors::{ValuationError, ValuationResult};

static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)(?:[/?#].*)?$")
        .expect("valid GitHub URL regex")
});

static OWNER_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").expect("valid owner/repo regex")
});

/// A validated `owner/repo` pair.
///
/// Both segments are non-empty, consist of `[A-Za-z0-9_.-]` only and are
/// not made of dots alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryReference {
    owner: String,
    repo: String,
}

impl RepositoryReference {
    /// Parses `owner/repo` or a GitHub URL (`https://github.com/owner/repo/...`).
    ///
    /// Surrounding whitespace is ignored; a trailing `.git` on URLs is dropped.
    ///
    /// # Errors
    /// [`ValuationError::InvalidRepositoryFormat`] when neither form matches.
    pub fn parse(input: &str) -> ValuationResult<Self> {
        let text = input.trim();

        if let Some(caps) = GITHUB_URL.captures(text) {
            let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]);
            return Self::from_parts(&caps[1], repo, input);
        }

        if let Some(caps) = OWNER_REPO.captures(text) {
            return Self::from_parts(&caps[1], &caps[2], input);
        }

        Err(ValuationError::InvalidRepositoryFormat {
            input: input.to_string(),
        })
    }

    fn from_parts(owner: &str, repo: &str, input: &str) -> ValuationResult<Self> {
        if !is_valid_segment(owner) || !is_valid_segment(repo) {
            return Err(ValuationError::InvalidRepositoryFormat {
                input: input.to_string(),
            });
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

/// Non-empty and not made of dots only (`.` / `..` would rewrite URL paths).
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.chars().all(|c| c == '.')
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> (String, String) {
        let r = RepositoryReference::parse(input).unwrap();
        (r.owner().to_string(), r.repo().to_string())
    }

    #[test]
    fn token_and_urls_are_equivalent() {
        let expected = ("facebook".to_string(), "react".to_string());
        assert_eq!(parsed("facebook/react"), expected);
        assert_eq!(parsed("https://github.com/facebook/react"), expected);
        assert_eq!(parsed("https://github.com/facebook/react/tree/main"), expected);
        assert_eq!(parsed("http://www.github.com/facebook/react"), expected);
        assert_eq!(parsed("github.com/facebook/react"), expected);
        assert_eq!(parsed("  facebook/react \n"), expected);
        assert_eq!(parsed("https://github.com/facebook/react.git"), expected);
        assert_eq!(parsed("https://github.com/facebook/react?tab=readme"), expected);
    }

    #[test]
    fn dots_and_dashes_are_allowed() {
        assert_eq!(
            parsed("mcpmessenger/unicorn-hunter"),
            ("mcpmessenger".to_string(), "unicorn-hunter".to_string())
        );
        assert_eq!(
            parsed("vercel/next.js"),
            ("vercel".to_string(), "next.js".to_string())
        );
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for input in [
            "",
            "   ",
            "noSlash",
            "too/many/slashes/x",
            "/missingOwner",
            "missingRepo/",
            "owner/re po",
            "https://gitlab.com/owner/repo",
            "https://github.com/onlyowner",
            "./react",
            "facebook/..",
            "../..",
            "https://github.com/facebook/...",
        ] {
            let err = RepositoryReference::parse(input).unwrap_err();
            assert!(
                matches!(err, ValuationError::InvalidRepositoryFormat { .. }),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn dotted_names_that_are_not_only_dots_are_kept() {
        assert_eq!(
            parsed("octo/.github"),
            ("octo".to_string(), ".github".to_string())
        );
    }

    #[test]
    fn display_is_owner_slash_repo() {
        let r = RepositoryReference::parse("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(r.to_string(), "rust-lang/rust");
    }
}
