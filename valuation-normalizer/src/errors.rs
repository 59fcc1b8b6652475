//! Error type for the normalization layer.
//!
//! Only the envelope step can hard-fail; every later step degrades to
//! defaults instead of returning an error.

use thiserror::Error;

/// Convenient alias for normalizer results.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// `{content: [...]}` envelope without a usable text item, or the
    /// text item does not hold valid JSON.
    #[error("envelope parse error: {0}")]
    EnvelopeParse(String),

    /// The body is not JSON at all, or the decoded payload is not an object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
