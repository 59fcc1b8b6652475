//! Tool-invocation envelope handling.
//!
//! Tool responses arrive as `{ "content": [ { "type": "text", "text": "<json>" }, ... ] }`
//! where the interesting payload is a JSON document encoded inside the
//! first text item.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::errors::{NormalizeError, NormalizeResult};

/// Returns `true` when the value looks like a tool-invocation envelope.
pub fn is_envelope(payload: &Value) -> bool {
    matches!(payload.get("content"), Some(Value::Array(_)))
}

/// Unwraps the envelope if present, otherwise returns the payload as-is.
///
/// # Errors
/// [`NormalizeError::EnvelopeParse`] when the envelope has no text item,
/// the text item has no string `text`, or the text is not valid JSON.
pub fn unwrap_envelope(payload: &Value) -> NormalizeResult<Cow<'_, Value>> {
    if !is_envelope(payload) {
        return Ok(Cow::Borrowed(payload));
    }
    let items = payload["content"].as_array().map(Vec::as_slice).unwrap_or_default();

    let item = items
        .iter()
        .find(|item| item.get("type").and_then(Value::as_str) == Some("text"))
        .ok_or_else(|| {
            NormalizeError::EnvelopeParse(format!(
                "no text item among {} content item(s)",
                items.len()
            ))
        })?;

    let text = item
        .get("text")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| NormalizeError::EnvelopeParse("text item has no text".to_string()))?;

    let inner: Value = serde_json::from_str(text)
        .map_err(|e| NormalizeError::EnvelopeParse(format!("text item is not JSON: {e}")))?;

    debug!(text_len = text.len(), "unwrapped tool envelope");
    Ok(Cow::Owned(inner))
}
