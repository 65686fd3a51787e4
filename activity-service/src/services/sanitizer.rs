//! Cleanup and validation of model replies.
//!
//! Models tend to wrap JSON in a markdown code fence. At most one leading
//! fence (optionally tagged) and one trailing fence are removed, matched at
//! the ends of the text only. Fences inside the body are left alone.

use serde::de::IgnoredAny;
use serde_json::{json, Value};

const FENCE: &str = "```";

/// Error message reported when a reply is not valid JSON.
pub const INVALID_JSON_ERROR: &str = "Invalid JSON response from AI";

/// A model reply after fence stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizedResponse {
    /// Syntactically valid JSON text, passed on as-is.
    Valid(String),
    /// Text that failed to parse, kept for the caller to inspect.
    Invalid { error: String, raw: String },
}

impl SanitizedResponse {
    pub fn is_valid(&self) -> bool {
        matches!(self, SanitizedResponse::Valid(_))
    }

    /// Render as the HTTP payload: `{key: text}` when valid, otherwise
    /// `{"error": ..., "raw": ...}`.
    pub fn into_payload(self, key: &str) -> Value {
        match self {
            SanitizedResponse::Valid(text) => {
                let mut payload = serde_json::Map::new();
                payload.insert(key.to_string(), Value::String(text));
                Value::Object(payload)
            }
            SanitizedResponse::Invalid { error, raw } => json!({ "error": error, "raw": raw }),
        }
    }
}

/// Remove one leading and one trailing code fence, then trim.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = strip_language_tag(rest).trim_start();
    }

    body = body.trim_end();
    if let Some(rest) = body.strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Drop the tag after an opening fence. `json` is always a tag; any other
/// word only counts when whitespace (or nothing) follows it and it is not
/// itself a JSON value, so bare values like `true` or `42` survive.
fn strip_language_tag(rest: &str) -> &str {
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')))
        .unwrap_or(rest.len());
    if tag_len == 0 {
        return rest;
    }

    let (tag, after) = rest.split_at(tag_len);
    if tag.eq_ignore_ascii_case("json") {
        return after;
    }

    let ends_word = after.is_empty() || after.starts_with(char::is_whitespace);
    if ends_word && serde_json::from_str::<IgnoredAny>(tag).is_err() {
        after
    } else {
        rest
    }
}

/// Strip fences and check that what is left parses as JSON. The parsed
/// value is thrown away.
pub fn sanitize(text: &str) -> SanitizedResponse {
    let cleaned = strip_code_fences(text);

    match serde_json::from_str::<IgnoredAny>(cleaned) {
        Ok(_) => SanitizedResponse::Valid(cleaned.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, raw_len = cleaned.len(), "Model reply is not valid JSON");
            SanitizedResponse::Invalid {
                error: INVALID_JSON_ERROR.to_string(),
                raw: cleaned.to_string(),
            }
        }
    }
}
