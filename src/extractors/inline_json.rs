//! Inline `"transcript"` JSON fallback
//!
//! Some pages carry no caption tracks or embeds at all and instead inline
//! transcript data inside an arbitrary JSON blob. The match is bounded and
//! non-greedy: it stops at the first `]`, so a transcript array containing
//! nested arrays or `]` inside string values is not handled. Known
//! limitation, pinned by tests.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static TRANSCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)"transcript"\s*:\s*(\[[^\]]*\])"#).expect("static pattern"));

/// Search raw HTML for an inline `"transcript": [...]` fragment.
///
/// Returns `None` when the pattern never matches or the captured fragment
/// is not valid JSON, so the caller can tell "strategy inapplicable" apart
/// from "matched but found nothing usable" (`Some` with an empty list).
pub fn find_inline_transcript(html: &str) -> Option<Vec<String>> {
    let captures = TRANSCRIPT_RE.captures(html)?;
    let fragment = &captures[1];

    let payload: Value = match serde_json::from_str(fragment) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Inline transcript fragment is not valid JSON: {}", e);
            return None;
        }
    };

    let items = payload.as_array()?;
    let mut lines = Vec::new();
    for item in items {
        match item {
            Value::String(s) => lines.push(s.clone()),
            Value::Object(map) => {
                let text = map
                    .get("text")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .or_else(|| {
                        map.get("body")
                            .and_then(Value::as_str)
                            .filter(|s| !s.is_empty())
                    });
                if let Some(text) = text {
                    lines.push(text.to_string());
                }
            }
            // Numbers, booleans, nested arrays: not transcript lines
            _ => {}
        }
    }

    Some(lines)
}
