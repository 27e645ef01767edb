// src/extract.rs
//! Pull a JSON document out of free-form model output.
//!
//! Candidates are located by an ordered list of strategies. The first strategy
//! whose marker appears in the text decides; if it cannot slice (an unclosed
//! fence), the whole trimmed text is parsed instead:
//!   1. "```json" present: the fenced block after it,
//!   2. "```" present: the text between the first two fences,
//!   3. `{` and `}` present: the span from the first `{` to the last `}`.
//!
//! The brace span is greedy: prose containing stray braces around the object
//! will be swept in and fail to parse. That is an accepted limitation, not a
//! repair parser.

use serde_json::Value;

/// Top-level key the discovery prompt asks for.
pub const EVENTS_KEY: &str = "events";
/// Characters of raw model output kept for diagnostics.
pub const PREVIEW_CHARS: usize = 500;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("JSON parsing error: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        /// First `PREVIEW_CHARS` characters of the raw text.
        preview: String,
    },
    #[error("missing '{key}' key in response")]
    Schema { key: &'static str },
}

impl ExtractError {
    pub fn preview(&self) -> Option<&str> {
        match self {
            ExtractError::Parse { preview, .. } => Some(preview),
            ExtractError::Schema { .. } => None,
        }
    }
}

/// `applies` checks for the layout marker; `slice` cuts the candidate out.
pub struct Strategy {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub slice: fn(&str) -> Option<&str>,
}

pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "json_fence",
        applies: |t| t.contains(JSON_FENCE),
        slice: json_fence,
    },
    Strategy {
        name: "any_fence",
        applies: |t| t.contains(FENCE),
        slice: any_fence,
    },
    Strategy {
        name: "brace_span",
        applies: |t| t.contains('{') && t.contains('}'),
        slice: brace_span,
    },
];

pub fn json_fence(text: &str) -> Option<&str> {
    let start = text.find(JSON_FENCE)? + JSON_FENCE.len();
    let len = text[start..].find(FENCE)?;
    Some(text[start..start + len].trim())
}

pub fn any_fence(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let len = text[start..].find(FENCE)?;
    Some(text[start..start + len].trim())
}

pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(text[start..=end].trim())
}

/// The slice that will be handed to the JSON parser.
pub fn candidate(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(strategy) = STRATEGIES.iter().find(|s| (s.applies)(trimmed)) else {
        return trimmed;
    };
    match (strategy.slice)(trimmed) {
        Some(found) => {
            tracing::debug!(target: "extract", strategy = strategy.name, len = found.len(), "candidate located");
            found
        }
        None => {
            tracing::debug!(target: "extract", strategy = strategy.name, "unclosed block, using whole text");
            trimmed
        }
    }
}

pub fn preview(raw: &str) -> String {
    raw.chars().take(PREVIEW_CHARS).collect()
}

/// Parse model output into a JSON object that carries an `events` key.
pub fn extract(raw: &str) -> Result<Value, ExtractError> {
    let value: Value =
        serde_json::from_str(candidate(raw)).map_err(|source| ExtractError::Parse {
            source,
            preview: preview(raw),
        })?;

    if value.get(EVENTS_KEY).is_none() {
        return Err(ExtractError::Schema { key: EVENTS_KEY });
    }
    Ok(value)
}
