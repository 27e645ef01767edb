// src/materialize.rs
//! Turn untyped event entries into `TrendingEvent`s.
//!
//! Each entry is handled on its own. An entry that cannot be read is skipped
//! with a warning, and indices are assigned over the *kept* entries so the
//! output is always numbered 1..=n without gaps.

use serde_json::{Map, Value};

use crate::extract::EVENTS_KEY;
use crate::models::TrendingEvent;

pub const DEFAULT_TITLE: &str = "Unknown Event";
pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_LOCATION: &str = "Unknown Location";
pub const DEFAULT_EMOJI: &str = "📍";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElementError {
    #[error("entry is {0}, expected an object")]
    NotAnObject(&'static str),
    #[error("field '{field}' holds {kind}, expected text")]
    BadField { field: &'static str, kind: &'static str },
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read one text field. Missing or null → default; scalars are rendered as text.
fn text_field(
    obj: &Map<String, Value>,
    field: &'static str,
    default: &str,
) -> Result<String, ElementError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(v) => Err(ElementError::BadField {
            field,
            kind: kind_of(v),
        }),
    }
}

/// Build a single event, applying the named defaults.
pub fn event_from_value(entry: &Value, index: usize) -> Result<TrendingEvent, ElementError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| ElementError::NotAnObject(kind_of(entry)))?;
    Ok(TrendingEvent {
        title: text_field(obj, "title", DEFAULT_TITLE)?,
        description: text_field(obj, "description", DEFAULT_DESCRIPTION)?,
        location: text_field(obj, "location", DEFAULT_LOCATION)?,
        emoji: text_field(obj, "emoji", DEFAULT_EMOJI)?,
        index,
    })
}

/// Materialize every entry that can be read. Never fails; may return empty.
pub fn materialize(entries: &[Value]) -> Vec<TrendingEvent> {
    let mut out = Vec::with_capacity(entries.len());
    for (pos, entry) in entries.iter().enumerate() {
        match event_from_value(entry, out.len() + 1) {
            Ok(ev) => out.push(ev),
            Err(e) => {
                tracing::warn!(position = pos + 1, error = %e, "skipping malformed event");
                crate::telemetry::record_skipped_element();
            }
        }
    }
    out
}

/// Materialize the `events` array of an extracted document.
pub fn materialize_events(doc: &Value) -> Vec<TrendingEvent> {
    match doc.get(EVENTS_KEY) {
        Some(Value::Array(items)) => materialize(items),
        Some(other) => {
            tracing::warn!(kind = kind_of(other), "'events' is not an array");
            Vec::new()
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_fields() {
        let out = materialize(&[json!({"title": "Only title"})]);
        assert_eq!(
            out,
            vec![TrendingEvent {
                title: "Only title".into(),
                description: DEFAULT_DESCRIPTION.into(),
                location: DEFAULT_LOCATION.into(),
                emoji: DEFAULT_EMOJI.into(),
                index: 1,
            }]
        );
    }

    #[test]
    fn null_counts_as_missing_and_scalars_become_text() {
        let ev = event_from_value(&json!({"title": null, "location": 42}), 3).unwrap();
        assert_eq!(ev.title, DEFAULT_TITLE);
        assert_eq!(ev.location, "42");
        assert_eq!(ev.index, 3);
    }

    #[test]
    fn skipped_entries_leave_no_gap() {
        let entries = vec![
            json!({"title": "A"}),
            json!("just a string"),
            json!({"title": ["nested"]}),
            json!({"title": "B"}),
        ];
        let out = materialize(&entries);
        let got: Vec<(usize, &str)> = out.iter().map(|e| (e.index, e.title.as_str())).collect();
        assert_eq!(got, vec![(1, "A"), (2, "B")]);
    }

    #[test]
    fn element_errors_name_the_problem() {
        assert_eq!(
            event_from_value(&json!(7), 1).unwrap_err(),
            ElementError::NotAnObject("a number")
        );
        assert_eq!(
            event_from_value(&json!({"emoji": {}}), 1).unwrap_err(),
            ElementError::BadField {
                field: "emoji",
                kind: "an object"
            }
        );
    }

    #[test]
    fn non_array_events_yield_nothing() {
        assert!(materialize_events(&json!({"events": {"title": "x"}})).is_empty());
        assert!(materialize_events(&json!({"events": []})).is_empty());
    }
}
