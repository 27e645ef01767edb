// src/persist.rs
//! Result files: `{step}_{slug}_{YYYYMMDD_HHMMSS}.json` under the results dir.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::TrendingEvent;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Keep alphanumerics, space, hyphen and underscore; whitespace runs become one `_`.
///
/// `"Event With Spaces & Special!"` → `"Event_With_Spaces_Special"`.
pub fn sanitize_event_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Like `sanitize_event_name`, but also keeps dots (for names carrying an extension).
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn format_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn result_filename(step: &str, event_name: &str, timestamp: &str) -> String {
    let slug = sanitize_event_name(event_name);
    let slug = if slug.is_empty() { "unknown" } else { slug.as_str() };
    format!("{step}_{slug}_{timestamp}.json")
}

/// Metadata block written next to the events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub timestamp: String,
    pub urgency_level: String,
    pub event_type: String,
    pub total_events: usize,
    #[serde(default)]
    pub search_queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    pub metadata: ResultMetadata,
    pub events: Vec<TrendingEvent>,
}

/// Pretty-print `data` to a new timestamped file in `dir` (created if needed).
pub fn save_result<T: Serialize>(
    dir: &Path,
    step: &str,
    event_name: &str,
    data: &T,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(result_filename(step, event_name, &format_timestamp()));
    let json = serde_json::to_string_pretty(data).context("serializing result")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "results saved");
    Ok(path)
}

pub fn load_result(path: &Path) -> Result<serde_json::Value> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("result file not found: {}", path.display()))?;
    let v = serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), "results loaded");
    Ok(v)
}
