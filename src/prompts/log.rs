// src/prompts/log.rs
//! Prompt usage log: one JSON document keyed by template kind.
//!
//! Stores are injected into the generator. Writes are serialized behind a
//! `Mutex`, so a store can be shared between tasks.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded prompt rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptUsage {
    pub timestamp: String,
    pub context: BTreeMap<String, String>,
    /// Reserved for later backfilling; always written as `null`.
    pub success: Option<bool>,
}

impl PromptUsage {
    pub fn now(context: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            context,
            success: None,
        }
    }
}

/// The whole log document.
pub type UsageDocument = BTreeMap<String, Vec<PromptUsage>>;

pub trait PromptLogStore: Send + Sync {
    fn append(&self, kind: &str, entry: PromptUsage) -> Result<()>;
}

/// Keeps everything in memory. Used by tests and by callers that do not
/// want a file on disk.
#[derive(Debug, Default)]
pub struct MemoryPromptLog {
    doc: Mutex<UsageDocument>,
}

impl MemoryPromptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> UsageDocument {
        self.doc.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl PromptLogStore for MemoryPromptLog {
    fn append(&self, kind: &str, entry: PromptUsage) -> Result<()> {
        let mut doc = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        doc.entry(kind.to_string()).or_default().push(entry);
        Ok(())
    }
}

/// Rewrites `prompt_performance.json` (or any path) after every append.
#[derive(Debug)]
pub struct FilePromptLog {
    path: PathBuf,
    doc: Mutex<UsageDocument>,
}

impl FilePromptLog {
    /// Open a log at `path`, seeding it with whatever parses from an existing file.
    /// An unreadable or corrupt file starts an empty document.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str::<UsageDocument>(&s).ok())
            .unwrap_or_default();
        Self {
            path,
            doc: Mutex::new(doc),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PromptLogStore for FilePromptLog {
    fn append(&self, kind: &str, entry: PromptUsage) -> Result<()> {
        let mut doc = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        doc.entry(kind.to_string()).or_default().push(entry);
        write_document(&self.path, &doc)
    }
}

fn write_document(path: &Path, doc: &UsageDocument) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating prompt log dir {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");
    let written = (|| -> Result<()> {
        let mut f = fs::File::create(&tmp)
            .with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(json.as_bytes())?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))
    })();
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(name: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("event_name".to_string(), name.to_string())])
    }

    #[test]
    fn failed_write_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the log file should be makes the rename fail.
        let path = dir.path().join("prompt_performance.json");
        fs::create_dir(&path).unwrap();

        let log = FilePromptLog::open(&path);
        assert!(log.append("trending_events", PromptUsage::now(ctx("a"))).is_err());
        assert!(!dir.path().join("prompt_performance.json.tmp").exists());
    }

    #[test]
    fn memory_log_groups_by_kind() {
        let log = MemoryPromptLog::new();
        log.append("trending_events", PromptUsage::now(ctx("a"))).unwrap();
        log.append("trending_events", PromptUsage::now(ctx("b"))).unwrap();
        log.append("event_analysis", PromptUsage::now(ctx("c"))).unwrap();
        let doc = log.snapshot();
        assert_eq!(doc["trending_events"].len(), 2);
        assert_eq!(doc["event_analysis"].len(), 1);
    }

    #[test]
    fn file_log_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts").join("prompt_performance.json");

        let log = FilePromptLog::open(&path);
        log.append("trending_events", PromptUsage::now(ctx("a"))).unwrap();
        drop(log);

        let reopened = FilePromptLog::open(&path);
        reopened
            .append("trending_events", PromptUsage::now(ctx("b")))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entries = doc["trending_events"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0]["success"].is_null());
        assert_eq!(entries[1]["context"]["event_name"], "b");
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt_performance.json");
        fs::write(&path, "{ not json").unwrap();
        let log = FilePromptLog::open(&path);
        log.append("event_analysis", PromptUsage::now(ctx("x"))).unwrap();
        let doc: UsageDocument =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc.len(), 1);
    }
}
