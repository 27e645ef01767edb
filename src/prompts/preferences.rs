// src/prompts/preferences.rs
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// User customization read from `user_preferences.json`.
///
/// `location_focus` fills empty prompt locations and `urgency_bias` is the
/// urgency used when the caller names none. `preferred_sources` and
/// `event_type_priority` are carried for the file format only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default = "default_preferred_sources")]
    pub preferred_sources: Vec<String>,
    #[serde(default = "default_urgency_bias")]
    pub urgency_bias: String,
    #[serde(default)]
    pub location_focus: Vec<String>,
    #[serde(default = "default_event_type_priority")]
    pub event_type_priority: Vec<String>,
}

fn default_preferred_sources() -> Vec<String> {
    vec!["twitter".into(), "youtube".into(), "official".into()]
}

fn default_urgency_bias() -> String {
    "medium".into()
}

fn default_event_type_priority() -> Vec<String> {
    vec!["political".into(), "environmental".into(), "social".into()]
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            preferred_sources: default_preferred_sources(),
            urgency_bias: default_urgency_bias(),
            location_focus: Vec::new(),
            event_type_priority: default_event_type_priority(),
        }
    }
}

impl UserPreferences {
    /// Load from a JSON file. Falls back to defaults on any error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let p = UserPreferences::load_from_file("does/not/exist.json");
        assert_eq!(p, UserPreferences::default());
        assert_eq!(p.urgency_bias, "medium");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_preferences.json");
        fs::write(&path, r#"{"location_focus": ["Berlin"]}"#).unwrap();
        let p = UserPreferences::load_from_file(&path);
        assert_eq!(p.location_focus, vec!["Berlin".to_string()]);
        assert_eq!(p.preferred_sources.len(), 3);
    }
}
