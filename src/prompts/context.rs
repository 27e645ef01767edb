// src/prompts/context.rs
//! Typed inputs for prompt rendering.
//!
//! String tags coming from callers (CLI args, config, model output) are parsed
//! leniently: unknown event types and platforms are kept as values that
//! resolve to the generic table entries, never as errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How urgently the caller needs results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "high",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::Low => "low",
        }
    }

    /// Parse a tag; anything unrecognized becomes `Medium`.
    pub fn parse_lossy(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::warn!(tag, "unknown urgency level, using medium");
            UrgencyLevel::Medium
        })
    }
}

impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(UrgencyLevel::High),
            "medium" => Ok(UrgencyLevel::Medium),
            "low" => Ok(UrgencyLevel::Low),
            other => Err(format!("unsupported urgency level: {other}")),
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse event category used to pick template wording.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Political,
    Environmental,
    Social,
    Economic,
    Technology,
    Security,
    /// Any other tag ("global", "cultural", ...). Resolves to generic wording.
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Political => "political",
            EventType::Environmental => "environmental",
            EventType::Social => "social",
            EventType::Economic => "economic",
            EventType::Technology => "technology",
            EventType::Security => "security",
            EventType::Other(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "political" => EventType::Political,
            "environmental" => EventType::Environmental,
            "social" => EventType::Social,
            "economic" => EventType::Economic,
            "technology" => EventType::Technology,
            "security" => EventType::Security,
            _ => EventType::Other(tag.trim().to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        EventType::from(tag.as_str())
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content platform targeted by a retrieval prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    SocialPost,
    Video,
    Official,
    LiveFeed,
}

impl Platform {
    /// Resolve a caller tag. Unknown tags fall back to `SocialPost`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "twitter" | "social" | "social_post" | "social-post" => Platform::SocialPost,
            "youtube" | "video" => Platform::Video,
            "official" => Platform::Official,
            "webcam" | "live" | "live_feed" | "live-feed" => Platform::LiveFeed,
            _ => Platform::SocialPost,
        }
    }
}

/// Everything prompt rendering may depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptContext {
    pub event_name: String,
    pub event_type: EventType,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub urgency: UrgencyLevel,
    #[serde(default = "default_time_sensitive")]
    pub time_sensitive: bool,
    #[serde(default)]
    pub user_preferences: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub previous_results: HashMap<String, serde_json::Value>,
}

fn default_time_sensitive() -> bool {
    true
}

impl PromptContext {
    pub fn new(event_name: impl Into<String>, event_type: impl Into<EventType>) -> Self {
        Self {
            event_name: event_name.into(),
            event_type: event_type.into(),
            locations: Vec::new(),
            urgency: UrgencyLevel::default(),
            time_sensitive: default_time_sensitive(),
            user_preferences: HashMap::new(),
            previous_results: HashMap::new(),
        }
    }

    pub fn with_urgency(mut self, urgency: UrgencyLevel) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time_sensitivity(mut self, time_sensitive: bool) -> Self {
        self.time_sensitive = time_sensitive;
        self
    }
}
