// src/models.rs
//! Plain value records passed between the discovery stages.
//!
//! Nothing here owns behavior beyond construction helpers; every record is
//! immutable after it is built and round-trips through serde.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Untyped metadata attached to content and map items.
pub type Metadata = HashMap<String, serde_json::Value>;

/// One trending event as shown to the user. `index` is 1-based and dense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub emoji: String,
    pub index: usize,
}

/// A planned retrieval against one content category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub category: String,
    pub query: String,
    pub purpose: String,
}

/// Output of the event-analysis stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAnalysis {
    pub event_name: String,
    pub summary: String,
    pub locations: Vec<String>,
    pub search_queries: Vec<SearchQuery>,
}

/// Fields shared by every platform variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub content: String,
    pub timestamp: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPostItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub username: String,
    pub likes: u64,
    pub shares: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub channel_name: String,
    pub views: u64,
    pub likes: u64,
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficialItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub agency: String,
    pub report_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFeedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub is_live: bool,
    pub viewer_count: Option<u64>,
}

/// Every content item gathered for one event at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedData {
    pub event_name: String,
    pub locations: Vec<String>,
    pub social: Vec<SocialPostItem>,
    pub video: Vec<VideoItem>,
    pub official: Vec<OfficialItem>,
    pub live_feed: Vec<LiveFeedItem>,
    pub timestamp: String,
}

impl NormalizedData {
    /// Total number of items across all platforms.
    pub fn total_items(&self) -> usize {
        self.social.len() + self.video.len() + self.official.len() + self.live_feed.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form accuracy descriptor ("city", "exact", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
}

/// One item ready for a map consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReadyItem {
    pub label: String,
    pub category: String,
    pub coordinates: Option<GeoCoordinate>,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Terminal hand-off shape for a mapping consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPayload {
    pub event_name: String,
    pub items: Vec<MapReadyItem>,
    pub created_at: String,
    pub total_items: usize,
}

impl MapPayload {
    /// Build a payload stamped with the current time; `total_items` follows `items`.
    pub fn new(event_name: impl Into<String>, items: Vec<MapReadyItem>) -> Self {
        Self {
            event_name: event_name.into(),
            total_items: items.len(),
            items,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
