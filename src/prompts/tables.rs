// src/prompts/tables.rs
//! Fixed lookup tables behind prompt rendering. Every lookup is total:
//! unknown keys land on the generic entry.

use super::context::{EventType, Platform, UrgencyLevel};

pub const GENERIC_EVENT_GLYPH: &str = "🎯";

/// Display glyph plus the two instruction fragments used for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    pub glyph: &'static str,
    pub focus: &'static str,
    pub metrics: &'static str,
}

pub fn urgency_glyph(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::High => "🔥",
        UrgencyLevel::Medium => "⚖️",
        UrgencyLevel::Low => "🌱",
    }
}

/// How many items a retrieval prompt should ask for.
pub fn result_count_hint(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::High => "5-7",
        UrgencyLevel::Medium => "3-5",
        UrgencyLevel::Low => "2-3",
    }
}

pub fn analysis_depth(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::High => "🔥 **RAPID RESPONSE** - Immediate actionable intelligence",
        UrgencyLevel::Medium => {
            "⚖️ **COMPREHENSIVE** - Balanced analysis with multiple perspectives"
        }
        UrgencyLevel::Low => "🌱 **THOROUGH** - Deep dive with historical context",
    }
}

pub fn event_focus(event_type: &EventType) -> &'static str {
    match event_type {
        EventType::Political => {
            "🏛️ **Focus**: Political developments, policy changes, electoral events"
        }
        EventType::Environmental => {
            "🌍 **Focus**: Environmental incidents, climate events, natural disasters"
        }
        EventType::Social => {
            "👥 **Focus**: Social movements, community events, cultural developments"
        }
        EventType::Economic => {
            "💰 **Focus**: Market movements, economic policy, business developments"
        }
        EventType::Technology => {
            "💻 **Focus**: Tech launches, cyber events, innovation announcements"
        }
        EventType::Security => {
            "🛡️ **Focus**: Security incidents, safety events, emergency responses"
        }
        EventType::Other(_) => "🎯 **Focus**: All significant real-time developments",
    }
}

pub fn event_glyph(event_type: &EventType) -> &'static str {
    match event_type {
        EventType::Political => "🏛️",
        EventType::Environmental => "🌍",
        EventType::Social => "👥",
        EventType::Economic => "💰",
        EventType::Technology => "💻",
        EventType::Security => "🛡️",
        EventType::Other(_) => GENERIC_EVENT_GLYPH,
    }
}

/// Ordered source list for the analysis prompt.
pub fn source_priorities(event_type: &EventType) -> &'static str {
    match event_type {
        EventType::Political => concat!(
            "**🏛️ Official Government Sources** (Highest Priority)\n",
            "**🐦 Political Social Media** (Real-time reactions)\n",
            "**📺 News Live Streams** (Breaking coverage)\n",
            "**📹 Live Event Feeds** (Direct visuals)",
        ),
        EventType::Environmental => concat!(
            "**🌍 Environmental Agencies** (Official data)\n",
            "**📹 Live Webcams/Satellite** (Real-time visuals)\n",
            "**🐦 Eyewitness Social Media** (Ground reports)\n",
            "**📺 Scientific/News Sources** (Expert analysis)",
        ),
        _ => concat!(
            "**🐦 Social Media Updates** (Real-time pulse)\n",
            "**📺 Video Coverage** (Visual documentation)\n",
            "**🏛️ Official Statements** (Authoritative sources)\n",
            "**📹 Live Visual Feeds** (Direct observation)",
        ),
    }
}

pub fn platform_profile(platform: Platform) -> PlatformProfile {
    match platform {
        Platform::SocialPost => PlatformProfile {
            glyph: "🐦",
            focus: "real-time updates, eyewitness accounts, official statements",
            metrics: "engagement rates, verification status, recency",
        },
        Platform::Video => PlatformProfile {
            glyph: "📺",
            focus: "live streams, recent uploads, authoritative channels",
            metrics: "view counts, upload recency, channel credibility",
        },
        Platform::Official => PlatformProfile {
            glyph: "🏛️",
            focus: "government statements, agency reports, verified sources",
            metrics: "source authority, document recency, official verification",
        },
        Platform::LiveFeed => PlatformProfile {
            glyph: "📹",
            focus: "live feeds, real-time visuals, geographic coverage",
            metrics: "stream quality, viewer count, location accuracy",
        },
    }
}

pub fn location_instruction(locations: &[String]) -> String {
    if locations.is_empty() {
        return "🌍 **Geographic Scope**: Global events with significant impact".to_string();
    }
    format!(
        "📍 **Priority Regions**: Focus on events in or affecting {}",
        locations.join(", ")
    )
}
