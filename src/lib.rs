// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod llm;
pub mod materialize;
pub mod models;
pub mod persist;
pub mod present;
pub mod prompts;
pub mod search;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::discovery::{events_from_response, DiscoveryReport, TrendingEventsDiscoverer};
pub use crate::error::DiscoveryError;
pub use crate::extract::{extract, ExtractError};
pub use crate::materialize::materialize;
pub use crate::models::TrendingEvent;
pub use crate::prompts::{EventType, PromptContext, PromptGenerator, UrgencyLevel};
