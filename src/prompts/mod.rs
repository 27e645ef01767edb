// src/prompts/mod.rs
//! Context-aware prompt generation.

pub mod context;
pub mod generator;
pub mod log;
pub mod preferences;
pub mod tables;

pub use context::{EventType, Platform, PromptContext, UrgencyLevel};
pub use generator::{PromptGenerator, TemplateKind};
pub use log::{FilePromptLog, MemoryPromptLog, PromptLogStore, PromptUsage};
pub use preferences::UserPreferences;
