// src/config/discovery.rs
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::DiscoveryError;
use crate::llm::DEFAULT_OPENAI_BASE_URL;
use crate::search::serper::DEFAULT_SERPER_BASE_URL;

/// Placeholder meaning "read the key from the environment".
pub const ENV_PLACEHOLDER: &str = "ENV";

fn default_model() -> String {
    "gpt-4".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_top_p() -> f32 {
    0.8
}
fn default_search_queries() -> Vec<String> {
    vec!["breaking news today".into()]
}
fn default_results_per_query() -> usize {
    10
}
fn default_max_articles() -> usize {
    10
}
fn default_event_count() -> usize {
    7
}
fn default_results_dir() -> String {
    "results".into()
}
fn default_prompts_dir() -> String {
    "prompts".into()
}
fn default_env() -> String {
    ENV_PLACEHOLDER.into()
}
fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.into()
}
fn default_serper_base_url() -> String {
    DEFAULT_SERPER_BASE_URL.into()
}

/// Which external credential to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    OpenAi,
    Serper,
}

impl Credential {
    pub fn env_var(&self) -> &'static str {
        match self {
            Credential::OpenAi => "OPENAI_API_KEY",
            Credential::Serper => "SERPER_API_KEY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_model")]
    pub llm_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_search_queries")]
    pub search_queries: Vec<String>,
    #[serde(default = "default_results_per_query")]
    pub results_per_query: usize,
    /// Articles embedded in the analysis prompt.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Events the model is asked to select.
    #[serde(default = "default_event_count")]
    pub event_count: usize,
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,
    /// Literal key, or "ENV" to read `OPENAI_API_KEY`.
    #[serde(default = "default_env")]
    pub openai_api_key: String,
    /// Literal key, or "ENV" to read `SERPER_API_KEY`.
    #[serde(default = "default_env")]
    pub serper_api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_serper_base_url")]
    pub serper_base_url: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            llm_model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            search_queries: default_search_queries(),
            results_per_query: default_results_per_query(),
            max_articles: default_max_articles(),
            event_count: default_event_count(),
            results_dir: default_results_dir(),
            prompts_dir: default_prompts_dir(),
            openai_api_key: default_env(),
            serper_api_key: default_env(),
            openai_base_url: default_openai_base_url(),
            serper_base_url: default_serper_base_url(),
        }
    }
}

impl DiscoveryConfig {
    /// Clamp out-of-range values back into something usable.
    pub fn sanitize(mut self) -> Self {
        if !(0.0..=2.0).contains(&self.temperature) {
            self.temperature = default_temperature();
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            self.top_p = default_top_p();
        }
        self.max_tokens = self.max_tokens.max(1);
        self.results_per_query = self.results_per_query.clamp(1, 100);
        self.max_articles = self.max_articles.clamp(1, 10);
        self.event_count = self.event_count.max(1);

        self.search_queries = self
            .search_queries
            .iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if self.search_queries.is_empty() {
            self.search_queries = default_search_queries();
        }
        self
    }

    /// Resolve an API key. "ENV" (any case) or an empty value reads the env var;
    /// an absent or blank variable is a `MissingCredential` error.
    pub fn resolve_credential(&self, which: Credential) -> Result<String, DiscoveryError> {
        let configured = match which {
            Credential::OpenAi => &self.openai_api_key,
            Credential::Serper => &self.serper_api_key,
        };
        let trimmed = configured.trim();
        if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(ENV_PLACEHOLDER) {
            return Ok(trimmed.to_string());
        }
        match env::var(which.env_var()) {
            Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Err(DiscoveryError::MissingCredential(which.env_var())),
        }
    }
}
