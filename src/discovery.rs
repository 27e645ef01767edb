// src/discovery.rs
//! Trending-events discovery: search → analysis prompt → LLM → extract →
//! materialize → display → persist. One attempt per external call.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::config::{Credential, DiscoveryConfig};
use crate::error::DiscoveryError;
use crate::extract::{extract, ExtractError};
use crate::llm::{build_client_from_config, CompletionRequest, DynLlmClient};
use crate::materialize::materialize_events;
use crate::models::TrendingEvent;
use crate::persist::{save_result, ResultFile, ResultMetadata};
use crate::prompts::generator::ANALYST_SYSTEM_PROMPT;
use crate::prompts::{EventType, PromptContext, PromptGenerator, UrgencyLevel};
use crate::search::serper::SerperProvider;
use crate::search::{search_all, SearchProvider};
use crate::{present, telemetry};

/// Step name used for result files.
pub const RESULT_STEP: &str = "trending_events";
const CONTEXT_NAME: &str = "trending_discovery";

/// Outcome of one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryReport {
    pub events: Vec<TrendingEvent>,
    pub article_count: usize,
    /// `None` when writing the result file failed.
    pub saved_to: Option<PathBuf>,
}

/// Parse a raw model answer into ranked events.
pub fn events_from_response(raw: &str) -> Result<Vec<TrendingEvent>, ExtractError> {
    let doc = extract(raw)?;
    Ok(materialize_events(&doc))
}

pub struct TrendingEventsDiscoverer {
    cfg: DiscoveryConfig,
    search: Arc<dyn SearchProvider>,
    llm: DynLlmClient,
    prompts: PromptGenerator,
    echo: bool,
}

impl TrendingEventsDiscoverer {
    /// Wire up the Serper and OpenAI clients. A missing key fails here, before any run.
    pub fn from_config(cfg: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let serper_key = cfg.resolve_credential(Credential::Serper)?;
        let search = SerperProvider::new(serper_key, cfg.serper_base_url.clone())
            .map_err(DiscoveryError::Setup)?
            .with_num_results(cfg.results_per_query);
        let llm = build_client_from_config(&cfg)?;
        let prompts = PromptGenerator::from_dir(&cfg.prompts_dir);
        info!(provider = llm.provider_name(), model = %cfg.llm_model, "discoverer ready");
        Ok(Self::new(cfg, Arc::new(search), llm, prompts))
    }

    pub fn new(
        cfg: DiscoveryConfig,
        search: Arc<dyn SearchProvider>,
        llm: DynLlmClient,
        prompts: PromptGenerator,
    ) -> Self {
        Self {
            cfg: cfg.sanitize(),
            search,
            llm,
            prompts,
            echo: true,
        }
    }

    /// Turn console output off (logs and result files are unaffected).
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.cfg
    }

    /// Urgency for runs where the caller named none (the preferred bias).
    pub fn default_urgency(&self) -> UrgencyLevel {
        self.prompts.default_urgency()
    }

    /// Run once, surfacing every failure to the caller.
    pub async fn try_discover(
        &self,
        urgency: UrgencyLevel,
        focus: EventType,
    ) -> Result<DiscoveryReport, DiscoveryError> {
        telemetry::record_run();
        if self.echo {
            present::print_intro();
        }

        let articles = search_all(self.search.as_ref(), &self.cfg.search_queries).await;
        if articles.is_empty() {
            warn!(provider = self.search.name(), "no news found, check the search API connection");
            return Err(DiscoveryError::EmptyUpstream);
        }
        telemetry::record_articles(articles.len());

        let ctx = PromptContext::new(CONTEXT_NAME, focus).with_urgency(urgency);
        let used = articles.len().min(self.cfg.max_articles);
        let prompt = self
            .prompts
            .news_analysis(&articles[..used], self.cfg.event_count, &ctx);

        let req = CompletionRequest {
            system: ANALYST_SYSTEM_PROMPT.to_string(),
            prompt,
            model: self.cfg.llm_model.clone(),
            temperature: self.cfg.temperature,
            max_tokens: self.cfg.max_tokens,
            top_p: self.cfg.top_p,
        };
        let t0 = Instant::now();
        let raw = self.llm.complete(&req).await.map_err(DiscoveryError::Llm)?;
        telemetry::record_llm_latency(t0.elapsed().as_secs_f64() * 1000.0);

        let events = events_from_response(&raw).map_err(|e| {
            telemetry::record_extract_failure();
            warn!(
                error = %e,
                preview = e.preview().unwrap_or_default(),
                "model response unusable"
            );
            DiscoveryError::from(e)
        })?;
        telemetry::record_events(events.len());
        info!(events = events.len(), articles = articles.len(), "discovery complete");

        if self.echo {
            present::print_events(&events);
        }
        let saved_to = self.save(&events, &ctx);

        Ok(DiscoveryReport {
            events,
            article_count: articles.len(),
            saved_to,
        })
    }

    /// Run once; any failure is logged and yields an empty list.
    pub async fn discover(&self, urgency: UrgencyLevel, focus: EventType) -> Vec<TrendingEvent> {
        match self.try_discover(urgency, focus).await {
            Ok(report) => report.events,
            Err(e) => {
                error!(error = %e, "discovery failed");
                if self.echo {
                    present::print_failure(&e);
                }
                Vec::new()
            }
        }
    }

    fn save(&self, events: &[TrendingEvent], ctx: &PromptContext) -> Option<PathBuf> {
        let file = ResultFile {
            metadata: ResultMetadata {
                timestamp: chrono::Local::now().to_rfc3339(),
                urgency_level: ctx.urgency.to_string(),
                event_type: ctx.event_type.to_string(),
                total_events: events.len(),
                search_queries: self.cfg.search_queries.clone(),
            },
            events: events.to_vec(),
        };
        let dir = PathBuf::from(&self.cfg.results_dir);
        match save_result(&dir, RESULT_STEP, ctx.event_type.as_str(), &file) {
            Ok(path) => Some(path),
            Err(e) => {
                telemetry::record_persist_failure();
                warn!(error = ?e, dir = %dir.display(), "could not save results");
                None
            }
        }
    }
}
