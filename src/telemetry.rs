// src/telemetry.rs
//! Discovery metrics. Library code only records; `Metrics::init` installs the
//! Prometheus recorder for callers that want a snapshot.

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// Env flag for the binary: print a Prometheus snapshot after the run.
pub const ENV_METRICS: &str = "EVENT_SCOUT_METRICS";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if a recorder is already set.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Prometheus exposition text for everything recorded so far.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// One-time metrics registration (so series show up once a recorder is installed).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("discovery_runs_total", "Discovery runs started.");
        describe_counter!(
            "discovery_articles_total",
            "Articles returned by the search provider."
        );
        describe_counter!(
            "discovery_events_total",
            "Events materialized from model output."
        );
        describe_counter!(
            "discovery_extract_failures_total",
            "Model responses that could not be parsed or lacked the events key."
        );
        describe_counter!(
            "discovery_skipped_elements_total",
            "Malformed event entries skipped during materialization."
        );
        describe_counter!(
            "discovery_persist_failures_total",
            "Result files that could not be written."
        );
        describe_histogram!("discovery_llm_ms", "LLM completion latency in milliseconds.");
        describe_histogram!("search_request_ms", "Search request latency in milliseconds.");
    });
}

pub fn record_run() {
    ensure_metrics_described();
    counter!("discovery_runs_total").increment(1);
}

pub fn record_articles(n: usize) {
    counter!("discovery_articles_total").increment(n as u64);
}

pub fn record_events(n: usize) {
    counter!("discovery_events_total").increment(n as u64);
}

pub fn record_extract_failure() {
    counter!("discovery_extract_failures_total").increment(1);
}

pub fn record_skipped_element() {
    counter!("discovery_skipped_elements_total").increment(1);
}

pub fn record_persist_failure() {
    counter!("discovery_persist_failures_total").increment(1);
}

pub fn record_llm_latency(ms: f64) {
    histogram!("discovery_llm_ms").record(ms);
}
