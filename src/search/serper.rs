// src/search/serper.rs
//! Serper news search (`POST /news`).

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use serde::Serialize;
use std::time::Duration;

use crate::search::types::{Article, SearchProvider};

pub const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";

pub struct SerperProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    num_results: usize,
}

#[derive(Serialize)]
struct NewsRequest<'a> {
    q: &'a str,
    num: usize,
}

impl SerperProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("event-scout/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(15))
            .build()
            .context("building serper http client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            num_results: 10,
        })
    }

    pub fn with_num_results(mut self, n: usize) -> Self {
        self.num_results = n.max(1);
        self
    }
}

#[async_trait]
impl SearchProvider for SerperProvider {
    async fn search(&self, query: &str) -> Result<Vec<Article>> {
        let t0 = std::time::Instant::now();
        let resp = self
            .http
            .post(format!("{}/news", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&NewsRequest {
                q: query,
                num: self.num_results,
            })
            .send()
            .await
            .context("sending serper news request")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("serper returned HTTP {status}");
        }

        let body: serde_json::Value = resp.json().await.context("decoding serper response")?;
        histogram!("search_request_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        let Some(news) = body.get("news") else {
            let keys: Vec<&str> = body
                .as_object()
                .map(|o| o.keys().map(String::as_str).collect())
                .unwrap_or_default();
            tracing::warn!(?keys, query, "no news found in search response");
            return Ok(Vec::new());
        };

        let articles: Vec<Article> =
            serde_json::from_value(news.clone()).context("parsing serper news entries")?;
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "serper"
    }
}
