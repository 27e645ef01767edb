// src/search/fixture.rs
use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::search::types::{Article, SearchProvider};

/// Returns the same articles for every query. Built from a fixture or a list.
/// No HTTP; used by tests and offline runs.
pub struct StaticSearchProvider {
    pub articles: Vec<Article>,
}

impl StaticSearchProvider {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Parse a Serper-shaped JSON document (`{"news": [...]}`) or a bare array.
    pub fn from_fixture(content: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(content).context("parsing search fixture")?;
        let list = value.get("news").cloned().unwrap_or(value);
        let articles = serde_json::from_value(list).context("reading fixture articles")?;
        Ok(Self { articles })
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
