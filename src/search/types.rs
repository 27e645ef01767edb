// src/search/types.rs
use anyhow::Result;

/// One news result. Every field is optional on the wire.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one news query. "No results" is `Ok(vec![])`, not an error.
    async fn search(&self, query: &str) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}
