// src/search/mod.rs
pub mod fixture;
pub mod serper;
pub mod types;

pub use fixture::StaticSearchProvider;
pub use serper::SerperProvider;
pub use types::{Article, SearchProvider};

/// Snippets longer than this are cut before they reach a prompt.
pub const SNIPPET_MAX_CHARS: usize = 400;

/// Normalize a search snippet: decode entities, strip tags, fold quotes and whitespace.
pub fn normalize_snippet(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize curly quotes to ASCII
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > SNIPPET_MAX_CHARS {
        out = out.chars().take(SNIPPET_MAX_CHARS).collect();
    }
    out
}

/// Run every query once, in order. A failing query is logged and skipped.
pub async fn search_all(provider: &dyn SearchProvider, queries: &[String]) -> Vec<Article> {
    let mut all = Vec::new();
    for q in queries {
        match provider.search(q).await {
            Ok(mut found) => {
                tracing::info!(provider = provider.name(), query = %q, found = found.len(), "search done");
                all.append(&mut found);
            }
            Err(e) => {
                tracing::warn!(error = ?e, provider = provider.name(), query = %q, "search failed");
            }
        }
    }
    all
}
