// src/prompts/generator.rs
//! Prompt generator: context-driven templates plus a usage log.
//!
//! Rendering itself is pure (`render_*` functions). `PromptGenerator` wraps the
//! pure functions, records each rendering in its `PromptLogStore` and never
//! lets a log failure reach the caller.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::context::{Platform, PromptContext, UrgencyLevel};
use super::log::{FilePromptLog, MemoryPromptLog, PromptLogStore, PromptUsage};
use super::preferences::UserPreferences;
use super::tables;
use crate::search::{normalize_snippet, Article};

pub const PERFORMANCE_LOG_FILE: &str = "prompt_performance.json";
pub const USER_PREFERENCES_FILE: &str = "user_preferences.json";

/// Number of events the discovery prompts ask for.
pub const DEFAULT_EVENT_COUNT: usize = 7;
/// Articles embedded in the news analysis prompt.
pub const MAX_PROMPT_ARTICLES: usize = 10;

/// System instruction sent with the news analysis prompt.
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert intelligence analyst. Analyze real news data and extract the most significant events. Follow instructions precisely.";

/// Which template to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind<'a> {
    TrendingDiscovery,
    EventAnalysis,
    PlatformRetrieval { platform: &'a str, query: &'a str },
}

impl TemplateKind<'_> {
    /// Key used in the usage log.
    pub fn log_key(&self) -> String {
        match self {
            TemplateKind::TrendingDiscovery => "trending_events".to_string(),
            TemplateKind::EventAnalysis => "event_analysis".to_string(),
            TemplateKind::PlatformRetrieval { platform, .. } => {
                format!("{}_retrieval", platform.trim().to_ascii_lowercase())
            }
        }
    }
}

pub struct PromptGenerator {
    log: Arc<dyn PromptLogStore>,
    preferences: UserPreferences,
}

impl PromptGenerator {
    pub fn new(log: Arc<dyn PromptLogStore>) -> Self {
        Self {
            log,
            preferences: UserPreferences::default(),
        }
    }

    /// Generator backed by `<dir>/prompt_performance.json`, with preferences
    /// read from `<dir>/user_preferences.json` when present.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let log = Arc::new(FilePromptLog::open(dir.join(PERFORMANCE_LOG_FILE)));
        Self {
            log,
            preferences: UserPreferences::load_from_file(dir.join(USER_PREFERENCES_FILE)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPromptLog::new()))
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Urgency to use when the caller gave none: the preferred `urgency_bias`.
    pub fn default_urgency(&self) -> UrgencyLevel {
        UrgencyLevel::parse_lossy(&self.preferences.urgency_bias)
    }

    /// Render `kind` for `ctx` and record the usage.
    pub fn render(&self, kind: TemplateKind<'_>, ctx: &PromptContext) -> String {
        let ctx = self.apply_preferences(ctx);
        let text = match kind {
            TemplateKind::TrendingDiscovery => render_trending_discovery(&ctx),
            TemplateKind::EventAnalysis => render_event_analysis(&ctx),
            TemplateKind::PlatformRetrieval { platform, query } => {
                render_platform_retrieval(platform, query, &ctx)
            }
        };
        self.record(&kind, &ctx);
        text
    }

    pub fn trending_events(&self, ctx: &PromptContext) -> String {
        self.render(TemplateKind::TrendingDiscovery, ctx)
    }

    pub fn event_analysis(&self, ctx: &PromptContext) -> String {
        self.render(TemplateKind::EventAnalysis, ctx)
    }

    pub fn platform_retrieval(&self, platform: &str, query: &str, ctx: &PromptContext) -> String {
        self.render(TemplateKind::PlatformRetrieval { platform, query }, ctx)
    }

    /// Analysis prompt over fetched articles; the usage entry carries the article count.
    pub fn news_analysis(
        &self,
        articles: &[Article],
        event_count: usize,
        ctx: &PromptContext,
    ) -> String {
        let text = render_news_analysis(articles, event_count);
        let fields = BTreeMap::from([
            ("event_name".to_string(), ctx.event_name.clone()),
            ("event_type".to_string(), ctx.event_type.to_string()),
            ("urgency_level".to_string(), ctx.urgency.to_string()),
            (
                "article_count".to_string(),
                articles.len().min(MAX_PROMPT_ARTICLES).to_string(),
            ),
        ]);
        self.append_usage("news_analysis", fields);
        text
    }

    // Preferred regions only apply when the caller named none.
    fn apply_preferences<'c>(&self, ctx: &'c PromptContext) -> std::borrow::Cow<'c, PromptContext> {
        if ctx.locations.is_empty() && !self.preferences.location_focus.is_empty() {
            let mut owned = ctx.clone();
            owned.locations = self.preferences.location_focus.clone();
            std::borrow::Cow::Owned(owned)
        } else {
            std::borrow::Cow::Borrowed(ctx)
        }
    }

    fn record(&self, kind: &TemplateKind<'_>, ctx: &PromptContext) {
        let mut fields = BTreeMap::from([
            ("event_name".to_string(), ctx.event_name.clone()),
            ("event_type".to_string(), ctx.event_type.to_string()),
            ("urgency_level".to_string(), ctx.urgency.to_string()),
        ]);
        if let TemplateKind::PlatformRetrieval { query, .. } = kind {
            fields.insert("query".to_string(), query.to_string());
        }
        self.append_usage(&kind.log_key(), fields);
    }

    fn append_usage(&self, key: &str, fields: BTreeMap<String, String>) {
        if let Err(e) = self.log.append(key, PromptUsage::now(fields)) {
            tracing::warn!(error = ?e, kind = %key, "could not save prompt performance data");
        }
    }
}

pub fn render_trending_discovery(ctx: &PromptContext) -> String {
    let window = if ctx.time_sensitive {
        "✅ Events must be happening within the last 24 hours"
    } else {
        "✅ Events may have developed over the last week"
    };
    format!(
        r#"{glyph} **TRENDING EVENTS DISCOVERY - {urgency} PRIORITY**

You're an expert AI news scout with real-time awareness. Your mission:

🎯 **PRIMARY OBJECTIVE**: Identify {count} trending events happening RIGHT NOW
{focus}
{locations}

📋 **OUTPUT FORMAT** (for each event):
- 🏷️ **Event Title**: [Clear, specific title]
- 📝 **Description**: [One impactful sentence]
- 📍 **Location**: [Primary location/region]
- 🎨 **Visual**: [Relevant emoji for instant recognition]
- ⏰ **Time Context**: [How recent/urgent]

🎯 **QUALITY CRITERIA**:
{window}
✅ Prioritize events with real-time developments
✅ Focus on events with visual/social media coverage
✅ Include diverse geographic representation

🚀 **EXECUTION**: Present as numbered list, most urgent first!"#,
        glyph = tables::urgency_glyph(ctx.urgency),
        urgency = ctx.urgency.as_str().to_uppercase(),
        count = DEFAULT_EVENT_COUNT,
        focus = tables::event_focus(&ctx.event_type),
        locations = tables::location_instruction(&ctx.locations),
        window = window,
    )
}

pub fn render_event_analysis(ctx: &PromptContext) -> String {
    format!(
        r#"{glyph} **EVENT ANALYSIS & SEARCH STRATEGY**

🎯 **TARGET EVENT**: {name}
📊 **Analysis Level**: {depth}

### 📌 CONTEXTUAL SUMMARY
Provide a focused 2-3 sentence analysis covering:
- 🎯 **Core Issue**: What's the fundamental situation?
- 🌍 **Geographic Impact**: Where and why it matters
- ⏰ **Current Status**: What's happening right now

### 📍 IMPACT ZONES
{locations}
Identify key locations experiencing direct effects from this event.

### 🔍 INTELLIGENT SEARCH STRATEGY
{sources}

For each category, provide:
- **🎯 Optimized Query**: Exact search terms for maximum relevance
- **💡 Strategic Value**: Why this source matters for this specific event
- **⚡ Real-time Focus**: How to capture live developments

### 🚀 EXECUTION PRIORITY
Start with the most time-sensitive category for immediate intelligence gathering."#,
        glyph = tables::event_glyph(&ctx.event_type),
        name = ctx.event_name,
        depth = tables::analysis_depth(ctx.urgency),
        locations = tables::location_instruction(&ctx.locations),
        sources = tables::source_priorities(&ctx.event_type),
    )
}

pub fn render_platform_retrieval(platform: &str, query: &str, ctx: &PromptContext) -> String {
    let profile = tables::platform_profile(Platform::from_tag(platform));
    format!(
        r#"{glyph} **{platform} INTELLIGENCE GATHERING**

🎯 **SEARCH QUERY**: "{query}"
📊 **TARGET RESULTS**: {count} highest-quality items
⏰ **URGENCY LEVEL**: {urgency}

### 🔍 SEARCH FOCUS
{focus}

### 📊 QUALITY METRICS
Prioritize based on: {metrics}

### 📋 REQUIRED DATA POINTS
For each item, extract:
- 👤 **Source**: Username/channel name + verification status
- 📝 **Content**: Full text/title + key summary
- ⏰ **Timestamp**: Exact posting/upload time
- 📊 **Engagement**: Likes, shares, views (as available)
- 🔗 **Direct Link**: Full URL for verification
- 🎯 **Relevance Score**: How well it matches our event (1-10)

### 🚀 EXECUTION PROTOCOL
1. 🔍 Execute search with provided query
2. 📊 Rank results by relevance and quality metrics
3. 📋 Present top results in structured format
4. ⏳ Await approval before deeper analysis

🎯 **SUCCESS CRITERIA**: Results must provide actionable intelligence about "{name}""#,
        glyph = profile.glyph,
        platform = platform.trim().to_uppercase(),
        query = query,
        count = tables::result_count_hint(ctx.urgency),
        urgency = ctx.urgency,
        focus = profile.focus,
        metrics = profile.metrics,
        name = ctx.event_name,
    )
}

/// Analysis prompt over fetched news. Embeds at most `MAX_PROMPT_ARTICLES`.
pub fn render_news_analysis(articles: &[Article], event_count: usize) -> String {
    let news_text = articles
        .iter()
        .take(MAX_PROMPT_ARTICLES)
        .map(|a| {
            format!(
                "• {} - {} ({})\n  {}",
                a.title.as_deref().unwrap_or("No title"),
                a.source.as_deref().unwrap_or("Unknown"),
                a.date.as_deref().unwrap_or("No date"),
                a.snippet
                    .as_deref()
                    .map(normalize_snippet)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "No description".to_string()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"🎯 **REAL-TIME EVENT ANALYSIS TASK**

You are analyzing REAL breaking news articles. Your job is to:
1. Select the {count} MOST SIGNIFICANT events from the real news below
2. Format them according to our requirements
3. Add appropriate locations and emojis

📰 **REAL NEWS DATA (Current Breaking News):**
{news}

**OUTPUT REQUIREMENTS**:
Respond with EXACTLY this JSON format (no additional text, no explanations):

{{
  "events": [
    {{
      "title": "Clear, concise event title",
      "description": "Brief but informative description",
      "location": "Primary location affected",
      "emoji": "Relevant emoji",
      "time_context": "When this happened (from article date)"
    }}
  ]
}}

✅ Requirements:
- Use ONLY the real news provided above
- Select exactly {count} most significant events
- Order by significance/impact
- Extract or infer locations from the articles
- Choose appropriate emojis for each event type
- JSON format only, no markdown
- Use clear, engaging titles

🚀 RESPOND WITH JSON ONLY - NO OTHER TEXT."#,
        count = event_count,
        news = news_text,
    )
}
