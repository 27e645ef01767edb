// tests/discovery_pipeline.rs
use std::sync::Arc;

use event_scout::config::DiscoveryConfig;
use event_scout::llm::{DisabledClient, MockLlmClient};
use event_scout::persist::{load_result, ResultFile};
use event_scout::prompts::generator::ANALYST_SYSTEM_PROMPT;
use event_scout::prompts::MemoryPromptLog;
use event_scout::search::{Article, StaticSearchProvider};
use event_scout::{
    DiscoveryError, EventType, PromptGenerator, TrendingEventsDiscoverer, UrgencyLevel,
};

const FIXTURE: &str = include_str!("fixtures/serper_news.json");

const MODEL_ANSWER: &str = r#"Here are the events:
```json
{"events": [
  {"title": "Valencia floods", "description": "Thousands evacuated", "location": "Valencia, Spain", "emoji": "🌊"},
  {"title": "Rates on hold", "description": "Central bank pauses", "location": "Frankfurt"}
]}
```"#;

fn config_in(dir: &std::path::Path) -> DiscoveryConfig {
    DiscoveryConfig {
        results_dir: dir.join("results").to_string_lossy().into_owned(),
        search_queries: vec!["breaking news today".into(), "world".into()],
        ..DiscoveryConfig::default()
    }
}

fn fixture_search() -> Arc<StaticSearchProvider> {
    Arc::new(StaticSearchProvider::from_fixture(FIXTURE).unwrap())
}

#[tokio::test]
async fn full_run_returns_events_and_writes_result_file() {
    let tmp = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlmClient::new(MODEL_ANSWER));
    let log = Arc::new(MemoryPromptLog::new());
    let discoverer = TrendingEventsDiscoverer::new(
        config_in(tmp.path()),
        fixture_search(),
        llm.clone(),
        PromptGenerator::new(log.clone()),
    )
    .quiet();

    let report = discoverer
        .try_discover(UrgencyLevel::High, EventType::from("environmental"))
        .await
        .unwrap();

    // Two queries against the same fixture: 3 articles each.
    assert_eq!(report.article_count, 6);
    assert_eq!(report.events.len(), 2);
    assert_eq!(report.events[0].emoji, "🌊");
    assert_eq!(report.events[1].emoji, "📍");
    assert_eq!(report.events[1].index, 2);

    let reqs = llm.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].system, ANALYST_SYSTEM_PROMPT);
    assert_eq!(reqs[0].model, "gpt-4");
    assert!(reqs[0].prompt.contains("Flash floods force evacuations in Valencia - Reuters (2 hours ago)"));
    assert!(reqs[0].prompt.contains(r#"Emergency services moved "thousands" of residents"#));
    assert!(reqs[0].prompt.contains("Chip export rules tightened - AP (No date)"));
    assert!(reqs[0].prompt.contains("Select exactly 7 most significant events"));

    let usage = log.snapshot();
    assert_eq!(usage["news_analysis"][0].context["urgency_level"], "high");

    let path = report.saved_to.expect("result file written");
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("trending_events_environmental_"));
    assert!(name.ends_with(".json"));

    let saved: ResultFile = serde_json::from_value(load_result(&path).unwrap()).unwrap();
    assert_eq!(saved.metadata.total_events, 2);
    assert_eq!(saved.metadata.urgency_level, "high");
    assert_eq!(saved.metadata.event_type, "environmental");
    assert_eq!(saved.metadata.search_queries.len(), 2);
    assert_eq!(saved.events, report.events);
}

#[tokio::test]
async fn empty_search_aborts_before_calling_the_model() {
    let tmp = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlmClient::new(MODEL_ANSWER));
    let discoverer = TrendingEventsDiscoverer::new(
        config_in(tmp.path()),
        Arc::new(StaticSearchProvider::new(Vec::new())),
        llm.clone(),
        PromptGenerator::in_memory(),
    )
    .quiet();

    let err = discoverer
        .try_discover(UrgencyLevel::Medium, EventType::from("global"))
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::EmptyUpstream));
    assert!(llm.requests().is_empty());
    assert!(!tmp.path().join("results").exists());

    let events = discoverer
        .discover(UrgencyLevel::Medium, EventType::from("global"))
        .await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn unusable_model_output_yields_empty_list() {
    let tmp = tempfile::tempdir().unwrap();
    let discoverer = TrendingEventsDiscoverer::new(
        config_in(tmp.path()),
        fixture_search(),
        Arc::new(MockLlmClient::new("not json at all")),
        PromptGenerator::in_memory(),
    )
    .quiet();

    let err = discoverer
        .try_discover(UrgencyLevel::Low, EventType::from("social"))
        .await
        .unwrap_err();
    match err {
        DiscoveryError::Extract(e) => assert_eq!(e.preview(), Some("not json at all")),
        other => panic!("expected extract error, got {other:?}"),
    }

    let events = discoverer
        .discover(UrgencyLevel::Low, EventType::from("social"))
        .await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn empty_events_answer_is_a_successful_run() {
    let tmp = tempfile::tempdir().unwrap();
    let discoverer = TrendingEventsDiscoverer::new(
        config_in(tmp.path()),
        fixture_search(),
        Arc::new(MockLlmClient::new(r#"{"events": []}"#)),
        PromptGenerator::in_memory(),
    )
    .quiet();

    let report = discoverer
        .try_discover(UrgencyLevel::Medium, EventType::from("global"))
        .await
        .unwrap();
    assert!(report.events.is_empty());
    assert!(report.saved_to.is_some());
}

#[tokio::test]
async fn llm_failure_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let discoverer = TrendingEventsDiscoverer::new(
        config_in(tmp.path()),
        fixture_search(),
        Arc::new(DisabledClient),
        PromptGenerator::in_memory(),
    )
    .quiet();

    let err = discoverer
        .try_discover(UrgencyLevel::Medium, EventType::from("global"))
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::Llm(_)));
}

#[tokio::test]
async fn unwritable_results_dir_keeps_in_memory_events() {
    let tmp = tempfile::tempdir().unwrap();
    // A regular file where the results directory should go.
    let blocker = tmp.path().join("results");
    std::fs::write(&blocker, b"not a dir").unwrap();

    let discoverer = TrendingEventsDiscoverer::new(
        config_in(tmp.path()),
        fixture_search(),
        Arc::new(MockLlmClient::new(MODEL_ANSWER)),
        PromptGenerator::in_memory(),
    )
    .quiet();

    let report = discoverer
        .try_discover(UrgencyLevel::High, EventType::from("global"))
        .await
        .unwrap();
    assert_eq!(report.events.len(), 2);
    assert!(report.saved_to.is_none());
}

#[tokio::test]
async fn prompt_embeds_at_most_configured_articles() {
    let tmp = tempfile::tempdir().unwrap();
    let articles: Vec<Article> = (0..15)
        .map(|i| Article {
            title: Some(format!("Story number {i}")),
            ..Article::default()
        })
        .collect();
    let llm = Arc::new(MockLlmClient::new(r#"{"events": []}"#));
    let cfg = DiscoveryConfig {
        max_articles: 4,
        search_queries: vec!["q".into()],
        ..config_in(tmp.path())
    };
    let discoverer = TrendingEventsDiscoverer::new(
        cfg,
        Arc::new(StaticSearchProvider::new(articles)),
        llm.clone(),
        PromptGenerator::in_memory(),
    )
    .quiet();

    discoverer
        .try_discover(UrgencyLevel::Medium, EventType::from("global"))
        .await
        .unwrap();
    let prompt = &llm.requests()[0].prompt;
    assert!(prompt.contains("Story number 3 "));
    assert!(!prompt.contains("Story number 4 "));
}
