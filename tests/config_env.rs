// tests/config_env.rs
use event_scout::config::{load_config_default, load_config_from, DiscoveryConfig};
use event_scout::llm::build_client_from_config;
use event_scout::{DiscoveryError, TrendingEventsDiscoverer};
use std::{env, fs};

fn clear_env() {
    for var in [
        "EVENT_SCOUT_CONFIG",
        "EVENT_SCOUT_MODEL",
        "EVENT_SCOUT_RESULTS_DIR",
        "LLM_TEST_MODE",
        "OPENAI_API_KEY",
        "SERPER_API_KEY",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn explicit_paths_parse_toml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("discovery.toml");
    fs::write(
        &p_toml,
        r#"
llm_model = "gpt-4o"
search_queries = [" storms ", ""]
max_articles = 25
"#,
    )
    .unwrap();
    let cfg = load_config_from(&p_toml).unwrap();
    assert_eq!(cfg.llm_model, "gpt-4o");
    assert_eq!(cfg.search_queries, vec!["storms".to_string()]);
    assert_eq!(cfg.max_articles, 10);

    let p_json = dir.path().join("discovery.json");
    fs::write(&p_json, r#"{"event_count": 3, "results_dir": "out"}"#).unwrap();
    let cfg = load_config_from(&p_json).unwrap();
    assert_eq!(cfg.event_count, 3);
    assert_eq!(cfg.results_dir, "out");
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks_then_overrides() {
    // Isolate CWD so the repo's own config/ is not read.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing on disk → defaults
    assert_eq!(load_config_default().unwrap(), DiscoveryConfig::default());

    // 2) Fallback TOML in ./config/
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/discovery.toml"),
        r#"llm_model = "from-toml""#,
    )
    .unwrap();
    assert_eq!(load_config_default().unwrap().llm_model, "from-toml");

    // 3) Env path wins over the fallback
    let p_env = tmp.path().join("custom.json");
    fs::write(&p_env, r#"{"llm_model": "from-env-path"}"#).unwrap();
    env::set_var("EVENT_SCOUT_CONFIG", &p_env);
    assert_eq!(load_config_default().unwrap().llm_model, "from-env-path");

    // 4) Field overrides apply last
    env::set_var("EVENT_SCOUT_MODEL", "override-model");
    env::set_var("EVENT_SCOUT_RESULTS_DIR", "elsewhere");
    let cfg = load_config_default().unwrap();
    assert_eq!(cfg.llm_model, "override-model");
    assert_eq!(cfg.results_dir, "elsewhere");

    // 5) Dangling env path is an error
    env::set_var("EVENT_SCOUT_CONFIG", tmp.path().join("missing.toml"));
    assert!(load_config_default().is_err());

    clear_env();
    env::set_current_dir(old).unwrap();
}

#[serial_test::serial]
#[test]
fn missing_keys_fail_construction() {
    clear_env();
    let err = TrendingEventsDiscoverer::from_config(DiscoveryConfig::default())
        .err()
        .expect("serper key is required");
    assert!(matches!(err, DiscoveryError::MissingCredential("SERPER_API_KEY")));

    env::set_var("SERPER_API_KEY", "serper");
    let err = TrendingEventsDiscoverer::from_config(DiscoveryConfig::default())
        .err()
        .expect("openai key is required");
    assert!(matches!(err, DiscoveryError::MissingCredential("OPENAI_API_KEY")));

    env::set_var("LLM_TEST_MODE", "mock");
    let client = build_client_from_config(&DiscoveryConfig::default()).unwrap();
    assert_eq!(client.provider_name(), "mock");
    clear_env();
}
