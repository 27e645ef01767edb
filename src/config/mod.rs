// src/config/mod.rs
//! Configuration loading: explicit path, env var, then `config/` fallbacks.

pub mod discovery;

pub use discovery::{Credential, DiscoveryConfig};

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "EVENT_SCOUT_CONFIG";
pub const ENV_MODEL: &str = "EVENT_SCOUT_MODEL";
pub const ENV_RESULTS_DIR: &str = "EVENT_SCOUT_RESULTS_DIR";

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<DiscoveryConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg.sanitize())
}

/// Load config using env var + fallbacks, then apply env overrides:
/// 1) $EVENT_SCOUT_CONFIG
/// 2) config/discovery.toml
/// 3) config/discovery.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<DiscoveryConfig> {
    let cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        load_config_from(&pb)?
    } else if Path::new("config/discovery.toml").exists() {
        load_config_from(Path::new("config/discovery.toml"))?
    } else if Path::new("config/discovery.json").exists() {
        load_config_from(Path::new("config/discovery.json"))?
    } else {
        DiscoveryConfig::default()
    };
    Ok(apply_env_overrides(cfg))
}

fn apply_env_overrides(mut cfg: DiscoveryConfig) -> DiscoveryConfig {
    if let Ok(model) = std::env::var(ENV_MODEL) {
        if !model.trim().is_empty() {
            cfg.llm_model = model.trim().to_string();
        }
    }
    if let Ok(dir) = std::env::var(ENV_RESULTS_DIR) {
        if !dir.trim().is_empty() {
            cfg.results_dir = dir.trim().to_string();
        }
    }
    cfg
}

fn parse_config(s: &str, hint_ext: &str) -> Result<DiscoveryConfig> {
    if hint_ext == "toml" {
        return Ok(toml::from_str(s)?);
    }
    if hint_ext == "json" {
        return Ok(serde_json::from_str(s)?);
    }
    // No usable extension: try JSON, then TOML.
    if let Ok(cfg) = serde_json::from_str(s) {
        return Ok(cfg);
    }
    toml::from_str(s).map_err(|e| anyhow!("unsupported config format: {e}"))
}
