//! event-scout: discover today's trending events from live news.
//!
//! Usage: `event-scout [urgency] [focus]`, e.g. `event-scout high environmental`.
//! Defaults are the preferred urgency bias (`medium` unless
//! `prompts/user_preferences.json` says otherwise) and `global`.

use anyhow::Context;
use event_scout::config::load_config_default;
use event_scout::telemetry::{Metrics, ENV_METRICS};
use event_scout::{EventType, TrendingEventsDiscoverer, UrgencyLevel};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FOCUS: &str = "global";

/// Compact logs by default; `EVENT_SCOUT_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("event_scout=info,warn"));
    let json = std::env::var("EVENT_SCOUT_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; missing file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    let metrics = if std::env::var(ENV_METRICS).ok().is_some_and(|v| v == "1") {
        Some(Metrics::init()?)
    } else {
        None
    };

    let mut args = std::env::args().skip(1);
    let urgency_arg = args.next();
    let focus = EventType::from(args.next().as_deref().unwrap_or(DEFAULT_FOCUS));

    let cfg = load_config_default().context("loading discovery config")?;
    let discoverer = TrendingEventsDiscoverer::from_config(cfg)?;
    let urgency = match urgency_arg {
        Some(a) => UrgencyLevel::parse_lossy(&a),
        None => discoverer.default_urgency(),
    };

    let events = discoverer.discover(urgency, focus).await;
    tracing::info!(count = events.len(), "run finished");

    if let Some(m) = metrics {
        println!("{}", m.render());
    }
    Ok(())
}
