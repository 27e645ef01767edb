// src/present.rs
//! Console output for a discovery run. Everything renders to `String` first;
//! `print_*` helpers write the result to stdout.

use crate::models::TrendingEvent;

const RULE_WIDTH: usize = 60;
const CARD_INNER: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn welcome() -> String {
    format!(
        "\n🌟 {rule}\n     REAL-TIME EVENT DISCOVERY\n{rule}\n\n🔥 Discovering current trending events...\n",
        rule = rule()
    )
}

pub fn processing() -> &'static str {
    "🧠 Analyzing information streams...\n   • Scanning news sources\n   • Identifying patterns\n   • Ranking by significance\n"
}

pub fn complete() -> &'static str {
    "✨ Discovery complete. Here are today's significant events:\n"
}

pub const NO_EVENTS: &str = "🤔 No events found. Check API response.";

pub fn footer() -> String {
    format!(
        "\n{rule}\n💡 Select an event number for detailed analysis\n{rule}\n",
        rule = rule()
    )
}

/// One boxed card. Long fields are not truncated; the box simply widens on that line.
pub fn event_card(event: &TrendingEvent) -> String {
    let bar = "─".repeat(CARD_INNER);
    format!(
        "┌{bar}┐\n│ {emoji} {index}. {title:<40} │\n├{bar}┤\n│ 📍 Location: {location:<32} │\n│ 📝 Summary:  {description:<32} │\n└{bar}┘",
        emoji = event.emoji,
        index = event.index,
        title = event.title,
        location = event.location,
        description = event.description,
    )
}

/// The completion banner, one card per event (or the empty notice), then the footer.
pub fn render_events(events: &[TrendingEvent]) -> String {
    let mut out = String::from(complete());
    if events.is_empty() {
        out.push_str(NO_EVENTS);
        out.push('\n');
        return out;
    }
    for event in events {
        out.push('\n');
        out.push_str(&event_card(event));
        out.push('\n');
    }
    out.push_str(&footer());
    out
}

pub fn print_intro() {
    println!("{}", welcome());
    println!("{}", processing());
}

pub fn print_events(events: &[TrendingEvent]) {
    println!("{}", render_events(events));
}

pub fn print_failure(err: &dyn std::fmt::Display) {
    println!("🚨 Discovery failed: {err}\n💡 Check your API keys and connection");
}
