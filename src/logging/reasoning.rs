//! Display sink for agent reasoning, used when `show_reasoning` is set.

use serde_json::Value;
use tracing::info;

/// Receives the raw decision content with a display label.
pub trait ReasoningSink: Send + Sync {
    fn show(&self, agent_label: &str, content: &str);
}

/// Emits reasoning through `tracing` at info level.
///
/// JSON content is pretty-printed; anything else is logged as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReasoningSink;

impl ReasoningSink for TracingReasoningSink {
    fn show(&self, agent_label: &str, content: &str) {
        info!(agent = agent_label, "\n{}", render_reasoning(agent_label, content));
    }
}

/// Banner-framed rendering of the content.
pub fn render_reasoning(agent_label: &str, content: &str) -> String {
    let body = serde_json::from_str::<Value>(content)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| content.to_string());
    let banner = format!("{:=^48}", format!(" {} ", agent_label));
    format!("{banner}\n{body}\n{}", "=".repeat(48))
}
