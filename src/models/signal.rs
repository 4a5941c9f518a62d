//! Upstream agent signals and the message log they travel on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Direction of an agent's opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    #[serde(alias = "看多")]
    Bullish,
    #[serde(alias = "看空")]
    Bearish,
    #[serde(alias = "中性")]
    Neutral,
    #[serde(alias = "持有")]
    Hold,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "bullish",
            SignalDirection::Bearish => "bearish",
            SignalDirection::Neutral => "neutral",
            SignalDirection::Hold => "hold",
        }
    }

    /// Report label. Everything that is neither bullish nor bearish reads as neutral.
    pub fn label(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "看多",
            SignalDirection::Bearish => "看空",
            SignalDirection::Neutral | SignalDirection::Hold => "中性",
        }
    }
}

/// One agent's structured opinion.
///
/// Agents attach arbitrary nested detail (`strategy_signals`, `risk_metrics`,
/// `risk_score`, ...); those land in `details` and are reachable through [`AgentSignal::lookup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSignal {
    pub agent_name: String,
    pub signal: SignalDirection,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Value>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl AgentSignal {
    pub fn new(agent_name: impl Into<String>, signal: SignalDirection, confidence: f64) -> Self {
        Self {
            agent_name: agent_name.into(),
            signal,
            confidence,
            reasoning: None,
            details: Map::new(),
        }
    }

    pub fn with_reasoning(mut self, reasoning: Value) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }

    /// Follow a key path from the signal's top level. `None` as soon as any key is absent.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let root = if *first == "reasoning" {
            self.reasoning.as_ref()
        } else {
            self.details.get(*first)
        }?;
        rest.iter().try_fold(root, |value, key| value.get(*key))
    }
}

/// An entry of the orchestrator's running message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub name: String,
    pub content: String,
}

impl AgentMessage {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
