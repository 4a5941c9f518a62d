//! The trade decision produced once per cycle.

use serde::{Deserialize, Serialize};

use super::signal::{AgentSignal, SignalDirection};

/// Rationale attached to the fallback decision, Chinese then English.
pub const FALLBACK_REASONING: &str = "API调用发生错误。遵循风险管理信号保持持有。这是一个基于混合信号的保守决策：看多的基本面和情绪分析 vs 看空的估值分析，技术分析为中性。\nThe completion service call failed. Holding per the risk management signal. This is a conservative decision on mixed signals: bullish fundamentals and sentiment vs bearish valuation, with neutral technicals.";

pub const FALLBACK_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    #[serde(alias = "买入")]
    Buy,
    #[serde(alias = "卖出")]
    Sell,
    #[serde(alias = "持有")]
    Hold,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
            TradeAction::Hold => "hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::Buy => "买入",
            TradeAction::Sell => "卖出",
            TradeAction::Hold => "持有",
        }
    }

    /// Parse a risk agent's recommended action, tolerating case and Chinese labels.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" | "买入" => Some(TradeAction::Buy),
            "sell" | "卖出" => Some(TradeAction::Sell),
            "hold" | "持有" => Some(TradeAction::Hold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: TradeAction,
    pub quantity: u64,
    pub confidence: f64,
    #[serde(default)]
    pub agent_signals: Vec<AgentSignal>,
    #[serde(default)]
    pub reasoning: String,
}

impl Decision {
    /// The fixed conservative decision used when the completion service cannot answer.
    pub fn fallback() -> Self {
        Self {
            action: TradeAction::Hold,
            quantity: 0,
            confidence: FALLBACK_CONFIDENCE,
            agent_signals: vec![
                AgentSignal::new("technical_analysis", SignalDirection::Neutral, 0.0),
                AgentSignal::new("fundamental_analysis", SignalDirection::Bullish, 1.0),
                AgentSignal::new("sentiment_analysis", SignalDirection::Bullish, 0.6),
                AgentSignal::new("valuation_analysis", SignalDirection::Bearish, 0.67),
                AgentSignal::new("risk_management", SignalDirection::Hold, 1.0),
            ],
            reasoning: FALLBACK_REASONING.to_string(),
        }
    }

    /// Serialized form of [`Decision::fallback`]; identical on every call.
    pub fn fallback_content() -> String {
        serde_json::to_string(&Self::fallback())
            .unwrap_or_else(|_| unreachable!("fallback decision always serializes"))
    }

    pub fn to_content(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
