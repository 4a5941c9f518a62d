//! Local checks of the trading rules the completion service is instructed to follow.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::models::{Decision, PortfolioSnapshot, TradeAction};

/// What happens to a live decision before it is forwarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecisionPolicy {
    /// Forward the service's text unchanged; violations are only logged.
    #[default]
    PassThrough,
    /// Parse, clamp to the trading rules and re-serialize. Unparsable text falls back.
    Enforce,
}

impl FromStr for DecisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pass_through" | "passthrough" => Ok(DecisionPolicy::PassThrough),
            "enforce" => Ok(DecisionPolicy::Enforce),
            other => Err(format!("unknown decision policy: {other}")),
        }
    }
}

/// Limits published by the risk management agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskLimits {
    pub max_position_size: Option<u64>,
    pub trading_action: Option<TradeAction>,
}

impl RiskLimits {
    /// Best-effort read of the risk agent's message content. Missing or non-JSON
    /// content yields no limits.
    pub fn from_content(content: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(content) else {
            return Self::default();
        };
        let max_position_size = value
            .get("max_position_size")
            .and_then(Value::as_f64)
            .filter(|size| size.is_finite())
            .map(|size| size.max(0.0).floor() as u64);
        let trading_action = value
            .get("trading_action")
            .and_then(Value::as_str)
            .and_then(TradeAction::parse_loose);
        Self {
            max_position_size,
            trading_action,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    HoldWithQuantity(u64),
    AgainstRiskAction { risk: TradeAction, action: TradeAction },
    BuyWithoutCash,
    BuyAboveLimit { quantity: u64, limit: u64 },
    SellWithoutStock,
    SellAboveHolding { quantity: u64, held: u64 },
    ConfidenceOutOfRange(f64),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::HoldWithQuantity(q) => write!(f, "hold with non-zero quantity {q}"),
            Violation::AgainstRiskAction { risk, action } => write!(
                f,
                "action {} contradicts risk recommendation {}",
                action.as_str(),
                risk.as_str()
            ),
            Violation::BuyWithoutCash => write!(f, "buy with no available cash"),
            Violation::BuyAboveLimit { quantity, limit } => {
                write!(f, "buy quantity {quantity} exceeds max position size {limit}")
            }
            Violation::SellWithoutStock => write!(f, "sell with no shares held"),
            Violation::SellAboveHolding { quantity, held } => {
                write!(f, "sell quantity {quantity} exceeds holding {held}")
            }
            Violation::ConfidenceOutOfRange(c) => write!(f, "confidence {c} outside [0, 1]"),
        }
    }
}

/// Opposite directions, or any trade when the risk agent says hold.
fn contradicts(risk: TradeAction, action: TradeAction) -> bool {
    match (risk, action) {
        (_, TradeAction::Hold) => false,
        (TradeAction::Hold, _) => true,
        (risk, action) => risk != action,
    }
}

/// Every rule the decision breaks, in rule order.
pub fn check(decision: &Decision, portfolio: &PortfolioSnapshot, limits: &RiskLimits) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !(0.0..=1.0).contains(&decision.confidence) {
        violations.push(Violation::ConfidenceOutOfRange(decision.confidence));
    }
    if let Some(risk) = limits.trading_action {
        if contradicts(risk, decision.action) {
            violations.push(Violation::AgainstRiskAction {
                risk,
                action: decision.action,
            });
        }
    }

    match decision.action {
        TradeAction::Hold => {
            if decision.quantity != 0 {
                violations.push(Violation::HoldWithQuantity(decision.quantity));
            }
        }
        TradeAction::Buy => {
            if !portfolio.can_buy() {
                violations.push(Violation::BuyWithoutCash);
            }
            if let Some(limit) = limits.max_position_size {
                if decision.quantity > limit {
                    violations.push(Violation::BuyAboveLimit {
                        quantity: decision.quantity,
                        limit,
                    });
                }
            }
        }
        TradeAction::Sell => {
            if !portfolio.can_sell() {
                violations.push(Violation::SellWithoutStock);
            }
            if decision.quantity > portfolio.stock {
                violations.push(Violation::SellAboveHolding {
                    quantity: decision.quantity,
                    held: portfolio.stock,
                });
            }
        }
    }

    violations
}

/// Clamp a decision into the trading rules. Trades that cannot be made at all become hold.
pub fn enforce(mut decision: Decision, portfolio: &PortfolioSnapshot, limits: &RiskLimits) -> Decision {
    decision.confidence = if decision.confidence.is_finite() {
        decision.confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };

    if let Some(risk) = limits.trading_action {
        if contradicts(risk, decision.action) {
            decision.action = TradeAction::Hold;
        }
    }

    decision.quantity = match decision.action {
        TradeAction::Hold => 0,
        TradeAction::Buy if !portfolio.can_buy() => 0,
        TradeAction::Buy => match limits.max_position_size {
            Some(limit) => decision.quantity.min(limit),
            None => decision.quantity,
        },
        TradeAction::Sell => decision.quantity.min(portfolio.stock),
    };

    if decision.quantity == 0 {
        decision.action = TradeAction::Hold;
    }

    decision
}

/// Strip a surrounding markdown code fence, if the service added one anyway.
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.trim()
}

/// Parse service output into a decision, tolerating a code fence.
pub fn parse_decision(content: &str) -> Result<Decision, serde_json::Error> {
    serde_json::from_str(strip_code_fence(content))
}
