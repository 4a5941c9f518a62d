//! Selecting the five upstream signals out of the message log.

use tracing::warn;

use crate::error::{PortfolioError, Result};
use crate::models::{AgentMessage, AgentSignal};

/// The five upstream agents this stage depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    Technical,
    Fundamentals,
    Sentiment,
    Valuation,
    RiskManagement,
}

impl SignalSource {
    pub const ALL: [SignalSource; 5] = [
        SignalSource::Technical,
        SignalSource::Fundamentals,
        SignalSource::Sentiment,
        SignalSource::Valuation,
        SignalSource::RiskManagement,
    ];

    /// Name the agent publishes its message under.
    pub fn message_name(&self) -> &'static str {
        match self {
            SignalSource::Technical => "technical_analyst_agent",
            SignalSource::Fundamentals => "fundamentals_agent",
            SignalSource::Sentiment => "sentiment_agent",
            SignalSource::Valuation => "valuation_agent",
            SignalSource::RiskManagement => "risk_management_agent",
        }
    }

    /// `agent_name` the signal carries inside a decision's `agent_signals`.
    pub fn signal_name(&self) -> &'static str {
        match self {
            SignalSource::Technical => "technical_analysis",
            SignalSource::Fundamentals => "fundamental_analysis",
            SignalSource::Sentiment => "sentiment_analysis",
            SignalSource::Valuation => "valuation_analysis",
            SignalSource::RiskManagement => "risk_management",
        }
    }
}

/// First message named `name`. Duplicates are logged and ignored.
pub fn find_message<'a>(messages: &'a [AgentMessage], name: &str) -> Option<&'a AgentMessage> {
    let mut matches = messages.iter().filter(|m| m.name == name);
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        warn!(name, duplicates = extra, "multiple messages share a name, using the first");
    }
    Some(first)
}

/// First signal whose `agent_name` is `name`.
pub fn find_signal<'a>(signals: &'a [AgentSignal], name: &str) -> Option<&'a AgentSignal> {
    signals.iter().find(|s| s.agent_name == name)
}

/// Raw content of the five required upstream messages.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSet {
    pub technical: String,
    pub fundamentals: String,
    pub sentiment: String,
    pub valuation: String,
    pub risk: String,
}

impl SignalSet {
    /// Select every required signal, failing on the first one absent.
    pub fn from_messages(messages: &[AgentMessage]) -> Result<Self> {
        let take = |source: SignalSource| {
            find_message(messages, source.message_name())
                .map(|m| m.content.clone())
                .ok_or_else(|| PortfolioError::missing_signal(source.message_name()))
        };

        Ok(Self {
            technical: take(SignalSource::Technical)?,
            fundamentals: take(SignalSource::Fundamentals)?,
            sentiment: take(SignalSource::Sentiment)?,
            valuation: take(SignalSource::Valuation)?,
            risk: take(SignalSource::RiskManagement)?,
        })
    }

    pub fn get(&self, source: SignalSource) -> &str {
        match source {
            SignalSource::Technical => &self.technical,
            SignalSource::Fundamentals => &self.fundamentals,
            SignalSource::Sentiment => &self.sentiment,
            SignalSource::Valuation => &self.valuation,
            SignalSource::RiskManagement => &self.risk,
        }
    }
}
