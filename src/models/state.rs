//! Orchestrator state as seen by this stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::portfolio::PortfolioSnapshot;
use super::signal::AgentMessage;

/// Message log plus shared data. Only `data.portfolio` and `metadata.show_reasoning`
/// are read; every other field passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    #[serde(default)]
    pub messages: Vec<AgentMessage>,
    pub data: StateData,
    #[serde(default)]
    pub metadata: StateMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateData {
    pub portfolio: PortfolioSnapshot,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateMetadata {
    #[serde(default)]
    pub show_reasoning: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AgentState {
    pub fn new(messages: Vec<AgentMessage>, portfolio: PortfolioSnapshot) -> Self {
        Self {
            messages,
            data: StateData {
                portfolio,
                extra: Map::new(),
            },
            metadata: StateMetadata::default(),
        }
    }

    pub fn with_show_reasoning(mut self, show_reasoning: bool) -> Self {
        self.metadata.show_reasoning = show_reasoning;
        self
    }

    /// Last message carrying `name`, if any.
    pub fn last_message(&self, name: &str) -> Option<&AgentMessage> {
        self.messages.iter().rev().find(|m| m.name == name)
    }
}
