//! Shared data models spanning the decision stage.

pub mod decision;
pub mod portfolio;
pub mod signal;
pub mod state;

pub use decision::{Decision, TradeAction, FALLBACK_CONFIDENCE, FALLBACK_REASONING};
pub use portfolio::PortfolioSnapshot;
pub use signal::{AgentMessage, AgentSignal, SignalDirection};
pub use state::{AgentState, StateData, StateMetadata};
