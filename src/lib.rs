//! Portfolio management decision stage for a multi-agent trading pipeline.
//!
//! Collects the five upstream agent signals, asks a completion service for the
//! final trade, falls back to a fixed conservative decision when it cannot, and
//! renders finalized decisions into a readable report.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::PortfolioError;
pub use models::{AgentMessage, AgentSignal, AgentState, Decision, PortfolioSnapshot, TradeAction};
pub use signals::engine::PortfolioManager;
