//! Error types for the decision stage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    /// A required upstream agent message is absent from the message log.
    #[error("missing signal from {name}")]
    MissingSignal { name: String },

    #[error("invalid agent state: {0}")]
    InvalidState(String),
}

impl PortfolioError {
    pub fn missing_signal(name: impl Into<String>) -> Self {
        Self::MissingSignal { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
