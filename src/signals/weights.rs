//! Relative weight of each analysis in the final decision

use super::lookup::SignalSource;

/// Weights handed to the completion service as part of the instruction
pub struct SignalWeights;

impl SignalWeights {
    pub const VALUATION: f64 = 0.35;
    pub const FUNDAMENTALS: f64 = 0.30;
    pub const TECHNICAL: f64 = 0.25;
    pub const SENTIMENT: f64 = 0.10;

    /// Weight for a source. Risk management is a constraint, not a weighted input.
    pub fn get(source: SignalSource) -> Option<f64> {
        match source {
            SignalSource::Valuation => Some(Self::VALUATION),
            SignalSource::Fundamentals => Some(Self::FUNDAMENTALS),
            SignalSource::Technical => Some(Self::TECHNICAL),
            SignalSource::Sentiment => Some(Self::SENTIMENT),
            SignalSource::RiskManagement => None,
        }
    }

    /// Whole-number percentage used in prompt and report text
    pub fn percent(source: SignalSource) -> Option<u32> {
        Self::get(source).map(|w| (w * 100.0).round() as u32)
    }

    /// Verify weights sum to 1.0
    pub fn verify() -> bool {
        (Self::VALUATION + Self::FUNDAMENTALS + Self::TECHNICAL + Self::SENTIMENT - 1.0).abs()
            < 0.001
    }
}
