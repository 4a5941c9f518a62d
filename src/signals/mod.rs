//! Decision requestor and report formatter.

pub mod engine;
pub mod lookup;
pub mod prompt;
pub mod report;
pub mod validation;
pub mod weights;

pub use engine::{DecisionOutcome, DecisionSource, PortfolioManager};
pub use lookup::{SignalSet, SignalSource};
pub use report::{format_decision, FormattedDecision};
pub use validation::DecisionPolicy;
pub use weights::SignalWeights;
