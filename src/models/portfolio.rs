use serde::{Deserialize, Serialize};

/// Cash and shares held at the start of a decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub cash: f64,
    pub stock: u64,
}

impl PortfolioSnapshot {
    pub fn new(cash: f64, stock: u64) -> Self {
        Self { cash, stock }
    }

    pub fn can_buy(&self) -> bool {
        self.cash > 0.0
    }

    pub fn can_sell(&self) -> bool {
        self.stock > 0
    }
}
