use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Orders progress `New -> (Approved | Rejected)` and
/// `Approved -> (Filled | Rejected)`. Rejected and Filled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order has been created but not yet risk-checked
    New,
    /// Order passed pre-trade risk checks
    Approved,
    /// Order was rejected by the risk gate or the exchange
    Rejected,
    /// Order received a fill
    Filled,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Rejected | OrderStatus::Filled)
    }

    /// Returns true if the order is still moving through the pipeline
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Filled => "FILLED",
        }
    }
}
