use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderType, Side};

/// Candidate order emitted by a strategy, before risk approval
///
/// Price and order type are optional on purpose: malformed candidates are
/// carried as far as the risk gate, which rejects them with a structured
/// reason instead of the signal source having to pre-validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCandidate {
    pub symbol: String,
    pub side: Side,
    /// Requested quantity; must be positive to pass the gate
    pub quantity: i64,
    pub price: Option<Decimal>,
    pub order_type: Option<OrderType>,
    pub timestamp: DateTime<Utc>,
    /// Strategy that generated the candidate
    pub strategy: String,
}

impl OrderCandidate {
    /// Create a candidate with explicit timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_time(
        symbol: impl Into<String>,
        side: Side,
        quantity: i64,
        price: Option<Decimal>,
        order_type: Option<OrderType>,
        strategy: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            price,
            order_type,
            timestamp,
            strategy: strategy.into(),
        }
    }

    /// Create a candidate using current system time
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        quantity: i64,
        price: Option<Decimal>,
        order_type: Option<OrderType>,
        strategy: impl Into<String>,
    ) -> Self {
        Self::new_with_time(symbol, side, quantity, price, order_type, strategy, Utc::now())
    }

    /// Create a well-formed limit candidate
    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: i64,
        price: Decimal,
        strategy: impl Into<String>,
    ) -> Self {
        Self::new(
            symbol,
            side,
            quantity,
            Some(price),
            Some(OrderType::Limit),
            strategy,
        )
    }
}
