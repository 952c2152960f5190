use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderId, Side};

/// Unique identifier for a fill
pub type FillId = Uuid;

/// Execution report produced by the exchange simulator
///
/// Immutable once created. The quantity may be less than the originating
/// order's quantity (partial fill); an order resolves to at most one fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub id: FillId,
    pub order_id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub quantity: i64,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Fill {
    /// Create a fill with explicit timestamp
    pub fn new_with_time(
        order_id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        quantity: i64,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            symbol: symbol.into(),
            side,
            quantity,
            price,
            timestamp,
        }
    }

    /// Create a fill using current system time
    pub fn new(
        order_id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        quantity: i64,
        price: Decimal,
    ) -> Self {
        Self::new_with_time(order_id, symbol, side, quantity, price, Utc::now())
    }
}
