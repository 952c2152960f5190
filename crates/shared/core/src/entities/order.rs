use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderCandidate, OrderStatus, OrderType, Side};

/// Unique identifier for an order
pub type OrderId = Uuid;

/// Live order, created from a candidate once the risk gate assigns identity
///
/// Orders are never deleted; they only move through status transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: i64,
    pub price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub strategy: String,
}

impl Order {
    /// Promote a gate-approved candidate into a live order.
    ///
    /// Returns `None` when the candidate lacks a price or order type;
    /// the gate never approves such candidates.
    pub fn from_candidate(id: OrderId, candidate: &OrderCandidate) -> Option<Self> {
        let price = candidate.price?;
        let order_type = candidate.order_type?;
        Some(Self {
            id,
            symbol: candidate.symbol.clone(),
            side: candidate.side,
            order_type,
            quantity: candidate.quantity,
            price,
            status: OrderStatus::New,
            created_at: candidate.timestamp,
            strategy: candidate.strategy.clone(),
        })
    }

    /// Notional value of the full requested quantity
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}
