//! Per-Symbol Position Arithmetic
//!
//! Weighted-average-cost accounting. Accumulation blends the average cost;
//! a reduction realizes PnL against it and leaves it unchanged; a fill that
//! closes through zero opens the remainder at the fill price. A flat
//! position carries no cost basis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vela_core::Side;

/// Net position for a single symbol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Net quantity: positive = long, negative = short
    pub net_qty: i64,
    /// Volume-weighted average cost of the open quantity; zero when flat
    pub avg_cost: Decimal,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.net_qty == 0
    }

    pub fn is_long(&self) -> bool {
        self.net_qty > 0
    }

    pub fn is_short(&self) -> bool {
        self.net_qty < 0
    }

    /// Notional exposure at average cost
    pub fn notional(&self) -> Decimal {
        (Decimal::from(self.net_qty) * self.avg_cost).abs()
    }

    /// Mark-to-market PnL of the open quantity
    pub fn unrealized_pnl(&self, mark: Decimal) -> Decimal {
        (mark - self.avg_cost) * Decimal::from(self.net_qty)
    }

    /// Apply a fill to this position, returning the realized PnL delta
    pub fn apply(&mut self, side: Side, quantity: i64, price: Decimal) -> Decimal {
        let signed_qty = side.sign() * quantity;

        let mut realized = Decimal::ZERO;
        if (self.net_qty > 0 && signed_qty < 0) || (self.net_qty < 0 && signed_qty > 0) {
            // Reduction: realize on the closed quantity, capped at the open size
            let closed = quantity.min(self.net_qty.abs());
            realized = if self.net_qty > 0 {
                Decimal::from(closed) * (price - self.avg_cost)
            } else {
                Decimal::from(closed) * (self.avg_cost - price)
            };
        }

        let new_qty = self.net_qty + signed_qty;
        if new_qty == 0 {
            // Flat: no carried cost basis
            self.avg_cost = Decimal::ZERO;
        } else if (self.net_qty >= 0 && signed_qty > 0) || (self.net_qty <= 0 && signed_qty < 0) {
            // Accumulation: quantity-weighted blend
            let total_cost = Decimal::from(self.net_qty.abs()) * self.avg_cost
                + Decimal::from(quantity) * price;
            self.avg_cost = total_cost / Decimal::from(new_qty.abs());
        } else if new_qty.signum() != self.net_qty.signum() {
            // Closed through zero: the remainder starts a fresh position
            self.avg_cost = price;
        }
        // A plain reduction keeps the average cost

        self.net_qty = new_qty;
        realized
    }
}
