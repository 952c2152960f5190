//! Spread Strategy
//!
//! Buys at the ask when the spread is tight and the position has room;
//! exits the whole long position at the bid once the spread widens past
//! the sell threshold. At most one candidate per book snapshot.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use vela_core::{BookSnapshot, OrderCandidate, Side};
use vela_ledger::Position;

/// Seam between signal generation and the rest of the pipeline; only the
/// candidate contract matters downstream
pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Produce at most one candidate for a refreshed book snapshot
    fn on_book(
        &mut self,
        book: &BookSnapshot,
        positions: &HashMap<String, Position>,
    ) -> Option<OrderCandidate>;
}

/// Spread strategy parameters
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Buy when the spread is below this
    pub spread_threshold: Decimal,
    /// Exit longs when the spread is above this
    pub sell_threshold: Decimal,
    /// Per-symbol position cap the strategy respects
    pub max_position: i64,
    /// Default clip size
    pub order_quantity: i64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            spread_threshold: dec!(0.05),
            sell_threshold: dec!(0.10),
            max_position: 1000,
            order_quantity: 100,
        }
    }
}

/// Buys tight spreads, exits wide ones
pub struct SpreadStrategy {
    config: StrategyConfig,
}

impl SpreadStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }
}

impl Strategy for SpreadStrategy {
    fn name(&self) -> &str {
        "spread-strategy"
    }

    fn on_book(
        &mut self,
        book: &BookSnapshot,
        positions: &HashMap<String, Position>,
    ) -> Option<OrderCandidate> {
        let current = positions.get(&book.symbol).map(|p| p.net_qty).unwrap_or(0);

        // Tight spread and room below the cap: add at the ask
        if book.spread < self.config.spread_threshold && current < self.config.max_position {
            let quantity = self
                .config
                .order_quantity
                .min(self.config.max_position - current);
            return Some(OrderCandidate::limit(
                &book.symbol,
                Side::Buy,
                quantity,
                book.ask,
                self.name(),
            ));
        }

        // Wide spread and a long to exit: sell the whole position at the bid
        if book.spread > self.config.sell_threshold && current > 0 {
            return Some(OrderCandidate::limit(
                &book.symbol,
                Side::Sell,
                current,
                book.bid,
                self.name(),
            ));
        }

        None
    }
}
