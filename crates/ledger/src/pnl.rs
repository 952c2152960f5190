//! PnL Engine
//!
//! Realized PnL comes from the ledger's running accumulators; unrealized
//! PnL is derived on demand from open positions and externally supplied
//! mark prices, never stored. `replay_realized` recomputes realized PnL
//! from the full fill history and exists for reconciliation audits only -
//! it is a second view over the same fill log, not a second ledger.

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use vela_core::Fill;

use crate::ledger::PositionLedger;
use crate::position::Position;

/// Latest mark price (mid) per symbol, maintained by the market-data side
#[derive(Debug, Default)]
pub struct MarkPrices {
    marks: DashMap<String, Decimal>,
}

impl MarkPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, symbol: &str, mid: Decimal) {
        self.marks.insert(symbol.to_string(), mid);
    }

    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.marks.get(symbol).map(|entry| *entry.value())
    }
}

/// Point-in-time PnL summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlReport {
    pub total_realized: Decimal,
    pub total_unrealized: Decimal,
    pub total: Decimal,
}

/// Read-only PnL view over the position ledger
#[derive(Debug, Clone)]
pub struct PnlEngine {
    ledger: Arc<PositionLedger>,
}

impl PnlEngine {
    pub fn new(ledger: Arc<PositionLedger>) -> Self {
        Self { ledger }
    }

    /// Running realized PnL per symbol since inception
    pub fn realized_pnl(&self) -> HashMap<String, Decimal> {
        self.ledger.realized_by_symbol()
    }

    /// Mark-to-market PnL per open symbol; symbols without a mark
    /// price contribute zero
    pub fn unrealized_pnl(&self, marks: &MarkPrices) -> HashMap<String, Decimal> {
        self.ledger
            .positions()
            .into_iter()
            .map(|(symbol, position)| {
                let unrealized = marks
                    .get(&symbol)
                    .map(|mark| position.unrealized_pnl(mark))
                    .unwrap_or(Decimal::ZERO);
                (symbol, unrealized)
            })
            .collect()
    }

    /// Combined realized + unrealized snapshot
    pub fn report(&self, marks: &MarkPrices) -> PnlReport {
        let total_realized = self.ledger.total_realized();
        let total_unrealized = self.unrealized_pnl(marks).values().copied().sum();
        PnlReport {
            total_realized,
            total_unrealized,
            total: total_realized + total_unrealized,
        }
    }
}

/// Recompute realized PnL per symbol by replaying a fill sequence from
/// scratch, in order. Must agree with the ledger's incremental
/// accumulators over the same history.
pub fn replay_realized(fills: &[Fill]) -> HashMap<String, Decimal> {
    let mut positions: HashMap<String, Position> = HashMap::new();
    let mut realized: HashMap<String, Decimal> = HashMap::new();

    for fill in fills {
        let position = positions.entry(fill.symbol.clone()).or_default();
        let delta = position.apply(fill.side, fill.quantity, fill.price);
        *realized.entry(fill.symbol.clone()).or_default() += delta;
    }

    realized
}
