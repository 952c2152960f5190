//! Position Ledger
//!
//! Live per-symbol positions plus running realized-PnL accumulators and a
//! chronological fill log. DashMap sharding combined with one execution
//! worker per symbol gives single-writer-per-symbol updates; cross-symbol
//! fills never interact.

use dashmap::DashMap;
use log::info;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use vela_core::Fill;

use crate::position::Position;

/// Single source of truth for positions, mutated only by confirmed fills
#[derive(Debug, Default)]
pub struct PositionLedger {
    /// Live position per symbol
    positions: DashMap<String, Position>,
    /// Running realized PnL per symbol, one entry per filled symbol
    realized: DashMap<String, Decimal>,
    /// Chronological fill history, consumed by replay-based reconciliation
    fills: Mutex<Vec<Fill>>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a confirmed fill, returning the realized PnL delta.
    ///
    /// The symbol's position entry is updated atomically under its map
    /// shard; a fault while applying one symbol cannot corrupt another.
    pub fn apply_fill(&self, fill: &Fill) -> Decimal {
        let mut entry = self.positions.entry(fill.symbol.clone()).or_default();
        let realized = entry.apply(fill.side, fill.quantity, fill.price);
        let position = *entry;
        drop(entry);

        *self
            .realized
            .entry(fill.symbol.clone())
            .or_insert(Decimal::ZERO) += realized;
        self.fill_log().push(fill.clone());

        info!(
            "position {}: net_qty={} avg_cost={} realized_delta={}",
            fill.symbol, position.net_qty, position.avg_cost, realized
        );
        realized
    }

    /// Current position for a symbol (flat default if never traded)
    pub fn position(&self, symbol: &str) -> Position {
        self.positions
            .get(symbol)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    /// Net quantity for a symbol
    pub fn net_quantity(&self, symbol: &str) -> i64 {
        self.position(symbol).net_qty
    }

    /// All symbols with a non-zero net quantity
    pub fn positions(&self) -> HashMap<String, Position> {
        self.positions
            .iter()
            .filter(|entry| !entry.value().is_flat())
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Aggregate notional: sum of |net_qty * avg_cost| across all symbols
    pub fn gross_notional(&self) -> Decimal {
        self.positions
            .iter()
            .map(|entry| entry.value().notional())
            .sum()
    }

    /// Running realized PnL per symbol
    pub fn realized_by_symbol(&self) -> HashMap<String, Decimal> {
        self.realized
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Total realized PnL across all symbols
    pub fn total_realized(&self) -> Decimal {
        self.realized.iter().map(|entry| *entry.value()).sum()
    }

    /// Snapshot of the chronological fill history
    pub fn fill_history(&self) -> Vec<Fill> {
        self.fill_log().clone()
    }

    pub fn fill_count(&self) -> usize {
        self.fill_log().len()
    }

    // A poisoned log is still usable; writers only ever append
    fn fill_log(&self) -> MutexGuard<'_, Vec<Fill>> {
        self.fills
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
