//! Best Bid/Offer Aggregation
//!
//! Reduces the tick stream to a per-symbol top-of-book snapshot. The
//! pipeline consumes snapshots only for signal generation and mark
//! prices; there is no depth and no matching here.

use std::collections::HashMap;
use vela_core::{BookSnapshot, Tick};

/// Latest snapshot per symbol
#[derive(Debug, Default)]
pub struct BookAggregator {
    books: HashMap<String, BookSnapshot>,
}

impl BookAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a tick into the book, returning the refreshed snapshot
    pub fn update(&mut self, tick: &Tick) -> BookSnapshot {
        let snapshot = BookSnapshot::from_tick(tick);
        self.books.insert(tick.symbol.clone(), snapshot.clone());
        snapshot
    }

    /// Current snapshot for a symbol
    pub fn book(&self, symbol: &str) -> Option<&BookSnapshot> {
        self.books.get(symbol)
    }

    /// All current snapshots
    pub fn books(&self) -> &HashMap<String, BookSnapshot> {
        &self.books
    }
}
