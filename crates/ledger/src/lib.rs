//! Vela Position Ledger
//!
//! The single source of truth for per-symbol net quantity and average
//! cost, mutated only by confirmed fills:
//! - **Position**: weighted-average-cost arithmetic for one symbol
//! - **PositionLedger**: the live per-symbol position map, realized-PnL
//!   accumulators and chronological fill log
//! - **PnL engine**: realized/unrealized reporting and the replay-based
//!   reconciliation audit
//!
//! The risk gate reads positions through the ledger for pre-trade checks
//! and the PnL engine reports from it, so both views always see the same
//! fill stream in the same order.

pub mod ledger;
pub mod pnl;
pub mod position;

// Re-export main types
pub use ledger::PositionLedger;
pub use pnl::{MarkPrices, PnlEngine, PnlReport, replay_realized};
pub use position::Position;
