//! Vela Risk Gate
//!
//! Validates and limit-checks candidate orders against live position state
//! before they reach the exchange:
//! - field validation (symbol, quantity, price, order type)
//! - per-symbol position limit in the order's direction
//! - aggregate notional limit across all symbols
//!
//! The gate assigns order identity and retains every candidate it has seen
//! for diagnostics, but never mutates the position ledger - positions are
//! only read through it.

pub mod gate;
pub mod limits;

// Re-export main types
pub use gate::{GateResult, RejectReason, RiskGate};
pub use limits::RiskLimits;
