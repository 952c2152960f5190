//! Vela Core Domain
//!
//! Pure domain types for the Vela trading pipeline.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;

// Re-export commonly used types at crate root
pub use entities::{
    BookSnapshot, Fill, FillId, Order, OrderCandidate, OrderId, OrderStatus, OrderType, Side, Tick,
};
