//! Risk Limits
//!
//! Process-wide pre-trade limits, read once at startup and immutable
//! thereafter.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Limits the gate enforces on every candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Absolute bound on per-symbol net quantity
    pub position_limit: i64,
    /// Bound on aggregate notional: sum of |net_qty * avg_cost| across
    /// all symbols, plus the candidate's own notional
    pub notional_limit: Decimal,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            position_limit: 10_000,
            notional_limit: dec!(50_000_000),
        }
    }
}
