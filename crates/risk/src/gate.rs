//! Pre-Trade Risk Gate
//!
//! Checks run in a fixed order: required fields, position limit, notional
//! limit. The first breach rejects the candidate; approval assigns a fresh
//! order id. The gate reads positions through the ledger and never writes
//! to it.

use dashmap::DashMap;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use vela_core::{OrderCandidate, OrderId, Side};
use vela_ledger::PositionLedger;

use crate::limits::RiskLimits;

/// Why the gate rejected a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Symbol, quantity, price, side or order type absent/invalid
    MissingFields,
    /// The order would push the symbol's net quantity beyond the limit
    PositionLimit,
    /// The order would push aggregate notional beyond the limit
    NotionalLimit,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingFields => "MISSING_FIELDS",
            RejectReason::PositionLimit => "POSITION_LIMIT",
            RejectReason::NotionalLimit => "NOTIONAL_LIMIT",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a gate check
///
/// Both arms carry the assigned order id; the gate assigns identity to
/// every candidate it sees.
#[derive(Debug, Clone)]
pub enum GateResult {
    Approved {
        order_id: OrderId,
    },
    Rejected {
        order_id: OrderId,
        reason: RejectReason,
    },
}

impl GateResult {
    pub fn is_approved(&self) -> bool {
        matches!(self, GateResult::Approved { .. })
    }
}

/// Pre-trade risk gate
pub struct RiskGate {
    limits: RiskLimits,
    ledger: Arc<PositionLedger>,
    /// Every candidate ever checked, keyed by its assigned id (diagnostics)
    candidates: DashMap<OrderId, OrderCandidate>,
}

impl RiskGate {
    pub fn new(limits: RiskLimits, ledger: Arc<PositionLedger>) -> Self {
        Self {
            limits,
            ledger,
            candidates: DashMap::new(),
        }
    }

    /// Run pre-trade checks on a candidate, assigning it a fresh order id
    pub fn check(&self, candidate: &OrderCandidate) -> GateResult {
        let order_id = Uuid::new_v4();
        self.candidates.insert(order_id, candidate.clone());

        let Some(price) = self.validate_fields(candidate) else {
            warn!("order {} rejected: missing or invalid fields", order_id);
            return GateResult::Rejected {
                order_id,
                reason: RejectReason::MissingFields,
            };
        };

        let current = self.ledger.net_quantity(&candidate.symbol);
        let breach = match candidate.side {
            Side::Buy => current + candidate.quantity > self.limits.position_limit,
            Side::Sell => current - candidate.quantity < -self.limits.position_limit,
        };
        if breach {
            warn!(
                "order {} rejected: position limit ({} {} {} against net {})",
                order_id,
                candidate.side.as_str(),
                candidate.quantity,
                candidate.symbol,
                current
            );
            return GateResult::Rejected {
                order_id,
                reason: RejectReason::PositionLimit,
            };
        }

        // The aggregate is taken before the order: the candidate's full
        // notional is added on top even when it would reduce a position.
        let candidate_notional = Decimal::from(candidate.quantity) * price;
        if self.ledger.gross_notional() + candidate_notional > self.limits.notional_limit {
            warn!(
                "order {} rejected: notional limit (candidate notional {})",
                order_id, candidate_notional
            );
            return GateResult::Rejected {
                order_id,
                reason: RejectReason::NotionalLimit,
            };
        }

        info!("order {} passed risk checks", order_id);
        GateResult::Approved { order_id }
    }

    /// Returns the validated price, or None when any required field is
    /// absent or out of range
    fn validate_fields(&self, candidate: &OrderCandidate) -> Option<Decimal> {
        if candidate.symbol.is_empty() || candidate.quantity <= 0 || candidate.order_type.is_none()
        {
            return None;
        }
        candidate.price.filter(|price| *price > Decimal::ZERO)
    }

    /// Diagnostic lookup of any candidate ever checked
    pub fn candidate(&self, order_id: &OrderId) -> Option<OrderCandidate> {
        self.candidates
            .get(order_id)
            .map(|entry| entry.value().clone())
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }
}
