//! Lifecycle Events
//!
//! Everything external collaborators (persistence, dashboards) learn
//! about the pipeline, published at each order state transition.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vela_core::{Fill, OrderId, OrderStatus};
use vela_ledger::{PnlReport, Position};

/// Event published on the coordinator's broadcast channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// An order moved to a new status
    OrderStatusChanged {
        order_id: OrderId,
        status: OrderStatus,
        reason: Option<String>,
    },
    /// A fill was confirmed and applied to the ledger
    FillRecorded { fill: Fill },
    /// Non-zero positions after a fill
    PositionSnapshot {
        positions: HashMap<String, Position>,
    },
    /// PnL after a fill
    PnlSnapshot { report: PnlReport },
}
