//! Vela Order Management
//!
//! The coordinator sequences every candidate order through the pipeline
//! and drives the status transitions external collaborators see:
//!
//! ```text
//! signal ──► Risk Gate ──► APPROVED ──► Execution Simulator ──► FILLED
//!               │                            │                    │
//!               ▼                            ▼                    ▼
//!           REJECTED                     REJECTED          Position Ledger
//!                                                                │
//!                                                                ▼
//!                                                           PnL Engine
//! ```
//!
//! Terminal statuses are REJECTED and FILLED. Every transition is
//! published as a [`PipelineEvent`] on a broadcast channel; persistence
//! and dashboards subscribe there and can never stall the pipeline.
//!
//! One execution worker per symbol keeps fills FIFO per symbol (the
//! weighted-average-cost math is order-sensitive) while the ingestion
//! side never waits out simulated exchange latency.

pub mod coordinator;
pub mod error;
pub mod events;

// Re-export main types
pub use coordinator::{
    CoordinatorConfig, LifecycleCoordinator, OrderRecord, SubmitOutcome,
};
pub use error::{Error, Result};
pub use events::PipelineEvent;
