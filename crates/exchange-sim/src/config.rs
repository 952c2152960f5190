//! Simulator Configuration
//!
//! Read at startup, immutable thereafter.

use serde::{Deserialize, Serialize};

/// Tunable behavior of the simulated exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Probability an order fills at all
    pub fill_probability: f64,
    /// Simulated round-trip latency range in milliseconds, drawn uniformly
    pub latency_ms: (u64, u64),
    /// Symmetric band the fill price may deviate from the order price
    pub slippage: (f64, f64),
    /// Probability a fill is partial
    pub partial_fill_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            fill_probability: 0.85,
            latency_ms: (1, 50),
            slippage: (-0.02, 0.02),
            partial_fill_probability: 0.10,
        }
    }
}
