//! Execution Simulator
//!
//! Resolves each approved order to a fill or a rejection after a simulated
//! network delay. Field validation failures resolve immediately, without
//! the delay. Internal faults never propagate to the caller; they surface
//! as `EXCHANGE_ERROR` rejections.

use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::time::{Duration, sleep};
use vela_core::{Fill, Order};

use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};

/// Why the simulated exchange rejected an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecRejection {
    /// Order failed field validation
    InvalidOrder,
    /// The market declined the order
    MarketReject,
    /// Internal simulator fault, surfaced as a rejection
    ExchangeError,
}

impl ExecRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecRejection::InvalidOrder => "INVALID_ORDER",
            ExecRejection::MarketReject => "MARKET_REJECT",
            ExecRejection::ExchangeError => "EXCHANGE_ERROR",
        }
    }
}

impl fmt::Display for ExecRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of submitting an order to the simulated exchange
#[derive(Debug, Clone)]
pub enum ExecutionOutcome {
    Filled(Fill),
    Rejected(ExecRejection),
}

impl ExecutionOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, ExecutionOutcome::Filled(_))
    }
}

/// Stochastic exchange model
pub struct ExchangeSimulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl ExchangeSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic simulator for tests and replays
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Process an order and resolve it to a fill or a rejection
    pub async fn execute(&mut self, order: &Order) -> ExecutionOutcome {
        if let Err(e) = validate(order) {
            error!("invalid order {}: {}", order.id, e);
            return ExecutionOutcome::Rejected(ExecRejection::InvalidOrder);
        }

        let (lo, hi) = self.config.latency_ms;
        let latency = self.rng.gen_range(lo..=hi);
        sleep(Duration::from_millis(latency)).await;

        if self.rng.r#gen::<f64>() >= self.config.fill_probability {
            info!("REJECTED: {} - MARKET_REJECT", order.id);
            return ExecutionOutcome::Rejected(ExecRejection::MarketReject);
        }

        match self.build_fill(order) {
            Ok(fill) => {
                info!(
                    "FILLED: {} {} @ {} (order {})",
                    fill.quantity, fill.symbol, fill.price, order.id
                );
                ExecutionOutcome::Filled(fill)
            }
            Err(e) => {
                error!("exchange fault for order {}: {}", order.id, e);
                ExecutionOutcome::Rejected(ExecRejection::ExchangeError)
            }
        }
    }

    fn build_fill(&mut self, order: &Order) -> Result<Fill> {
        let quantity = if self.rng.r#gen::<f64>() < self.config.partial_fill_probability {
            self.rng.gen_range(1..=order.quantity)
        } else {
            order.quantity
        };

        let (lo, hi) = self.config.slippage;
        let drawn = self.rng.gen_range(lo..=hi);
        let slippage = Decimal::from_f64_retain(drawn)
            .ok_or_else(|| SimulatorError::PriceConversion(format!("slippage {drawn}")))?;
        let price = (order.price + slippage).round_dp(2);

        Ok(Fill::new(
            order.id,
            order.symbol.clone(),
            order.side,
            quantity,
            price,
        ))
    }
}

fn validate(order: &Order) -> Result<()> {
    if order.symbol.is_empty() {
        return Err(SimulatorError::InvalidOrder("empty symbol".to_string()));
    }
    if order.quantity <= 0 {
        return Err(SimulatorError::InvalidOrder(format!(
            "quantity {}",
            order.quantity
        )));
    }
    if order.price <= Decimal::ZERO {
        return Err(SimulatorError::InvalidOrder(format!(
            "price {}",
            order.price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use vela_core::{OrderCandidate, OrderId, Side};

    fn order(quantity: i64, price: Decimal) -> Order {
        let candidate = OrderCandidate::limit("AAPL", Side::Buy, quantity, price, "test");
        Order::from_candidate(OrderId::new_v4(), &candidate).expect("well-formed candidate")
    }

    fn always_fill() -> SimulatorConfig {
        SimulatorConfig {
            fill_probability: 1.0,
            latency_ms: (1, 1),
            ..SimulatorConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_order_rejected_without_delay() {
        let mut sim = ExchangeSimulator::with_seed(SimulatorConfig::default(), 1);
        let mut bad = order(100, dec!(50));
        bad.quantity = 0;

        let before = tokio::time::Instant::now();
        let outcome = sim.execute(&bad).await;
        assert_eq!(before, tokio::time::Instant::now());

        match outcome {
            ExecutionOutcome::Rejected(reason) => {
                assert_eq!(reason, ExecRejection::InvalidOrder)
            }
            ExecutionOutcome::Filled(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_fills_at_zero_probability() {
        let config = SimulatorConfig {
            fill_probability: 0.0,
            latency_ms: (1, 1),
            ..SimulatorConfig::default()
        };
        let mut sim = ExchangeSimulator::with_seed(config, 2);

        for _ in 0..50 {
            match sim.execute(&order(100, dec!(50))).await {
                ExecutionOutcome::Rejected(reason) => {
                    assert_eq!(reason, ExecRejection::MarketReject)
                }
                ExecutionOutcome::Filled(_) => panic!("expected rejection"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fill_stays_within_bounds() {
        let mut sim = ExchangeSimulator::with_seed(always_fill(), 3);
        let order = order(100, dec!(50.00));

        for _ in 0..200 {
            match sim.execute(&order).await {
                ExecutionOutcome::Filled(fill) => {
                    assert!(fill.quantity >= 1 && fill.quantity <= 100);
                    assert!((fill.price - order.price).abs() <= dec!(0.02));
                    assert_eq!(fill.price, fill.price.round_dp(2));
                    assert_eq!(fill.order_id, order.id);
                    assert_eq!(fill.side, order.side);
                }
                ExecutionOutcome::Rejected(reason) => {
                    panic!("unexpected rejection: {reason}")
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_fills_draw_within_order_quantity() {
        let config = SimulatorConfig {
            partial_fill_probability: 1.0,
            ..always_fill()
        };
        let mut sim = ExchangeSimulator::with_seed(config, 4);
        let order = order(100, dec!(50.00));

        let mut saw_partial = false;
        for _ in 0..100 {
            if let ExecutionOutcome::Filled(fill) = sim.execute(&order).await {
                assert!(fill.quantity >= 1 && fill.quantity <= 100);
                saw_partial |= fill.quantity < 100;
            }
        }
        assert!(saw_partial);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_runs_are_deterministic() {
        let order = order(100, dec!(50.00));
        let mut outcomes = Vec::new();

        for _ in 0..2 {
            let mut sim = ExchangeSimulator::with_seed(SimulatorConfig::default(), 42);
            let mut run = Vec::new();
            for _ in 0..20 {
                let outcome = match sim.execute(&order).await {
                    ExecutionOutcome::Filled(fill) => (true, fill.quantity, fill.price),
                    ExecutionOutcome::Rejected(_) => (false, 0, Decimal::ZERO),
                };
                run.push(outcome);
            }
            outcomes.push(run);
        }

        assert_eq!(outcomes[0], outcomes[1]);
    }

    #[test]
    fn test_zero_slippage_echoes_order_price() {
        let config = SimulatorConfig {
            slippage: (0.0, 0.0),
            ..always_fill()
        };
        let mut sim = ExchangeSimulator::with_seed(config, 5);
        let order = order(100, dec!(50.00));

        let fill = sim.build_fill(&order).expect("fill");
        assert_eq!(fill.price, dec!(50.00));
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let good = order(100, dec!(50));
        assert!(validate(&good).is_ok());

        let mut bad = good.clone();
        bad.symbol.clear();
        assert!(validate(&bad).is_err());

        let mut bad = good.clone();
        bad.price = dec!(0);
        assert!(validate(&bad).is_err());
    }
}
