//! Trading Simulation
//!
//! The ingestion loop: tick -> book -> strategy -> coordinator, one tick
//! at a time. Simulated executions resolve on per-symbol workers inside
//! the coordinator, so the loop keeps accepting ticks while orders are in
//! flight. A periodic stats reporter and a replay-based reconciliation
//! audit run alongside.

use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Duration, Instant, interval, interval_at, sleep};
use vela_ledger::{PnlEngine, PnlReport, Position, replay_realized};
use vela_oms::{CoordinatorConfig, LifecycleCoordinator, PipelineEvent, SubmitOutcome};
use vela_risk::RiskLimits;

use crate::book::BookAggregator;
use crate::feed::{FeedConfig, FeedSimulator};
use crate::strategy::{SpreadStrategy, Strategy, StrategyConfig};

/// Simulation configuration, read at startup and immutable thereafter
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub feed: FeedConfig,
    pub strategy: StrategyConfig,
    pub limits: RiskLimits,
    pub coordinator: CoordinatorConfig,
    /// Time between generated ticks
    pub tick_interval: Duration,
    /// Time between stats reports
    pub stats_interval: Duration,
    /// Total simulation duration
    pub duration: Duration,
    /// Feed seed; None draws from entropy
    pub feed_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            strategy: StrategyConfig::default(),
            limits: RiskLimits::default(),
            coordinator: CoordinatorConfig::default(),
            tick_interval: Duration::from_millis(100),
            stats_interval: Duration::from_secs(30),
            duration: Duration::from_secs(10),
            feed_seed: None,
        }
    }
}

/// Pipeline throughput counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationStats {
    pub ticks_processed: u64,
    pub signals_generated: u64,
    pub orders_sent: u64,
    pub orders_rejected: u64,
    pub fills_received: u64,
}

/// Final state of a completed simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResults {
    pub stats: SimulationStats,
    /// Non-zero positions at the end of the run
    pub positions: HashMap<String, Position>,
    pub realized_pnl: HashMap<String, rust_decimal::Decimal>,
    pub report: PnlReport,
    /// Whether the replay audit agreed with the live ledger
    pub reconciled: bool,
}

/// Full trading pipeline simulation
pub struct TradingSimulation {
    config: SimulationConfig,
    feed: FeedSimulator,
    books: BookAggregator,
    strategy: Box<dyn Strategy>,
    coordinator: LifecycleCoordinator,
    stats: SimulationStats,
}

impl TradingSimulation {
    /// Create a simulation running the default spread strategy
    pub fn new(config: SimulationConfig) -> Self {
        let strategy = Box::new(SpreadStrategy::new(config.strategy.clone()));
        Self::with_strategy(config, strategy)
    }

    /// Create a simulation running a custom strategy
    pub fn with_strategy(config: SimulationConfig, strategy: Box<dyn Strategy>) -> Self {
        let feed = match config.feed_seed {
            Some(seed) => FeedSimulator::with_seed(config.feed.clone(), seed),
            None => FeedSimulator::new(config.feed.clone()),
        };
        let coordinator =
            LifecycleCoordinator::new(config.limits.clone(), config.coordinator.clone());

        Self {
            config,
            feed,
            books: BookAggregator::new(),
            strategy,
            coordinator,
            stats: SimulationStats::default(),
        }
    }

    /// Run the ingestion loop for the configured duration, then drain
    /// in-flight executions and audit the ledger
    pub async fn run(mut self) -> SimulationResults {
        info!(
            "starting simulation: {} symbols, {:?} per tick, {:?} total",
            self.feed.symbols().len(),
            self.config.tick_interval,
            self.config.duration
        );

        let sink = tokio::spawn(event_sink(self.coordinator.subscribe()));

        let deadline = sleep(self.config.duration);
        tokio::pin!(deadline);
        let mut ticker = interval(self.config.tick_interval);
        let mut stats_timer = interval_at(
            Instant::now() + self.config.stats_interval,
            self.config.stats_interval,
        );

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                _ = ticker.tick() => self.on_tick().await,
                _ = stats_timer.tick() => self.log_stats(),
            }
        }

        // Let in-flight executions drain rather than aborting mid-update
        self.coordinator.shutdown().await;

        let reconciled = self.audit();
        let ledger = self.coordinator.ledger().clone();
        let marks = self.coordinator.marks().clone();
        self.stats.fills_received = ledger.fill_count() as u64;

        let results = SimulationResults {
            stats: self.stats.clone(),
            positions: ledger.positions(),
            realized_pnl: ledger.realized_by_symbol(),
            report: PnlEngine::new(ledger).report(&marks),
            reconciled,
        };

        // Closing the coordinator closes the event channel; the sink
        // flushes whatever is buffered and exits
        drop(self.coordinator);
        if let Err(e) = sink.await {
            warn!("event sink task failed: {e}");
        }

        info!(
            "simulation finished: {} ticks, {} fills, total pnl {}",
            results.stats.ticks_processed, results.stats.fills_received, results.report.total
        );
        results
    }

    /// Process one tick end to end; a faulting signal is dropped, never
    /// retried, and the loop keeps running
    async fn on_tick(&mut self) {
        let tick = self.feed.next_tick();
        let book = self.books.update(&tick);
        self.stats.ticks_processed += 1;

        // Latest mid feeds unrealized PnL
        self.coordinator.marks().update(&book.symbol, book.mid);

        let positions = self.coordinator.ledger().positions();
        let Some(candidate) = self.strategy.on_book(&book, &positions) else {
            return;
        };
        self.stats.signals_generated += 1;

        match self.coordinator.submit(candidate).await {
            Ok(SubmitOutcome::Approved(_)) => self.stats.orders_sent += 1,
            Ok(SubmitOutcome::Rejected { .. }) => self.stats.orders_rejected += 1,
            Err(e) => error!("dropping signal: {e}"),
        }
    }

    fn log_stats(&self) {
        let ledger = self.coordinator.ledger();

        info!("=== SYSTEM STATS ===");
        info!("ticks processed: {}", self.stats.ticks_processed);
        info!("signals generated: {}", self.stats.signals_generated);
        info!("orders sent: {}", self.stats.orders_sent);
        info!("orders rejected: {}", self.stats.orders_rejected);
        info!("fills received: {}", ledger.fill_count());

        let positions = ledger.positions();
        if !positions.is_empty() {
            info!("open positions: {positions:?}");
        }
        info!("total realized PnL: {}", ledger.total_realized());

        self.audit();
    }

    /// Compare the live realized accumulators against a from-scratch
    /// replay of the fill history
    fn audit(&self) -> bool {
        let ledger = self.coordinator.ledger();
        let replayed = replay_realized(&ledger.fill_history());
        let live = ledger.realized_by_symbol();
        if replayed != live {
            error!("realized PnL reconciliation mismatch: live={live:?} replayed={replayed:?}");
            return false;
        }
        true
    }
}

/// Stand-in for the persistence/dashboard collaborators: serializes every
/// lifecycle event. A slow or absent sink never stalls the pipeline.
async fn event_sink(mut rx: broadcast::Receiver<PipelineEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => debug!(target: "vela::events", "{json}"),
                Err(e) => warn!("event serialization failed: {e}"),
            },
            Err(RecvError::Lagged(n)) => warn!("event sink lagged by {n} events"),
            Err(RecvError::Closed) => break,
        }
    }
}
