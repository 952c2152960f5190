//! Order Lifecycle Coordinator
//!
//! Owns the gate, the ledger and the per-order status map, and routes
//! approved orders to per-symbol execution workers. Each worker consumes
//! its symbol's channel in FIFO order and is the only writer for that
//! symbol's position, so cross-symbol fills never contend and same-symbol
//! fills apply in submission order.

use dashmap::DashMap;
use log::{error, info, warn};
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use vela_core::{Fill, Order, OrderCandidate, OrderId, OrderStatus};
use vela_exchange_sim::{ExchangeSimulator, ExecutionOutcome, SimulatorConfig};
use vela_ledger::{MarkPrices, PnlEngine, PositionLedger};
use vela_risk::{GateResult, RejectReason, RiskGate, RiskLimits};

use crate::error::{Error, Result};
use crate::events::PipelineEvent;

/// Everything the OMS remembers about one order
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: OrderId,
    pub candidate: OrderCandidate,
    /// Built once the gate approves; gate rejections never produce one
    pub order: Option<Order>,
    pub status: OrderStatus,
    pub reason: Option<String>,
    pub fill: Option<Fill>,
}

/// Result of submitting a candidate to the pipeline
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Passed the gate; execution resolves asynchronously
    Approved(OrderId),
    /// Rejected at the gate
    Rejected {
        order_id: OrderId,
        reason: RejectReason,
    },
}

/// Coordinator configuration
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub simulator: SimulatorConfig,
    /// Capacity of each per-symbol order channel
    pub worker_queue_depth: usize,
    /// Capacity of the outbound event channel
    pub event_capacity: usize,
    /// Base seed for per-symbol simulators; None draws from entropy
    pub simulator_seed: Option<u64>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            simulator: SimulatorConfig::default(),
            worker_queue_depth: 1024,
            event_capacity: 1024,
            simulator_seed: None,
        }
    }
}

/// Sequences candidates through gate, execution and the ledger
pub struct LifecycleCoordinator {
    config: CoordinatorConfig,
    gate: RiskGate,
    ledger: Arc<PositionLedger>,
    marks: Arc<MarkPrices>,
    /// Per-order status map; the only mutable shared state besides the ledger
    orders: Arc<DashMap<OrderId, OrderRecord>>,
    /// Dispatch channel per symbol; each worker drains one in FIFO order
    workers: HashMap<String, mpsc::Sender<Order>>,
    handles: Vec<JoinHandle<()>>,
    events: broadcast::Sender<PipelineEvent>,
}

impl LifecycleCoordinator {
    pub fn new(limits: RiskLimits, config: CoordinatorConfig) -> Self {
        let ledger = Arc::new(PositionLedger::new());
        let gate = RiskGate::new(limits, ledger.clone());
        let (events, _) = broadcast::channel(config.event_capacity);

        Self {
            config,
            gate,
            ledger,
            marks: Arc::new(MarkPrices::new()),
            orders: Arc::new(DashMap::new()),
            workers: HashMap::new(),
            handles: Vec::new(),
            events,
        }
    }

    /// Drive one candidate through the gate and, if approved, hand it to
    /// its symbol's execution worker. Never waits out exchange latency.
    pub async fn submit(&mut self, candidate: OrderCandidate) -> Result<SubmitOutcome> {
        match self.gate.check(&candidate) {
            GateResult::Rejected { order_id, reason } => {
                let reason_str = reason.as_str().to_string();
                self.orders.insert(
                    order_id,
                    OrderRecord {
                        id: order_id,
                        candidate,
                        order: None,
                        status: OrderStatus::Rejected,
                        reason: Some(reason_str.clone()),
                        fill: None,
                    },
                );
                let _ = self.events.send(PipelineEvent::OrderStatusChanged {
                    order_id,
                    status: OrderStatus::Rejected,
                    reason: Some(reason_str),
                });
                Ok(SubmitOutcome::Rejected { order_id, reason })
            }
            GateResult::Approved { order_id } => {
                let Some(mut order) = Order::from_candidate(order_id, &candidate) else {
                    // The gate never approves a candidate with missing fields
                    return Err(Error::MalformedApproval { order_id });
                };
                order.status = OrderStatus::Approved;
                self.orders.insert(
                    order_id,
                    OrderRecord {
                        id: order_id,
                        candidate,
                        order: Some(order.clone()),
                        status: OrderStatus::Approved,
                        reason: None,
                        fill: None,
                    },
                );
                let _ = self.events.send(PipelineEvent::OrderStatusChanged {
                    order_id,
                    status: OrderStatus::Approved,
                    reason: None,
                });

                self.dispatch(order).await?;
                Ok(SubmitOutcome::Approved(order_id))
            }
        }
    }

    async fn dispatch(&mut self, order: Order) -> Result<()> {
        let symbol = order.symbol.clone();
        let tx = match self.workers.get(&symbol) {
            Some(tx) => tx.clone(),
            None => self.spawn_worker(&symbol),
        };
        tx.send(order)
            .await
            .map_err(|_| Error::WorkerGone { symbol })
    }

    fn spawn_worker(&mut self, symbol: &str) -> mpsc::Sender<Order> {
        let (tx, mut rx) = mpsc::channel::<Order>(self.config.worker_queue_depth);

        let simulator = match self.config.simulator_seed {
            Some(base) => ExchangeSimulator::with_seed(
                self.config.simulator.clone(),
                symbol_seed(base, symbol),
            ),
            None => ExchangeSimulator::new(self.config.simulator.clone()),
        };

        let ledger = self.ledger.clone();
        let marks = self.marks.clone();
        let orders = self.orders.clone();
        let events = self.events.clone();
        let worker_symbol = symbol.to_string();

        let handle = tokio::spawn(async move {
            let mut simulator = simulator;
            let pnl = PnlEngine::new(ledger.clone());

            while let Some(order) = rx.recv().await {
                let order_id = order.id;
                match simulator.execute(&order).await {
                    ExecutionOutcome::Filled(fill) => {
                        let realized = ledger.apply_fill(&fill);
                        transition(&orders, order_id, OrderStatus::Filled, None, Some(&fill));
                        info!(
                            "order filled: {} {} @ {} (realized delta {})",
                            fill.quantity, fill.symbol, fill.price, realized
                        );

                        let _ = events.send(PipelineEvent::OrderStatusChanged {
                            order_id,
                            status: OrderStatus::Filled,
                            reason: None,
                        });
                        let _ = events.send(PipelineEvent::FillRecorded { fill });
                        let _ = events.send(PipelineEvent::PositionSnapshot {
                            positions: ledger.positions(),
                        });
                        let _ = events.send(PipelineEvent::PnlSnapshot {
                            report: pnl.report(&marks),
                        });
                    }
                    ExecutionOutcome::Rejected(rejection) => {
                        let reason = rejection.as_str().to_string();
                        transition(
                            &orders,
                            order_id,
                            OrderStatus::Rejected,
                            Some(reason.clone()),
                            None,
                        );
                        warn!("order {} rejected by exchange: {}", order_id, reason);

                        let _ = events.send(PipelineEvent::OrderStatusChanged {
                            order_id,
                            status: OrderStatus::Rejected,
                            reason: Some(reason),
                        });
                    }
                }
            }
            info!("execution worker for {} drained", worker_symbol);
        });

        self.handles.push(handle);
        self.workers.insert(symbol.to_string(), tx.clone());
        tx
    }

    /// Drop the dispatch channels and wait for every in-flight execution
    /// to drain; ledger updates are never aborted mid-flight.
    pub async fn shutdown(&mut self) {
        self.workers.clear();
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!("execution worker panicked: {e}");
            }
        }
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    /// Look up one order's record
    pub fn order(&self, order_id: &OrderId) -> Option<OrderRecord> {
        self.orders.get(order_id).map(|entry| entry.value().clone())
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn ledger(&self) -> &Arc<PositionLedger> {
        &self.ledger
    }

    pub fn marks(&self) -> &Arc<MarkPrices> {
        &self.marks
    }

    pub fn gate(&self) -> &RiskGate {
        &self.gate
    }
}

fn transition(
    orders: &DashMap<OrderId, OrderRecord>,
    order_id: OrderId,
    status: OrderStatus,
    reason: Option<String>,
    fill: Option<&Fill>,
) {
    if let Some(mut record) = orders.get_mut(&order_id) {
        record.status = status;
        record.reason = reason;
        if let Some(fill) = fill {
            record.fill = Some(fill.clone());
        }
        if let Some(order) = record.order.as_mut() {
            order.status = status;
        }
    }
}

fn symbol_seed(base: u64, symbol: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    symbol.hash(&mut hasher);
    base ^ hasher.finish()
}
