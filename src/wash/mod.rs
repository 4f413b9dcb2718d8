//! Car wash service
//!
//! The one genuine piece of scheduling in the facility: wash orders enter a
//! FIFO queue and are served strictly in arrival order, one at a time per
//! available worker. Workers return to the free pool immediately when an
//! order completes; the wash itself takes no simulated time.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::pricing;
use crate::tickets::Ticket;
use crate::types::{EngagementStatus, OrderId, TicketId, VehicleCategory, WashPackageKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use tracing::{debug, info};

/// A wash crew member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WashWorker {
    /// Worker id, e.g. `W001`
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the worker is free to take the next order
    pub available: bool,
    /// Number of orders this worker completed
    pub completed_jobs: u32,
}

impl WashWorker {
    /// Create an available worker
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), available: true, completed_jobs: 0 }
    }
}

/// A car wash order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WashOrder {
    /// Unique identifier
    pub id: OrderId,
    /// Ticket the order was placed against
    pub ticket_id: TicketId,
    /// Plate of the vehicle being washed
    pub plate: String,
    /// Vehicle category, drives the package price
    pub category: VehicleCategory,
    /// Selected package
    pub package: WashPackageKind,
    /// Final price, fixed when the order is created
    pub price: f64,
    /// When the order was placed
    pub ordered_at: DateTime<Utc>,
    /// When a worker picked the order up
    pub started_at: Option<DateTime<Utc>>,
    /// When the wash finished
    pub completed_at: Option<DateTime<Utc>>,
    /// Lifecycle state
    pub status: EngagementStatus,
    /// Id of the worker who served the order
    pub worker_id: Option<String>,
}

impl fmt::Display for WashOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order {} - {} [{}] - {:.2}", self.id, self.package, self.status, self.price)
    }
}

/// What happened on a `process_next` call
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// The order at the head of the queue was served to completion
    Processed(WashOrder),
    /// Nothing was waiting
    QueueEmpty,
    /// Orders are waiting but every worker is busy
    NoWorkerAvailable,
}

/// The car wash service: package menu, order queue, and workers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarWashService {
    pending: VecDeque<WashOrder>,
    completed: Vec<WashOrder>,
    cancelled: Vec<WashOrder>,
    workers: Vec<WashWorker>,
}

impl CarWashService {
    /// Create a service with no workers on shift
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            completed: Vec::new(),
            cancelled: Vec::new(),
            workers: Vec::new(),
        }
    }

    /// Create a service with `count` named workers on shift
    pub fn with_workers(count: usize) -> Self {
        let mut service = Self::new();
        for i in 1..=count {
            service.add_worker(WashWorker::new(format!("W{:03}", i), format!("Wash Worker {}", i)));
        }
        service
    }

    /// Put a worker on shift
    pub fn add_worker(&mut self, worker: WashWorker) {
        info!(worker = %worker.name, "wash worker added");
        self.workers.push(worker);
    }

    /// Queue a wash order for a ticket.
    ///
    /// The price is computed from the vehicle category once, here, and never
    /// changes afterwards.
    pub fn create_order(
        &mut self,
        ticket: &Ticket,
        package: WashPackageKind,
        now: DateTime<Utc>,
    ) -> OrderId {
        let order = WashOrder {
            id: OrderId::new(),
            ticket_id: ticket.id,
            plate: ticket.plate.clone(),
            category: ticket.category,
            package,
            price: pricing::wash_price(package, ticket.category),
            ordered_at: now,
            started_at: None,
            completed_at: None,
            status: EngagementStatus::Pending,
            worker_id: None,
        };
        let id = order.id;
        info!(
            order = %id,
            package = %package,
            price = order.price,
            queue_position = self.pending.len() + 1,
            "wash order created"
        );
        self.pending.push_back(order);
        id
    }

    /// Serve the order at the head of the queue, if a worker is free.
    ///
    /// The worker toggles busy for the duration of the call and is back in
    /// the free pool when it returns; completion is instantaneous.
    pub fn process_next(&mut self, now: DateTime<Utc>) -> ProcessOutcome {
        if self.pending.is_empty() {
            debug!("no pending wash orders");
            return ProcessOutcome::QueueEmpty;
        }

        let Some(worker_idx) = self.workers.iter().position(|w| w.available) else {
            debug!("all wash workers busy");
            return ProcessOutcome::NoWorkerAvailable;
        };

        // Head of the queue only: strict arrival order
        let mut order = self.pending.pop_front().expect("queue checked non-empty");
        let worker = &mut self.workers[worker_idx];
        worker.available = false;

        order.worker_id = Some(worker.id.clone());
        order.started_at = Some(now);
        order.status = EngagementStatus::Active;

        order.completed_at = Some(now);
        order.status = EngagementStatus::Completed;
        worker.completed_jobs += 1;
        worker.available = true;

        info!(order = %order.id, worker = %worker.name, price = order.price, "wash completed");
        self.completed.push(order.clone());
        ProcessOutcome::Processed(order)
    }

    /// Drain the queue, serving every pending order in arrival order.
    /// Returns the completed orders.
    pub fn process_all(&mut self, now: DateTime<Utc>) -> Vec<WashOrder> {
        let mut processed = Vec::new();
        loop {
            match self.process_next(now) {
                ProcessOutcome::Processed(order) => processed.push(order),
                ProcessOutcome::QueueEmpty | ProcessOutcome::NoWorkerAvailable => break,
            }
        }
        processed
    }

    /// Cancel a pending order. Orders already picked up cannot be cancelled.
    pub fn cancel_order(&mut self, order_id: OrderId, now: DateTime<Utc>) -> FacilityResult<()> {
        let Some(pos) = self.pending.iter().position(|o| o.id == order_id) else {
            return Err(FacilityError::engagement_not_found(order_id));
        };
        let mut order = self.pending.remove(pos).expect("position checked");
        order.status = EngagementStatus::Cancelled;
        order.completed_at = Some(now);
        info!(order = %order.id, "wash order cancelled");
        self.cancelled.push(order);
        Ok(())
    }

    /// Position of an order in the queue, 1-based
    pub fn queue_position(&self, order_id: OrderId) -> Option<usize> {
        self.pending.iter().position(|o| o.id == order_id).map(|p| p + 1)
    }

    /// Number of orders waiting
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of orders served
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Served orders in completion order
    pub fn completed_orders(&self) -> &[WashOrder] {
        &self.completed
    }

    /// Workers on shift
    pub fn workers(&self) -> &[WashWorker] {
        &self.workers
    }

    /// The most frequently served package, with its count
    pub fn most_popular_package(&self) -> Option<(WashPackageKind, usize)> {
        let mut counts: HashMap<WashPackageKind, usize> = HashMap::new();
        for order in &self.completed {
            *counts.entry(order.package).or_default() += 1;
        }
        counts.into_iter().max_by_key(|&(_, count)| count)
    }
}

impl Default for CarWashService {
    fn default() -> Self {
        Self::new()
    }
}
