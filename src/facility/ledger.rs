//! Revenue ledger
//!
//! The single place money is recorded. Revenue only ever increases; there is
//! no refund path. Every completed engagement appends one transaction record,
//! so the history doubles as an audit trail for the reporting queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of transaction a ledger record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Vehicle admitted
    Entry,
    /// Vehicle exited, parking fee collected
    Exit,
    /// Subscription fee collected at issuance
    Subscription,
    /// Wash order served
    Wash,
    /// Charging session completed
    Charging,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Entry => write!(f, "ENTRY"),
            TransactionKind::Exit => write!(f, "EXIT"),
            TransactionKind::Subscription => write!(f, "SUBSCRIPTION"),
            TransactionKind::Wash => write!(f, "WASH"),
            TransactionKind::Charging => write!(f, "CHARGING"),
        }
    }
}

/// One ledger line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction kind
    pub kind: TransactionKind,
    /// Plate of the vehicle involved
    pub plate: String,
    /// Amount collected, zero for entries
    pub amount: f64,
    /// When the transaction happened
    pub at: DateTime<Utc>,
}

/// Running aggregate of revenue and transaction counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    parking_revenue: f64,
    subscription_revenue: f64,
    wash_revenue: f64,
    charging_revenue: f64,
    entry_count: u64,
    exit_count: u64,
    records: Vec<TransactionRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vehicle admission (no money changes hands at the gate)
    pub fn record_entry(&mut self, plate: impl Into<String>, at: DateTime<Utc>) {
        self.entry_count += 1;
        self.push(TransactionKind::Entry, plate, 0.0, at);
    }

    /// Record a vehicle exit with its parking fee
    pub fn record_exit(&mut self, plate: impl Into<String>, fee: f64, at: DateTime<Utc>) {
        debug_assert!(fee >= 0.0);
        self.exit_count += 1;
        self.parking_revenue += fee;
        self.push(TransactionKind::Exit, plate, fee, at);
    }

    /// Record a subscription fee collected at issuance
    pub fn record_subscription(&mut self, plate: impl Into<String>, fee: f64, at: DateTime<Utc>) {
        debug_assert!(fee >= 0.0);
        self.subscription_revenue += fee;
        self.push(TransactionKind::Subscription, plate, fee, at);
    }

    /// Record revenue from a served wash order
    pub fn record_wash(&mut self, plate: impl Into<String>, price: f64, at: DateTime<Utc>) {
        debug_assert!(price >= 0.0);
        self.wash_revenue += price;
        self.push(TransactionKind::Wash, plate, price, at);
    }

    /// Record revenue from a completed charging session
    pub fn record_charging(&mut self, plate: impl Into<String>, cost: f64, at: DateTime<Utc>) {
        debug_assert!(cost >= 0.0);
        self.charging_revenue += cost;
        self.push(TransactionKind::Charging, plate, cost, at);
    }

    fn push(
        &mut self,
        kind: TransactionKind,
        plate: impl Into<String>,
        amount: f64,
        at: DateTime<Utc>,
    ) {
        self.records.push(TransactionRecord { kind, plate: plate.into(), amount, at });
    }

    /// Revenue from parking fees collected at exits
    pub fn parking_revenue(&self) -> f64 {
        self.parking_revenue
    }

    /// Revenue from subscription issuance fees
    pub fn subscription_revenue(&self) -> f64 {
        self.subscription_revenue
    }

    /// Revenue from the wash service
    pub fn wash_revenue(&self) -> f64 {
        self.wash_revenue
    }

    /// Revenue from the charging service
    pub fn charging_revenue(&self) -> f64 {
        self.charging_revenue
    }

    /// Total revenue across all streams
    pub fn total_revenue(&self) -> f64 {
        self.parking_revenue + self.subscription_revenue + self.wash_revenue + self.charging_revenue
    }

    /// Number of recorded admissions
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    /// Number of recorded exits
    pub fn exit_count(&self) -> u64 {
        self.exit_count
    }

    /// Every transaction, in order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }
}
