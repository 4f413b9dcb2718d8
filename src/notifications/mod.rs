//! Customer notifications
//!
//! Notification delivery is an external concern the orchestrator consumes
//! through the [`NotificationGateway`] trait: an explicitly constructed,
//! dependency-injected collaborator with no process-wide instance. Delivery
//! is fire-and-forget; a failed send never fails a workflow.

use crate::types::NotificationChannel;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Facility events a customer can be notified about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// Vehicle parked and ticket issued
    VehicleAdmitted,
    /// Vehicle exited and fee settled
    VehicleReleased,
    /// Wash order queued
    WashOrdered,
    /// Wash finished
    WashCompleted,
    /// Charging session finished
    ChargingCompleted,
    /// An outstanding fee needs paying
    PaymentDue,
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationEvent::VehicleAdmitted => write!(f, "Vehicle Admitted"),
            NotificationEvent::VehicleReleased => write!(f, "Vehicle Released"),
            NotificationEvent::WashOrdered => write!(f, "Wash Ordered"),
            NotificationEvent::WashCompleted => write!(f, "Wash Completed"),
            NotificationEvent::ChargingCompleted => write!(f, "Charging Completed"),
            NotificationEvent::PaymentDue => write!(f, "Payment Due"),
        }
    }
}

/// One attempted delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Channel used
    pub channel: NotificationChannel,
    /// Who it was addressed to
    pub recipient: String,
    /// What it was about
    pub event: NotificationEvent,
    /// Message body
    pub payload: String,
    /// Whether delivery succeeded
    pub delivered: bool,
    /// When the send was attempted
    pub sent_at: DateTime<Utc>,
}

/// Delivery collaborator consumed by the orchestrator
pub trait NotificationGateway: fmt::Debug {
    /// Attempt to deliver one notification; returns whether it arrived
    fn notify(
        &mut self,
        channel: NotificationChannel,
        recipient: &str,
        event: NotificationEvent,
        payload: &str,
        now: DateTime<Utc>,
    ) -> bool;
}

/// Simulated gateway: delivery succeeds with the channel's configured rate,
/// drawn from a seedable randomness source
#[derive(Debug)]
pub struct SimulatedGateway {
    rng: StdRng,
    history: Vec<NotificationRecord>,
}

impl SimulatedGateway {
    /// Create a gateway; a seed makes every delivery draw reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, history: Vec::new() }
    }

    /// Every attempted delivery, in send order
    pub fn history(&self) -> &[NotificationRecord] {
        &self.history
    }

    /// Deliveries attempted
    pub fn attempted_count(&self) -> usize {
        self.history.len()
    }

    /// Deliveries that arrived
    pub fn delivered_count(&self) -> usize {
        self.history.iter().filter(|r| r.delivered).count()
    }

    /// Attempted sends per channel
    pub fn counts_by_channel(&self) -> HashMap<NotificationChannel, usize> {
        let mut counts = HashMap::new();
        for record in &self.history {
            *counts.entry(record.channel).or_default() += 1;
        }
        counts
    }
}

impl NotificationGateway for SimulatedGateway {
    fn notify(
        &mut self,
        channel: NotificationChannel,
        recipient: &str,
        event: NotificationEvent,
        payload: &str,
        now: DateTime<Utc>,
    ) -> bool {
        let delivered = self.rng.gen_bool(channel.delivery_rate());
        if delivered {
            debug!(%channel, %event, recipient, "notification delivered");
        } else {
            warn!(%channel, %event, recipient, "notification delivery failed");
        }

        self.history.push(NotificationRecord {
            channel,
            recipient: recipient.to_string(),
            event,
            payload: payload.to_string(),
            delivered,
            sent_at: now,
        });
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_notify_records_history() {
        let mut gateway = SimulatedGateway::new(Some(1));
        gateway.notify(
            NotificationChannel::Sms,
            "34ABC123",
            NotificationEvent::VehicleAdmitted,
            "Your vehicle was parked at F0-S0",
            now(),
        );
        gateway.notify(
            NotificationChannel::Email,
            "34ABC123",
            NotificationEvent::VehicleReleased,
            "Your fee was 150.00",
            now(),
        );

        assert_eq!(gateway.attempted_count(), 2);
        let record = &gateway.history()[0];
        assert_eq!(record.channel, NotificationChannel::Sms);
        assert_eq!(record.event, NotificationEvent::VehicleAdmitted);
        assert_eq!(record.recipient, "34ABC123");

        let counts = gateway.counts_by_channel();
        assert_eq!(counts[&NotificationChannel::Sms], 1);
        assert_eq!(counts[&NotificationChannel::Email], 1);
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let mut a = SimulatedGateway::new(Some(42));
        let mut b = SimulatedGateway::new(Some(42));

        for i in 0..50 {
            let recipient = format!("R{}", i);
            let outcome_a = a.notify(
                NotificationChannel::Sms,
                &recipient,
                NotificationEvent::PaymentDue,
                "payload",
                now(),
            );
            let outcome_b = b.notify(
                NotificationChannel::Sms,
                &recipient,
                NotificationEvent::PaymentDue,
                "payload",
                now(),
            );
            assert_eq!(outcome_a, outcome_b);
        }
    }

    #[test]
    fn test_delivery_rate_under_fixed_seed() {
        let mut gateway = SimulatedGateway::new(Some(7));
        for i in 0..1000 {
            gateway.notify(
                NotificationChannel::Email,
                &format!("R{}", i),
                NotificationEvent::WashCompleted,
                "payload",
                now(),
            );
        }
        let delivered = gateway.delivered_count();
        // 0.98 rate; deterministic under the fixed seed
        assert!(delivered > 960, "delivered = {}", delivered);
    }
}
