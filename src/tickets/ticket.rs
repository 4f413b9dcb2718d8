//! Parking tickets and their lifecycle
//!
//! A ticket is the engagement binding one vehicle to at most one spot. It is
//! issued `Pending`, becomes `Active` when a spot is bound, and ends
//! `Completed` (fee finalized, spot released) or `Cancelled` (no fee). The
//! transitions themselves live here; the orchestrator decides when to take
//! them.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::pricing;
use crate::types::{EngagementStatus, SpotId, TicketId, TicketKind, VehicleCategory};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parking ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,
    /// Plate of the vehicle this ticket belongs to
    pub plate: String,
    /// Vehicle category at issuance, snapshot for fee computation
    pub category: VehicleCategory,
    /// Ticket kind
    pub kind: TicketKind,
    /// Whether a yearly subscription includes VIP access
    pub vip_access: bool,
    /// When the ticket was issued
    pub issued_at: DateTime<Utc>,
    /// End of the validity window, subscription and daily kinds only
    pub expires_at: Option<DateTime<Utc>>,
    /// When the ticket became active (spot bound)
    pub started_at: Option<DateTime<Utc>>,
    /// When the ticket reached a terminal state
    pub ended_at: Option<DateTime<Utc>>,
    /// Spot the ticket is bound to while active
    pub spot: Option<SpotId>,
    /// Price multiplier of the bound spot, 1.0 until bound
    pub spot_multiplier: f64,
    /// Lifecycle state
    pub status: EngagementStatus,
    /// Final fee, set exactly once on completion
    pub fee: Option<f64>,
}

impl Ticket {
    /// Issue a new ticket in the `Pending` state
    pub fn issue(
        now: DateTime<Utc>,
        plate: impl Into<String>,
        category: VehicleCategory,
        kind: TicketKind,
    ) -> Self {
        Self {
            id: TicketId::new(),
            plate: plate.into(),
            category,
            kind,
            vip_access: false,
            issued_at: now,
            expires_at: kind.validity().map(|v| now + v),
            started_at: None,
            ended_at: None,
            spot: None,
            spot_multiplier: 1.0,
            status: EngagementStatus::Pending,
            fee: None,
        }
    }

    /// Add VIP access to a yearly subscription, raising its issuance fee
    pub fn with_vip_access(mut self) -> Self {
        self.vip_access = true;
        self
    }

    /// Bind a reserved spot and transition `Pending` -> `Active`
    pub fn activate(
        &mut self,
        spot: SpotId,
        spot_multiplier: f64,
        now: DateTime<Utc>,
    ) -> FacilityResult<()> {
        self.check_transition(EngagementStatus::Active)?;
        self.spot = Some(spot);
        self.spot_multiplier = spot_multiplier;
        self.started_at = Some(now);
        self.status = EngagementStatus::Active;
        Ok(())
    }

    /// Transition `Active` -> `Completed`, finalizing the fee.
    ///
    /// The fee is set exactly here and never again.
    pub fn complete(&mut self, now: DateTime<Utc>, fee: f64) -> FacilityResult<()> {
        self.check_transition(EngagementStatus::Completed)?;
        debug_assert!(fee >= 0.0, "fee must be non-negative");
        debug_assert!(self.fee.is_none(), "fee already finalized");
        self.ended_at = Some(now);
        self.fee = Some(fee);
        self.status = EngagementStatus::Completed;
        Ok(())
    }

    /// Transition to `Cancelled` from `Pending` or `Active`; no fee
    pub fn cancel(&mut self, now: DateTime<Utc>) -> FacilityResult<()> {
        self.check_transition(EngagementStatus::Cancelled)?;
        self.ended_at = Some(now);
        self.status = EngagementStatus::Cancelled;
        Ok(())
    }

    fn check_transition(&self, to: EngagementStatus) -> FacilityResult<()> {
        if !self.status.can_transition_to(to) {
            debug_assert!(false, "illegal transition {} -> {}", self.status, to);
            return Err(FacilityError::invalid_transition(self.status, to));
        }
        Ok(())
    }

    /// Whether the ticket is still inside its validity window
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => now < expiry,
            None => true,
        }
    }

    /// Time parked so far, measured from issuance
    pub fn parked_duration(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// Fee this ticket would owe for the given parking duration
    pub fn fee_for(&self, duration: Duration) -> f64 {
        pricing::parking_fee(
            self.kind,
            duration,
            self.category.size_multiplier(),
            self.spot_multiplier,
        )
    }

    /// Fee collected when this ticket was issued (subscriptions only)
    pub fn issuance_fee(&self) -> f64 {
        pricing::subscription_fee(self.kind, self.vip_access)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {} ({})", self.id, self.status, self.kind, self.plate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_issue_is_pending() {
        let ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Car, TicketKind::Hourly);
        assert_eq!(ticket.status, EngagementStatus::Pending);
        assert!(ticket.spot.is_none());
        assert!(ticket.started_at.is_none());
        assert!(ticket.fee.is_none());
        assert!(ticket.expires_at.is_none());
    }

    #[test]
    fn test_expiry_windows() {
        let daily = Ticket::issue(now(), "A", VehicleCategory::Car, TicketKind::Daily);
        assert_eq!(daily.expires_at, Some(now() + Duration::days(1)));

        let monthly = Ticket::issue(now(), "B", VehicleCategory::Car, TicketKind::Monthly);
        assert_eq!(monthly.expires_at, Some(now() + Duration::days(30)));
        assert!(monthly.is_valid(now() + Duration::days(29)));
        assert!(!monthly.is_valid(now() + Duration::days(30)));

        let hourly = Ticket::issue(now(), "C", VehicleCategory::Car, TicketKind::Hourly);
        assert!(hourly.is_valid(now() + Duration::days(1000)));
    }

    #[test]
    fn test_activate_binds_spot() {
        let mut ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Van, TicketKind::Hourly);
        let spot = SpotId::new();

        ticket.activate(spot, 2.5, now()).unwrap();
        assert_eq!(ticket.status, EngagementStatus::Active);
        assert_eq!(ticket.spot, Some(spot));
        assert_eq!(ticket.spot_multiplier, 2.5);
        assert_eq!(ticket.started_at, Some(now()));
    }

    #[test]
    fn test_complete_finalizes_fee_once() {
        let mut ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Car, TicketKind::Hourly);
        ticket.activate(SpotId::new(), 1.0, now()).unwrap();

        let end = now() + Duration::hours(2);
        ticket.complete(end, 200.0).unwrap();
        assert_eq!(ticket.status, EngagementStatus::Completed);
        assert_eq!(ticket.fee, Some(200.0));
        assert_eq!(ticket.ended_at, Some(end));
    }

    #[test]
    fn test_terminal_states_are_immutable() {
        let mut ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Car, TicketKind::Hourly);
        ticket.activate(SpotId::new(), 1.0, now()).unwrap();
        ticket.cancel(now()).unwrap();

        let err = ticket.activate(SpotId::new(), 1.0, now()).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidTransition { .. }));
        let err = ticket.cancel(now()).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidTransition { .. }));
    }

    #[test]
    fn test_completion_cannot_skip_active() {
        let mut ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Car, TicketKind::Hourly);
        let err = ticket.complete(now(), 100.0).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidTransition { .. }));
    }

    #[test]
    fn test_cancel_from_pending() {
        let mut ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Car, TicketKind::Hourly);
        ticket.cancel(now()).unwrap();
        assert_eq!(ticket.status, EngagementStatus::Cancelled);
        assert!(ticket.fee.is_none());
    }

    #[test]
    fn test_fee_uses_bound_spot_multiplier() {
        let mut ticket = Ticket::issue(now(), "34VAN001", VehicleCategory::Van, TicketKind::Hourly);
        // Unbound tickets price at spot multiplier 1.0
        assert_eq!(ticket.fee_for(Duration::zero()), 150.0);

        ticket.activate(SpotId::new(), 0.5, now()).unwrap();
        assert_eq!(ticket.fee_for(Duration::zero()), 75.0);
    }

    #[test]
    fn test_monthly_fee_is_zero_after_ten_days() {
        let ticket = Ticket::issue(now(), "34SUB001", VehicleCategory::Car, TicketKind::Monthly);
        assert_eq!(ticket.fee_for(Duration::days(10)), 0.0);
        assert_eq!(ticket.issuance_fee(), 3500.0);
    }

    #[test]
    fn test_yearly_vip_access_fee() {
        let plain = Ticket::issue(now(), "34YR001", VehicleCategory::Car, TicketKind::Yearly);
        assert_eq!(plain.issuance_fee(), 30000.0);

        let vip = Ticket::issue(now(), "34YR002", VehicleCategory::Car, TicketKind::Yearly)
            .with_vip_access();
        assert_eq!(vip.issuance_fee(), 45000.0);
    }

    #[test]
    fn test_parked_duration() {
        let ticket = Ticket::issue(now(), "34ABC123", VehicleCategory::Car, TicketKind::Hourly);
        assert_eq!(ticket.parked_duration(now() + Duration::minutes(90)), Duration::minutes(90));
    }
}
