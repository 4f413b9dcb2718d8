//! Facility orchestrator
//!
//! `ParkingFacility` composes the spot pool, pricing engine, ticket
//! lifecycle, wash and charging services, security log, and notification
//! gateway into the admission, exit, wash, charging, and incident workflows.
//! Every workflow follows the same shape: acquire a resource, transition the
//! engagement, release the resource, update the ledger, then fire the
//! collaterals (security log, notifications).
//!
//! Failures never leave partial state behind: a reserved spot is released
//! before an error returns, and a declined payment leaves the ticket active
//! and the spot occupied.

use crate::charging::ChargingStationManager;
use crate::facility::clock::Clock;
use crate::facility::error::{FacilityError, FacilityResult};
use crate::facility::ledger::Ledger;
use crate::notifications::{NotificationEvent, NotificationGateway};
use crate::payments::{Payment, PaymentMethod};
use crate::pricing;
use crate::security::SecurityLog;
use crate::spots::SpotPool;
use crate::tickets::Ticket;
use crate::types::{
    ChargerType, FacilityConfig, IncidentId, IncidentKind, NotificationChannel, OrderId,
    ReservationId, SessionId, SpotKind, TicketId, TicketKind, WashPackageKind,
};
use crate::vehicle::Vehicle;
use crate::wash::{CarWashService, ProcessOutcome};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Delivery counters for dispatched notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationStats {
    /// Sends attempted
    pub attempted: u64,
    /// Sends that arrived
    pub delivered: u64,
}

/// The facility orchestrator
#[derive(Debug)]
pub struct ParkingFacility {
    config: FacilityConfig,
    clock: Clock,
    rng: StdRng,
    pool: SpotPool,
    active_tickets: HashMap<TicketId, Ticket>,
    active_plates: HashMap<String, TicketId>,
    vehicles: HashMap<String, Vehicle>,
    wash: CarWashService,
    charging: ChargingStationManager,
    security: SecurityLog,
    notifier: Box<dyn NotificationGateway>,
    notification_stats: NotificationStats,
    ledger: Ledger,
}

impl ParkingFacility {
    /// Build a facility from its configuration.
    ///
    /// The notification gateway is injected; the facility never constructs
    /// its own delivery transport.
    #[instrument(skip(config, notifier), fields(floors = config.floors, spots_per_floor = config.spots_per_floor))]
    pub fn new(
        config: FacilityConfig,
        notifier: Box<dyn NotificationGateway>,
    ) -> FacilityResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => {
                info!(seed, "using deterministic seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let pool = SpotPool::build(config.floors, config.spots_per_floor);
        let charging = ChargingStationManager::from_ev_spots(&pool.ev_spot_ids());
        let wash = CarWashService::with_workers(config.wash_workers);

        info!(
            name = %config.name,
            capacity = pool.total(),
            charging_stations = charging.stations().len(),
            wash_workers = config.wash_workers,
            "facility initialized"
        );

        Ok(Self {
            config,
            clock: Clock::System,
            rng,
            pool,
            active_tickets: HashMap::new(),
            active_plates: HashMap::new(),
            vehicles: HashMap::new(),
            wash,
            charging,
            security: SecurityLog::new(),
            notifier,
            notification_stats: NotificationStats::default(),
            ledger: Ledger::new(),
        })
    }

    /// Replace the time source, for deterministic tests
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Mutable access to the time source, for advancing a fixed clock
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Admit a vehicle: allocate a spot, issue and activate a ticket of the
    /// requested kind, and fire the entry collaterals.
    ///
    /// Subscription kinds pay their issuance fee here. An electric vehicle
    /// flagged as needing a charge that lands on a charging spot triggers a
    /// charging session as a side effect; a failure of that side effect is
    /// logged but does not fail the admission.
    pub fn admit(&mut self, vehicle: Vehicle, kind: TicketKind) -> FacilityResult<TicketId> {
        let now = self.clock.now();

        if self.active_plates.contains_key(&vehicle.plate) {
            return Err(FacilityError::invalid_consumer(format!(
                "vehicle {} is already parked",
                vehicle.plate
            )));
        }

        let spot_id = self.pool.allocate(vehicle.category).ok_or_else(|| {
            FacilityError::resource_unavailable(format!("parking spot for {}", vehicle.category))
        })?;
        let spot = self.pool.get(spot_id).expect("allocated spot exists");
        let spot_kind = spot.kind;
        let spot_label = spot.label.clone();
        let spot_multiplier = spot.price_multiplier();

        let mut ticket = Ticket::issue(now, &vehicle.plate, vehicle.category, kind);
        if let Err(error) = ticket.activate(spot_id, spot_multiplier, now) {
            // Allocate-then-fail paths release the spot before surfacing
            self.pool.release(spot_id);
            return Err(error);
        }

        let issuance_fee = ticket.issuance_fee();
        if issuance_fee > 0.0 {
            self.ledger.record_subscription(&vehicle.plate, issuance_fee, now);
        }
        self.ledger.record_entry(&vehicle.plate, now);
        self.security.log_entry(&vehicle.plate, spot_id, now, &mut self.rng);

        let ticket_id = ticket.id;
        let plate = vehicle.plate.clone();
        let wants_charge =
            vehicle.is_electric() && vehicle.needs_charging && spot_kind == SpotKind::EvCharging;

        self.active_plates.insert(plate.clone(), ticket_id);
        self.vehicles.insert(plate.clone(), vehicle);
        self.active_tickets.insert(ticket_id, ticket);

        info!(ticket = %ticket_id, %plate, spot = %spot_label, %kind, "vehicle admitted");
        self.dispatch(
            NotificationEvent::VehicleAdmitted,
            &plate,
            format!("Vehicle {} parked at spot {}", plate, spot_label),
        );

        if wants_charge {
            if let Err(error) = self.start_charging(ticket_id, None) {
                warn!(%error, %plate, "charging after admission failed");
            }
        }

        Ok(ticket_id)
    }

    /// Release a vehicle: compute the fee for the parked duration, collect
    /// payment if the fee is non-zero, free the spot, and fire the exit
    /// collaterals. Returns the collected fee.
    ///
    /// On [`FacilityError::PaymentRequired`], [`FacilityError::PaymentFailed`]
    /// or [`FacilityError::ExpiredEngagement`] nothing changes: the ticket
    /// stays active and the spot stays occupied.
    pub fn release(
        &mut self,
        ticket_id: TicketId,
        payment: Option<PaymentMethod>,
    ) -> FacilityResult<f64> {
        let now = self.clock.now();

        let ticket = self
            .active_tickets
            .get(&ticket_id)
            .ok_or_else(|| FacilityError::engagement_not_found(ticket_id))?;

        if !ticket.is_valid(now) {
            let expired_at = ticket.expires_at.expect("only expiring kinds can be invalid");
            return Err(FacilityError::expired_engagement(ticket_id, expired_at));
        }

        let fee = ticket.fee_for(ticket.parked_duration(now));
        debug_assert!(fee >= 0.0);

        if fee > 0.0 {
            let method = payment.ok_or_else(|| FacilityError::payment_required(fee))?;
            let mut payment = Payment::new(method, fee);
            if !payment.process(now, &mut self.rng) {
                return Err(FacilityError::payment_failed(fee, payment.method.to_string()));
            }
        }

        // All checks passed; commit the exit
        let mut ticket =
            self.active_tickets.remove(&ticket_id).expect("presence checked above");
        if let Err(error) = ticket.complete(now, fee) {
            self.active_tickets.insert(ticket_id, ticket);
            return Err(error);
        }

        let spot_id = ticket.spot.expect("active ticket holds a spot");
        self.pool.release(spot_id);
        self.active_plates.remove(&ticket.plate);
        self.vehicles.remove(&ticket.plate);
        self.ledger.record_exit(&ticket.plate, fee, now);
        self.security.log_exit(&ticket.plate, spot_id, now, &mut self.rng);

        info!(ticket = %ticket_id, plate = %ticket.plate, fee, "vehicle released");
        let plate = ticket.plate.clone();
        self.dispatch(
            NotificationEvent::VehicleReleased,
            &plate,
            format!("Vehicle {} exited, fee {:.2}", plate, pricing::round_display(fee)),
        );

        Ok(fee)
    }

    /// Cancel an active ticket: the spot is freed and no fee is collected.
    ///
    /// This is the recovery path for an expired subscription that `release`
    /// refuses to settle.
    pub fn cancel_ticket(&mut self, ticket_id: TicketId) -> FacilityResult<()> {
        let now = self.clock.now();

        let mut ticket = self
            .active_tickets
            .remove(&ticket_id)
            .ok_or_else(|| FacilityError::engagement_not_found(ticket_id))?;
        if let Err(error) = ticket.cancel(now) {
            self.active_tickets.insert(ticket_id, ticket);
            return Err(error);
        }

        if let Some(spot_id) = ticket.spot {
            self.pool.release(spot_id);
            self.security.log_exit(&ticket.plate, spot_id, now, &mut self.rng);
        }
        self.active_plates.remove(&ticket.plate);
        self.vehicles.remove(&ticket.plate);

        info!(ticket = %ticket_id, plate = %ticket.plate, "ticket cancelled");
        Ok(())
    }

    /// Queue a wash order for an active ticket
    pub fn order_wash(
        &mut self,
        ticket_id: TicketId,
        package: WashPackageKind,
    ) -> FacilityResult<OrderId> {
        let now = self.clock.now();
        let ticket = self
            .active_tickets
            .get(&ticket_id)
            .ok_or_else(|| FacilityError::engagement_not_found(ticket_id))?;

        let plate = ticket.plate.clone();
        let order_id = self.wash.create_order(ticket, package, now);
        self.dispatch(
            NotificationEvent::WashOrdered,
            &plate,
            format!("Wash order {} queued ({})", order_id, package),
        );
        Ok(order_id)
    }

    /// Serve the wash order at the head of the queue, accruing its revenue
    pub fn process_next_wash(&mut self) -> ProcessOutcome {
        let now = self.clock.now();
        let outcome = self.wash.process_next(now);
        if let ProcessOutcome::Processed(order) = &outcome {
            self.ledger.record_wash(&order.plate, order.price, now);
            let plate = order.plate.clone();
            let payload = format!("Wash order {} completed", order.id);
            self.dispatch(NotificationEvent::WashCompleted, &plate, payload);
        }
        outcome
    }

    /// Serve every queued wash order; returns how many were completed
    pub fn process_all_washes(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.process_next_wash() {
                ProcessOutcome::Processed(_) => processed += 1,
                ProcessOutcome::QueueEmpty | ProcessOutcome::NoWorkerAvailable => break,
            }
        }
        processed
    }

    /// Run a charging session for the vehicle on an active ticket.
    ///
    /// Defaults to the configured target percentage. The session completes
    /// instantly; its cost accrues to the ledger and the vehicle's
    /// needs-charging flag is cleared.
    pub fn start_charging(
        &mut self,
        ticket_id: TicketId,
        target_percent: Option<u8>,
    ) -> FacilityResult<SessionId> {
        let now = self.clock.now();
        let ticket = self
            .active_tickets
            .get(&ticket_id)
            .ok_or_else(|| FacilityError::engagement_not_found(ticket_id))?;
        let vehicle = self.vehicles.get(&ticket.plate).ok_or_else(|| {
            FacilityError::invalid_consumer(format!("no vehicle on record for {}", ticket.plate))
        })?;

        let target = target_percent.unwrap_or(self.config.default_charge_target);
        let session = self.charging.start_session(vehicle, target, now)?;

        self.ledger.record_charging(&session.plate, session.cost, now);
        if let Some(vehicle) = self.vehicles.get_mut(&session.plate) {
            vehicle.needs_charging = false;
        }

        let plate = session.plate.clone();
        let payload = format!(
            "Charged to {}%: {:.2} kWh for {:.2}",
            session.target_percent,
            session.energy_kwh,
            pricing::round_display(session.cost)
        );
        self.dispatch(NotificationEvent::ChargingCompleted, &plate, payload);
        Ok(session.id)
    }

    /// Reserve a charging station for a future slot
    pub fn reserve_charging(
        &mut self,
        plate: &str,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
        preferred: Option<ChargerType>,
    ) -> FacilityResult<ReservationId> {
        let now = self.clock.now();
        self.charging.create_reservation(plate, scheduled_at, duration_minutes, preferred, now)
    }

    /// File a security incident report
    pub fn report_incident(
        &mut self,
        kind: IncidentKind,
        description: &str,
        location: &str,
        floor: usize,
        reporter: &str,
    ) -> IncidentId {
        let now = self.clock.now();
        self.security.record_incident(kind, description, location, floor, reporter, now)
    }

    fn dispatch(&mut self, event: NotificationEvent, recipient: &str, payload: String) {
        let now = self.clock.now();
        // Fire-and-forget: a failed delivery is counted, never propagated
        for channel in [NotificationChannel::Sms, NotificationChannel::Email] {
            let delivered = self.notifier.notify(channel, recipient, event, &payload, now);
            self.notification_stats.attempted += 1;
            if delivered {
                self.notification_stats.delivered += 1;
            } else {
                debug!(%channel, %event, recipient, "notification lost");
            }
        }
    }

    /// Facility configuration
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// The spot pool, read-only
    pub fn pool(&self) -> &SpotPool {
        &self.pool
    }

    /// The wash service, read-only
    pub fn wash(&self) -> &CarWashService {
        &self.wash
    }

    /// The charging manager, read-only
    pub fn charging(&self) -> &ChargingStationManager {
        &self.charging
    }

    /// The security log, read-only
    pub fn security(&self) -> &SecurityLog {
        &self.security
    }

    /// Mutable security log, for the incident investigation workflow
    pub fn security_mut(&mut self) -> &mut SecurityLog {
        &mut self.security
    }

    /// The revenue ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Delivery counters for dispatched notifications
    pub fn notification_stats(&self) -> NotificationStats {
        self.notification_stats
    }

    /// Look up an active ticket
    pub fn ticket(&self, ticket_id: TicketId) -> Option<&Ticket> {
        self.active_tickets.get(&ticket_id)
    }

    /// Look up a currently parked vehicle by plate
    pub fn vehicle(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.get(plate)
    }

    /// Active ticket for a plate, if the vehicle is currently parked
    pub fn ticket_for_plate(&self, plate: &str) -> Option<&Ticket> {
        self.active_plates.get(plate).and_then(|id| self.active_tickets.get(id))
    }

    /// Number of vehicles currently parked
    pub fn active_ticket_count(&self) -> usize {
        self.active_tickets.len()
    }

    /// Active tickets in arbitrary order
    pub fn active_tickets(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.active_tickets.values()
    }

    /// Total revenue across parking, subscriptions, wash, and charging
    pub fn total_revenue(&self) -> f64 {
        self.ledger.total_revenue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::SimulatedGateway;
    use crate::types::VehicleCategory;

    fn facility() -> ParkingFacility {
        let config = FacilityConfig { seed: Some(42), ..Default::default() };
        ParkingFacility::new(config, Box::new(SimulatedGateway::new(Some(42))))
            .unwrap()
            .with_clock(Clock::fixed("2026-03-01T10:00:00Z".parse().unwrap()))
    }

    fn car(plate: &str) -> Vehicle {
        Vehicle::new(plate, VehicleCategory::Car, "Toyota", "Corolla", "Blue").unwrap()
    }

    #[test]
    fn test_facility_creation() {
        let facility = facility();
        assert_eq!(facility.pool().total(), 60);
        assert_eq!(facility.charging().stations().len(), 6);
        assert_eq!(facility.wash().workers().len(), 2);
        assert_eq!(facility.active_ticket_count(), 0);
        assert_eq!(facility.total_revenue(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FacilityConfig { floors: 0, ..Default::default() };
        let result = ParkingFacility::new(config, Box::new(SimulatedGateway::new(None)));
        assert!(matches!(result, Err(FacilityError::ConfigurationError(_))));
    }

    #[test]
    fn test_admit_binds_spot_and_indexes_ticket() {
        let mut facility = facility();
        let ticket_id = facility.admit(car("34ABC123"), TicketKind::Hourly).unwrap();

        assert_eq!(facility.active_ticket_count(), 1);
        assert_eq!(facility.pool().occupied_count(), 1);

        let ticket = facility.ticket(ticket_id).unwrap();
        assert_eq!(ticket.status, crate::types::EngagementStatus::Active);
        assert!(ticket.spot.is_some());
        assert!(facility.ticket_for_plate("34ABC123").is_some());

        // Admission is logged by security and notified twice (SMS + email)
        assert_eq!(facility.security().access_history("34ABC123").len(), 1);
        assert_eq!(facility.notification_stats().attempted, 2);
    }

    #[test]
    fn test_duplicate_plate_rejected() {
        let mut facility = facility();
        facility.admit(car("34ABC123"), TicketKind::Hourly).unwrap();

        let err = facility.admit(car("34ABC123"), TicketKind::Daily).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidConsumer(_)));
        // The failed admission did not leak a reservation
        assert_eq!(facility.pool().occupied_count(), 1);
    }

    #[test]
    fn test_subscription_issuance_fee_hits_ledger() {
        let mut facility = facility();
        facility.admit(car("34SUB001"), TicketKind::Monthly).unwrap();
        assert_eq!(facility.ledger().subscription_revenue(), 3500.0);
        assert_eq!(facility.total_revenue(), 3500.0);
    }

    #[test]
    fn test_release_unknown_ticket() {
        let mut facility = facility();
        let err = facility.release(TicketId::new(), None).unwrap_err();
        assert!(matches!(err, FacilityError::EngagementNotFound(_)));
    }

    #[test]
    fn test_cancel_ticket_frees_spot_without_fee() {
        let mut facility = facility();
        let ticket_id = facility.admit(car("34ABC123"), TicketKind::Hourly).unwrap();
        assert_eq!(facility.pool().occupied_count(), 1);

        facility.cancel_ticket(ticket_id).unwrap();
        assert_eq!(facility.pool().occupied_count(), 0);
        assert_eq!(facility.active_ticket_count(), 0);
        assert_eq!(facility.ledger().parking_revenue(), 0.0);
    }
}
