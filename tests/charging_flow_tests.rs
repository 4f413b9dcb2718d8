//! Integration tests for the EV charging workflows
//!
//! Covers station allocation, the energy and cost math, the empty-pool error
//! path, the admission auto-charge side effect, and reservations.

use parklot::facility::{Clock, ParkingFacility};
use parklot::notifications::SimulatedGateway;
use parklot::types::{ChargerType, FacilityConfig, SpotKind, TicketKind, VehicleCategory};
use parklot::vehicle::Vehicle;
use parklot::FacilityError;

fn start() -> chrono::DateTime<chrono::Utc> {
    "2026-03-01T08:00:00Z".parse().unwrap()
}

fn facility_with(config: FacilityConfig) -> ParkingFacility {
    ParkingFacility::new(config, Box::new(SimulatedGateway::new(Some(42))))
        .unwrap()
        .with_clock(Clock::fixed(start()))
}

fn facility() -> ParkingFacility {
    facility_with(FacilityConfig { seed: Some(42), ..Default::default() })
}

fn ev(plate: &str, capacity: u32) -> Vehicle {
    Vehicle::electric(plate, "Tesla", "Model 3", "Red", capacity).unwrap()
}

/// A full session: station allocated, energy and cost finalized once,
/// revenue in the ledger, needs-charging flag cleared
#[test]
fn test_charging_session_happy_path() {
    let mut facility = facility();
    let vehicle = ev("34EV0042", 75).with_needs_charging();
    let ticket_id = facility.admit(vehicle, TicketKind::Hourly).unwrap();

    // The EV landed on a non-charging spot (disabled spots accept EVs and
    // come first), so admission did not auto-charge
    assert!(facility.charging().session_history().is_empty());

    facility.start_charging(ticket_id, Some(100)).unwrap();

    let session = &facility.charging().session_history()[0];
    // 75 kWh from 30% to 100% is 52.5 kWh on the first station (CHAdeMO, 7.0)
    assert!((session.energy_kwh - 52.5).abs() < 1e-9);
    assert!((session.cost - 367.5).abs() < 1e-9);
    assert!((facility.ledger().charging_revenue() - 367.5).abs() < 1e-9);
    assert!((facility.charging().total_energy_kwh() - 52.5).abs() < 1e-9);

    // The station returned to the pool and the vehicle no longer wants a charge
    assert_eq!(facility.charging().available_count(), facility.charging().stations().len());
    assert!(!facility.vehicle("34EV0042").unwrap().needs_charging);
}

/// With zero charging stations the request fails cleanly: no session, no
/// ledger movement
#[test]
fn test_charging_with_no_stations() {
    // 8 spots per floor puts no EV spots in the layout, hence no stations
    let config =
        FacilityConfig { floors: 1, spots_per_floor: 8, seed: Some(42), ..Default::default() };
    let mut facility = facility_with(config);
    assert!(facility.charging().stations().is_empty());

    let ticket_id = facility.admit(ev("34EV0042", 75), TicketKind::Hourly).unwrap();
    let revenue_before = facility.ledger().total_revenue();

    let err = facility.start_charging(ticket_id, None).unwrap_err();
    assert!(matches!(err, FacilityError::ResourceUnavailable { .. }));

    assert!(facility.charging().session_history().is_empty());
    assert_eq!(facility.ledger().total_revenue(), revenue_before);
    assert_eq!(facility.ledger().charging_revenue(), 0.0);
}

/// Charging a non-electric vehicle is a consumer error
#[test]
fn test_charging_non_electric_vehicle() {
    let mut facility = facility();
    let car = Vehicle::new("34ABC123", VehicleCategory::Car, "Toyota", "Corolla", "Blue")
        .unwrap();
    let ticket_id = facility.admit(car, TicketKind::Hourly).unwrap();

    let err = facility.start_charging(ticket_id, None).unwrap_err();
    assert!(matches!(err, FacilityError::InvalidConsumer(_)));
    assert!(facility.charging().session_history().is_empty());
}

/// An EV that lands on a charging spot and wants a charge is charged as an
/// admission side effect
#[test]
fn test_auto_charge_on_charging_spot() {
    // One floor of 10 spots: 2 disabled, 3 compact, 3 VIP, 2 EV charging
    let config =
        FacilityConfig { floors: 1, spots_per_floor: 10, seed: Some(42), ..Default::default() };
    let mut facility = facility_with(config);

    // Fill every spot an EV would otherwise take first
    for i in 0..8 {
        let car = Vehicle::new(
            format!("FILL-{}", i),
            VehicleCategory::Car,
            "Fiat",
            "Egea",
            "White",
        )
        .unwrap();
        facility.admit(car, TicketKind::Hourly).unwrap();
    }

    let ticket_id =
        facility.admit(ev("34EV0042", 60).with_needs_charging(), TicketKind::Hourly).unwrap();

    let ticket = facility.ticket(ticket_id).unwrap();
    let spot = facility.pool().get(ticket.spot.unwrap()).unwrap();
    assert_eq!(spot.kind, SpotKind::EvCharging);

    // Admission triggered the charge to the configured 100% target
    assert_eq!(facility.charging().session_history().len(), 1);
    let session = &facility.charging().session_history()[0];
    assert_eq!(session.plate, "34EV0042");
    assert_eq!(session.target_percent, 100);
    assert!(facility.ledger().charging_revenue() > 0.0);
    assert!(!facility.vehicle("34EV0042").unwrap().needs_charging);
}

/// Charging an unknown ticket fails the lookup
#[test]
fn test_charging_unknown_ticket() {
    let mut facility = facility();
    let err = facility.start_charging(parklot::TicketId::new(), None).unwrap_err();
    assert!(matches!(err, FacilityError::EngagementNotFound(_)));
}

/// Reservations confirm against an available station and can be cancelled
#[test]
fn test_charging_reservation_flow() {
    let mut facility = facility();
    let scheduled = start() + chrono::Duration::hours(6);

    let reservation_id = facility
        .reserve_charging("34EV0042", scheduled, 45, Some(ChargerType::Ccs))
        .unwrap();

    assert_eq!(facility.charging().active_reservation_count(), 1);
    let reservation = &facility.charging().reservations()[0];
    assert_eq!(reservation.id, reservation_id);
    assert_eq!(reservation.scheduled_at, scheduled);

    // The preferred CCS profile was honored
    let station = facility
        .charging()
        .stations()
        .iter()
        .find(|s| s.id == reservation.station)
        .unwrap();
    assert_eq!(station.charger, ChargerType::Ccs);
}

/// With no stations, reservations fail like sessions do
#[test]
fn test_reservation_with_no_stations() {
    let config =
        FacilityConfig { floors: 1, spots_per_floor: 8, seed: Some(42), ..Default::default() };
    let mut facility = facility_with(config);

    let err = facility
        .reserve_charging("34EV0042", start() + chrono::Duration::hours(1), 30, None)
        .unwrap_err();
    assert!(matches!(err, FacilityError::ResourceUnavailable { .. }));
}
