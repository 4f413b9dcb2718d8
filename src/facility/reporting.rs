//! Read-only reporting over the facility
//!
//! Builds report strings from the ledger, pool, and service state. Nothing
//! in here mutates; printing is the caller's business.

use crate::facility::orchestrator::ParkingFacility;
use crate::pricing::round_display;
use crate::types::VehicleCategory;
use std::collections::HashMap;
use std::fmt::Write;

/// Daily summary: revenue, occupancy, and transaction counts
pub fn daily_report(facility: &ParkingFacility) -> String {
    let mut out = String::new();
    let ledger = facility.ledger();
    let pool = facility.pool();

    writeln!(out, "========== DAILY REPORT ==========").unwrap();
    writeln!(out, "Facility: {}", facility.config().name).unwrap();
    writeln!(out, "Total Revenue: {:.2}", round_display(ledger.total_revenue())).unwrap();
    writeln!(out, "  Parking: {:.2}", round_display(ledger.parking_revenue())).unwrap();
    writeln!(out, "  Subscriptions: {:.2}", round_display(ledger.subscription_revenue())).unwrap();
    writeln!(out, "  Wash: {:.2}", round_display(ledger.wash_revenue())).unwrap();
    writeln!(out, "  Charging: {:.2}", round_display(ledger.charging_revenue())).unwrap();
    writeln!(out, "Occupancy Rate: {:.2}%", pool.occupancy_rate()).unwrap();
    writeln!(out, "Available Spots: {}/{}", pool.available_count(), pool.total()).unwrap();
    writeln!(out, "Transactions:").unwrap();
    writeln!(out, "- Entries: {}", ledger.entry_count()).unwrap();
    writeln!(out, "- Exits: {}", ledger.exit_count()).unwrap();
    writeln!(out, "==================================").unwrap();
    out
}

/// Distribution of vehicle categories among active tickets
pub fn vehicle_distribution_report(facility: &ParkingFacility) -> String {
    let mut counts: HashMap<VehicleCategory, usize> = HashMap::new();
    for ticket in facility.active_tickets() {
        *counts.entry(ticket.category).or_default() += 1;
    }

    let mut out = String::new();
    writeln!(out, "===== VEHICLE TYPE DISTRIBUTION =====").unwrap();
    if counts.is_empty() {
        writeln!(out, "No vehicles currently parked.").unwrap();
    } else {
        let mut entries: Vec<_> = counts.into_iter().collect();
        entries.sort_by_key(|&(category, _)| format!("{}", category));
        for (category, count) in entries {
            writeln!(out, "{}: {}", category, count).unwrap();
        }
    }
    writeln!(out, "=====================================").unwrap();
    out
}

/// Wash service report: counts, revenue, workers, most popular package
pub fn wash_report(facility: &ParkingFacility) -> String {
    let wash = facility.wash();
    let mut out = String::new();

    writeln!(out, "======= CAR WASH SERVICE REPORT =======").unwrap();
    writeln!(out, "Total Orders: {}", wash.completed_count() + wash.pending_count()).unwrap();
    writeln!(out, "Completed: {}", wash.completed_count()).unwrap();
    writeln!(out, "Pending: {}", wash.pending_count()).unwrap();
    writeln!(out, "Revenue: {:.2}", round_display(facility.ledger().wash_revenue())).unwrap();

    if !wash.workers().is_empty() {
        writeln!(out, "Worker Performance:").unwrap();
        for worker in wash.workers() {
            writeln!(out, "- {}: {} jobs", worker.name, worker.completed_jobs).unwrap();
        }
    }

    if let Some((package, count)) = wash.most_popular_package() {
        writeln!(out, "Most Popular Package:").unwrap();
        writeln!(out, "- {} ({} orders)", package, count).unwrap();
    }

    writeln!(out, "=======================================").unwrap();
    out
}

/// Charging service report: sessions, energy, revenue, station status
pub fn charging_report(facility: &ParkingFacility) -> String {
    let charging = facility.charging();
    let mut out = String::new();

    writeln!(out, "====== CHARGING SERVICE REPORT ======").unwrap();
    writeln!(out, "Total Sessions: {}", charging.session_history().len()).unwrap();
    writeln!(out, "Total Energy Delivered: {:.2} kWh", charging.total_energy_kwh()).unwrap();
    writeln!(out, "Revenue: {:.2}", round_display(facility.ledger().charging_revenue())).unwrap();

    let sessions = charging.session_history();
    if !sessions.is_empty() {
        let avg_energy = charging.total_energy_kwh() / sessions.len() as f64;
        writeln!(out, "Average Energy per Session: {:.2} kWh", avg_energy).unwrap();
    }

    writeln!(out, "Reservations:").unwrap();
    writeln!(out, "Total: {}", charging.reservations().len()).unwrap();
    writeln!(out, "Active: {}", charging.active_reservation_count()).unwrap();

    writeln!(out, "Stations:").unwrap();
    writeln!(
        out,
        "Operational: {}/{}",
        charging.operational_count(),
        charging.stations().len()
    )
    .unwrap();
    writeln!(out, "Available: {}/{}", charging.available_count(), charging.stations().len())
        .unwrap();
    writeln!(out, "=====================================").unwrap();
    out
}

/// Security report: tracked vehicles, recognition stats, incidents
pub fn security_report(facility: &ParkingFacility) -> String {
    let security = facility.security();
    let mut out = String::new();

    writeln!(out, "======== SECURITY SYSTEM REPORT ========").unwrap();
    writeln!(out, "Vehicles Tracked: {}", security.tracked_vehicle_count()).unwrap();
    let (recognized, failed) = security.recognition_stats();
    writeln!(out, "Plate Recognitions: {} ok, {} failed", recognized, failed).unwrap();

    writeln!(out, "Incident Reports:").unwrap();
    writeln!(out, "Total: {}", security.incidents().len()).unwrap();
    writeln!(out, "Open: {}", security.open_incidents().len()).unwrap();

    let by_kind = security.counts_by_kind();
    if !by_kind.is_empty() {
        writeln!(out, "By Type:").unwrap();
        let mut entries: Vec<_> = by_kind.into_iter().collect();
        entries.sort_by_key(|&(kind, _)| format!("{}", kind));
        for (kind, count) in entries {
            writeln!(out, "- {}: {}", kind, count).unwrap();
        }
    }

    let by_severity = security.counts_by_severity();
    if !by_severity.is_empty() {
        writeln!(out, "By Severity:").unwrap();
        let mut entries: Vec<_> = by_severity.into_iter().collect();
        entries.sort_by_key(|&(severity, _)| severity);
        for (severity, count) in entries {
            writeln!(out, "- {}: {}", severity, count).unwrap();
        }
    }

    writeln!(out, "========================================").unwrap();
    out
}

/// Notification dispatch report
pub fn notification_report(facility: &ParkingFacility) -> String {
    let stats = facility.notification_stats();
    let mut out = String::new();
    writeln!(out, "=== NOTIFICATION STATISTICS ===").unwrap();
    writeln!(out, "Attempted: {}", stats.attempted).unwrap();
    writeln!(out, "Delivered: {}", stats.delivered).unwrap();
    writeln!(out, "Lost: {}", stats.attempted - stats.delivered).unwrap();
    writeln!(out, "===============================").unwrap();
    out
}

/// Every report concatenated, the full operational picture
pub fn comprehensive_report(facility: &ParkingFacility) -> String {
    let mut out = String::new();
    writeln!(out, "====== COMPREHENSIVE FACILITY REPORT ======").unwrap();
    out.push_str(&daily_report(facility));
    out.push_str(&vehicle_distribution_report(facility));
    out.push_str(&wash_report(facility));
    out.push_str(&charging_report(facility));
    out.push_str(&security_report(facility));
    out.push_str(&notification_report(facility));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::clock::Clock;
    use crate::notifications::SimulatedGateway;
    use crate::types::{FacilityConfig, TicketKind};
    use crate::vehicle::Vehicle;

    fn facility() -> ParkingFacility {
        let config = FacilityConfig { seed: Some(1), ..Default::default() };
        ParkingFacility::new(config, Box::new(SimulatedGateway::new(Some(1))))
            .unwrap()
            .with_clock(Clock::fixed("2026-03-01T10:00:00Z".parse().unwrap()))
    }

    #[test]
    fn test_daily_report_reflects_state() {
        let mut facility = facility();
        let vehicle =
            Vehicle::new("34ABC123", VehicleCategory::Car, "Toyota", "Corolla", "Blue").unwrap();
        facility.admit(vehicle, TicketKind::Hourly).unwrap();

        let report = daily_report(&facility);
        assert!(report.contains("Facility: Central Parking"));
        assert!(report.contains("- Entries: 1"));
        assert!(report.contains("- Exits: 0"));
        assert!(report.contains("Available Spots: 59/60"));
    }

    #[test]
    fn test_vehicle_distribution() {
        let mut facility = facility();
        for (plate, category) in [
            ("A1", VehicleCategory::Car),
            ("A2", VehicleCategory::Car),
            ("B1", VehicleCategory::Van),
        ] {
            let vehicle = Vehicle::new(plate, category, "Make", "Model", "Gray").unwrap();
            facility.admit(vehicle, TicketKind::Hourly).unwrap();
        }

        let report = vehicle_distribution_report(&facility);
        assert!(report.contains("Car: 2"));
        assert!(report.contains("Van: 1"));
    }

    #[test]
    fn test_empty_distribution() {
        let facility = facility();
        let report = vehicle_distribution_report(&facility);
        assert!(report.contains("No vehicles currently parked."));
    }

    #[test]
    fn test_comprehensive_report_contains_sections() {
        let facility = facility();
        let report = comprehensive_report(&facility);
        assert!(report.contains("DAILY REPORT"));
        assert!(report.contains("CAR WASH SERVICE REPORT"));
        assert!(report.contains("CHARGING SERVICE REPORT"));
        assert!(report.contains("SECURITY SYSTEM REPORT"));
        assert!(report.contains("NOTIFICATION STATISTICS"));
    }
}
