//! Parking Facility Simulator
//!
//! An in-memory simulator of a multi-service parking facility: vehicle
//! admission and exit with tiered pricing, a FIFO car wash queue, EV
//! charging sessions, and a security incident log, all coordinated by a
//! single orchestrator.
//!
//! # Overview
//!
//! The core of the system is resource allocation and session lifecycle:
//! scarce typed resources (parking spots, wash workers, charging stations)
//! are matched to incoming demand first-fit by category, fees are computed
//! from time or energy usage by a pure pricing engine, and every engagement
//! moves through the same state machine (pending, active, then completed or
//! cancelled) while the ledger keeps revenue and occupancy consistent.
//!
//! All behavior is synchronous and run-to-completion; "external" outcomes
//! (payments, notification delivery, plate recognition) are probabilistic
//! draws from a seedable randomness source, so a seeded facility is fully
//! deterministic.
//!
//! # Quick Start
//!
//! ```rust
//! use parklot::facility::ParkingFacility;
//! use parklot::notifications::SimulatedGateway;
//! use parklot::payments::PaymentMethod;
//! use parklot::types::{FacilityConfig, TicketKind, VehicleCategory};
//! use parklot::vehicle::Vehicle;
//!
//! let config = FacilityConfig { seed: Some(42), ..Default::default() };
//! let gateway = Box::new(SimulatedGateway::new(Some(42)));
//! let mut facility = ParkingFacility::new(config, gateway)?;
//!
//! let car = Vehicle::new("34ABC123", VehicleCategory::Car, "Toyota", "Corolla", "Blue")?;
//! let ticket_id = facility.admit(car, TicketKind::Hourly)?;
//!
//! let fee = facility.release(ticket_id, Some(PaymentMethod::Cash { received: 500.0 }))?;
//! assert!(fee > 0.0);
//! # Ok::<(), parklot::facility::FacilityError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`]: identifiers, category enums, configuration
//! - [`vehicle`]: the consumer record
//! - [`spots`]: the parking spot pool and allocation
//! - [`pricing`]: pure fee functions and multiplier tables
//! - [`tickets`]: ticket lifecycle
//! - [`wash`]: FIFO car wash queue
//! - [`charging`]: EV charging stations, sessions, reservations
//! - [`security`]: access log and incident reports
//! - [`payments`]: payment methods and processing
//! - [`notifications`]: the injected delivery collaborator
//! - [`facility`]: the orchestrator, ledger, errors, clock, reporting
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod charging;
pub mod facility;
pub mod notifications;
pub mod payments;
pub mod pricing;
pub mod security;
pub mod spots;
pub mod tickets;
pub mod types;
pub mod vehicle;
pub mod wash;

// Re-export the most commonly used types at the crate root

// Core types and identifiers
pub use types::{
    ChargerType, EngagementStatus, FacilityConfig, IncidentId, IncidentKind, IncidentSeverity,
    IncidentStatus, NotificationChannel, OrderId, ReservationId, SessionId, SpotId, SpotKind,
    StationId, TicketId, TicketKind, VehicleCategory, WashPackageKind,
};

// Domain entities
pub use charging::{ChargingSession, ChargingStation, ChargingStationManager};
pub use payments::{Payment, PaymentMethod};
pub use security::{IncidentReport, SecurityLog};
pub use spots::{ParkingSpot, SpotPool};
pub use tickets::Ticket;
pub use vehicle::Vehicle;
pub use wash::{CarWashService, ProcessOutcome, WashOrder, WashWorker};

// Collaborators and orchestration
pub use facility::{
    Clock, FacilityError, FacilityResult, Ledger, LoggingConfig, ParkingFacility,
};
pub use notifications::{NotificationEvent, NotificationGateway, SimulatedGateway};
