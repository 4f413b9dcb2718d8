//! Facility orchestration and control
//!
//! The orchestrator composes every other module into the public workflows:
//! admission, exit, wash, charging, reservations, and incidents. The
//! supporting pieces live alongside it:
//!
//! - **ParkingFacility**: the orchestrator itself
//! - **Ledger**: monotone revenue aggregate and transaction history
//! - **Clock**: pluggable time source for deterministic tests
//! - **FacilityError**: the closed error taxonomy of every workflow
//! - **LoggingConfig**: tracing-subscriber setup
//! - **reporting**: read-only report builders
//!
//! # Usage Example
//!
//! ```rust
//! use parklot::facility::ParkingFacility;
//! use parklot::notifications::SimulatedGateway;
//! use parklot::types::{FacilityConfig, TicketKind, VehicleCategory};
//! use parklot::vehicle::Vehicle;
//!
//! let config = FacilityConfig { seed: Some(42), ..Default::default() };
//! let mut facility =
//!     ParkingFacility::new(config, Box::new(SimulatedGateway::new(Some(42)))).unwrap();
//!
//! let car = Vehicle::new("34ABC123", VehicleCategory::Car, "Toyota", "Corolla", "Blue")
//!     .unwrap();
//! let ticket_id = facility.admit(car, TicketKind::Hourly).unwrap();
//! assert_eq!(facility.active_ticket_count(), 1);
//! ```

pub mod clock;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod orchestrator;
pub mod reporting;

// Re-export the main types for convenience
pub use clock::Clock;
pub use error::{FacilityError, FacilityResult};
pub use ledger::{Ledger, TransactionKind, TransactionRecord};
pub use logging::LoggingConfig;
pub use orchestrator::{NotificationStats, ParkingFacility};
