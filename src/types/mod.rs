//! Core types and identifiers for the parking facility simulator
//!
//! This module contains the fundamental building blocks shared by every
//! other module:
//!
//! - **Identifiers**: UUID-based unique identifiers for all tracked entities
//! - **Enums**: closed category tags (vehicle, spot, ticket, wash package,
//!   charger, incident, lifecycle status) with their multiplier and
//!   capability tables
//! - **Configuration**: facility configuration with validation and CLI
//!   support
//!
//! # Usage Example
//!
//! ```rust
//! use parklot::types::*;
//!
//! let ticket_id = TicketId::new();
//! let spot_id = SpotId::new();
//!
//! let category = VehicleCategory::Van;
//! assert_eq!(category.size_multiplier(), 1.5);
//!
//! let config = FacilityConfig { floors: 2, ..Default::default() };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
