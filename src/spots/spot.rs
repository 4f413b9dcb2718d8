//! Individual parking spots

use crate::types::{SpotId, SpotKind, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single parking spot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParkingSpot {
    /// Unique identifier
    pub id: SpotId,
    /// Human-readable label, e.g. `F0-S12`
    pub label: String,
    /// Floor the spot is on
    pub floor: usize,
    /// Spot kind driving price multiplier and capability checks
    pub kind: SpotKind,
    /// Occupancy flag, mutated only through the pool
    pub occupied: bool,
}

impl ParkingSpot {
    /// Create a free spot
    pub fn new(floor: usize, index: usize, kind: SpotKind) -> Self {
        Self {
            id: SpotId::new(),
            label: format!("F{}-S{}", floor, index),
            floor,
            kind,
            occupied: false,
        }
    }

    /// Whether this spot can serve the given vehicle category
    pub fn accepts(&self, category: VehicleCategory) -> bool {
        self.kind.accepts(category)
    }

    /// Price multiplier applied to time-based fees billed on this spot
    pub fn price_multiplier(&self) -> f64 {
        self.kind.price_multiplier()
    }
}

impl fmt::Display for ParkingSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (Floor {}) - {}",
            self.kind,
            self.label,
            self.floor,
            if self.occupied { "OCCUPIED" } else { "AVAILABLE" }
        )
    }
}
