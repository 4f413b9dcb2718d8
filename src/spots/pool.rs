//! Spot pool: layout, lookup, and the reserve/release protocol
//!
//! The pool owns every spot in the facility and is the only place occupancy
//! is mutated. `find_available` and `reserve` are composed by
//! [`SpotPool::allocate`], which runs the whole check-then-set inside a
//! single `&mut self` call so no other pool operation can interleave.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::spots::spot::ParkingSpot;
use crate::types::{SpotId, SpotKind, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Per-floor layout, repeated for every block of 20 spots: the first two are
/// disabled spots, then three compact, three VIP, two charging, and the rest
/// regular. This is also the fixed search priority for allocation.
fn kind_for_index(index: usize) -> SpotKind {
    match index % 20 {
        0 | 1 => SpotKind::Disabled,
        2..=4 => SpotKind::Compact,
        5..=7 => SpotKind::Vip,
        8 | 9 => SpotKind::EvCharging,
        _ => SpotKind::Regular,
    }
}

/// The facility's pool of parking spots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotPool {
    /// All spots, floor-major in layout order
    spots: Vec<ParkingSpot>,
    /// Lookup map from spot ID to index
    index: HashMap<SpotId, usize>,
}

impl SpotPool {
    /// Build the pool for the given number of floors and spots per floor
    pub fn build(floors: usize, spots_per_floor: usize) -> Self {
        let mut spots = Vec::with_capacity(floors * spots_per_floor);
        for floor in 0..floors {
            for i in 0..spots_per_floor {
                spots.push(ParkingSpot::new(floor, i, kind_for_index(i)));
            }
        }

        let index = spots.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Self { spots, index }
    }

    /// Get a spot by ID
    pub fn get(&self, spot_id: SpotId) -> Option<&ParkingSpot> {
        self.index.get(&spot_id).and_then(|&i| self.spots.get(i))
    }

    /// First free spot whose capability predicate accepts the category.
    ///
    /// Spots are scanned floor-ascending in layout order, which yields the
    /// fixed priority disabled, compact, VIP, charging, regular per floor.
    pub fn find_available(&self, category: VehicleCategory) -> Option<SpotId> {
        self.spots.iter().find(|s| !s.occupied && s.accepts(category)).map(|s| s.id)
    }

    /// Find and reserve a spot for the category in one call.
    ///
    /// The check-then-set runs without any intervening pool operation, so a
    /// spot returned here is exclusively held by the caller.
    pub fn allocate(&mut self, category: VehicleCategory) -> Option<SpotId> {
        let spot_id = self.find_available(category)?;
        // find_available only returns live free spots, so this cannot fail
        self.reserve(spot_id).ok()?;
        Some(spot_id)
    }

    /// Mark a spot occupied. Fails if the spot is unknown or already taken.
    pub fn reserve(&mut self, spot_id: SpotId) -> FacilityResult<()> {
        let idx = *self
            .index
            .get(&spot_id)
            .ok_or_else(|| FacilityError::resource_unavailable(format!("spot {}", spot_id)))?;
        let spot = &mut self.spots[idx];
        if spot.occupied {
            return Err(FacilityError::resource_unavailable(format!(
                "spot {} (already occupied)",
                spot.label
            )));
        }
        spot.occupied = true;
        debug!(spot = %spot.label, kind = %spot.kind, "spot reserved");
        Ok(())
    }

    /// Mark a spot free again.
    ///
    /// Idempotent: releasing an already-free spot is a no-op. Callers are
    /// expected to release each reservation exactly once; a release of a
    /// never-reserved spot trips the debug assertion.
    pub fn release(&mut self, spot_id: SpotId) {
        let Some(&idx) = self.index.get(&spot_id) else {
            debug_assert!(false, "release of unknown spot {}", spot_id);
            debug!(%spot_id, "release of unknown spot ignored");
            return;
        };
        let spot = &mut self.spots[idx];
        if !spot.occupied {
            debug!(spot = %spot.label, "double release ignored");
            return;
        }
        spot.occupied = false;
        debug!(spot = %spot.label, "spot released");
    }

    /// Total number of spots
    pub fn total(&self) -> usize {
        self.spots.len()
    }

    /// Number of occupied spots
    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|s| s.occupied).count()
    }

    /// Number of free spots
    pub fn available_count(&self) -> usize {
        self.total() - self.occupied_count()
    }

    /// Occupancy as a percentage of total capacity
    pub fn occupancy_rate(&self) -> f64 {
        if self.spots.is_empty() {
            return 0.0;
        }
        self.occupied_count() as f64 * 100.0 / self.total() as f64
    }

    /// Count of spots per kind, `(total, occupied)`
    pub fn count_by_kind(&self) -> HashMap<SpotKind, (usize, usize)> {
        let mut counts: HashMap<SpotKind, (usize, usize)> = HashMap::new();
        for spot in &self.spots {
            let entry = counts.entry(spot.kind).or_default();
            entry.0 += 1;
            if spot.occupied {
                entry.1 += 1;
            }
        }
        counts
    }

    /// IDs of all charging-capable spots, in layout order
    pub fn ev_spot_ids(&self) -> Vec<SpotId> {
        self.spots
            .iter()
            .filter(|s| s.kind == SpotKind::EvCharging)
            .map(|s| s.id)
            .collect()
    }

    /// All spots in layout order
    pub fn all(&self) -> &[ParkingSpot] {
        &self.spots
    }
}
