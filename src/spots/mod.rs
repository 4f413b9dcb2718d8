//! Parking spot pool and allocation
//!
//! Spots are typed slots with an occupancy flag and a capability predicate.
//! The pool owns them all, and allocation is first-fit over a fixed priority
//! order. Spots exist for the lifetime of the facility; only their occupancy
//! changes.

pub mod pool;
pub mod spot;

pub use pool::SpotPool;
pub use spot::ParkingSpot;
