//! Time source
//!
//! The orchestrator never calls `Utc::now()` directly; it asks its [`Clock`].
//! Production uses the system clock, tests pin a fixed instant and advance it
//! explicitly, which is what makes duration-dependent fees deterministic.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pluggable time source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Clock {
    /// Wall clock
    System,
    /// Pinned instant, advanced only by [`Clock::advance_by`]
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// A clock pinned to the given instant
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Clock::Fixed(at)
    }

    /// Current time according to this clock
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Advance a fixed clock. On the system clock this is a logged no-op;
    /// wall time cannot be steered.
    pub fn advance_by(&mut self, duration: Duration) {
        match self {
            Clock::System => {
                debug!("advance_by ignored on the system clock");
            }
            Clock::Fixed(at) => {
                *at += duration;
                debug!(now = %at, "fixed clock advanced");
            }
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}
