//! EV charging service
//!
//! One charging station per EV-capable spot, built in a fixed rotation of
//! charger profiles. Sessions run the shared engagement lifecycle: begun
//! against an available station, completed with energy and cost finalized
//! exactly once, or interrupted without cost. The default workflow completes
//! instantly; `begin_session`/`complete_session` are exposed separately so
//! an interrupted session is still a reachable state.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::pricing;
use crate::types::{
    ChargerType, EngagementStatus, ReservationId, ReservationStatus, SessionId, SpotId, StationId,
};
use crate::vehicle::Vehicle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Battery level every session starts from, in percent.
///
/// The facility has no telemetry link to the vehicle, so the reference
/// behavior assumes a fixed arrival level.
pub const INITIAL_BATTERY_PERCENT: u8 = 30;

/// A charging station bound to one EV spot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingStation {
    /// Unique identifier
    pub id: StationId,
    /// Spot the station is installed at
    pub spot: SpotId,
    /// Hardware profile (power and energy price)
    pub charger: ChargerType,
    /// Whether the station is in service
    pub operational: bool,
    /// Session currently drawing power, if any
    pub current_session: Option<SessionId>,
}

impl ChargingStation {
    /// Whether the station can start a new session
    pub fn is_available(&self) -> bool {
        self.operational && self.current_session.is_none()
    }
}

impl fmt::Display for ChargingStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Station {} [{}, {}kW] - {}",
            self.id,
            self.charger,
            self.charger.power_kw(),
            if self.is_available() { "AVAILABLE" } else { "BUSY" }
        )
    }
}

/// A charging session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingSession {
    /// Unique identifier
    pub id: SessionId,
    /// Station serving the session
    pub station: StationId,
    /// Plate of the vehicle being charged
    pub plate: String,
    /// Battery capacity of the vehicle in kWh
    pub battery_capacity_kwh: u32,
    /// Battery level at session start, percent
    pub initial_percent: u8,
    /// Requested battery level, percent
    pub target_percent: u8,
    /// Energy delivered in kWh, finalized on completion
    pub energy_kwh: f64,
    /// Cost of the delivered energy, finalized on completion
    pub cost: f64,
    /// Estimated duration at the station's power rating
    pub estimated_minutes: i64,
    /// When charging started
    pub started_at: Option<DateTime<Utc>>,
    /// When the session reached a terminal state
    pub ended_at: Option<DateTime<Utc>>,
    /// Lifecycle state
    pub status: EngagementStatus,
    /// Why the session was interrupted, if it was
    pub interrupt_reason: Option<String>,
}

/// A charging reservation for a future time slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingReservation {
    /// Unique identifier
    pub id: ReservationId,
    /// Plate of the reserving vehicle
    pub plate: String,
    /// Station held for the reservation
    pub station: StationId,
    /// When the reservation was made
    pub reserved_at: DateTime<Utc>,
    /// Requested time slot start
    pub scheduled_at: DateTime<Utc>,
    /// Requested slot length in minutes
    pub duration_minutes: u32,
    /// Reservation state
    pub status: ReservationStatus,
}

/// Manages all charging stations, sessions, and reservations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingStationManager {
    stations: Vec<ChargingStation>,
    active: HashMap<SessionId, ChargingSession>,
    history: Vec<ChargingSession>,
    reservations: Vec<ChargingReservation>,
    total_energy_kwh: f64,
}

impl ChargingStationManager {
    /// Build one station per EV spot, rotating through the charger profiles
    pub fn from_ev_spots(ev_spots: &[SpotId]) -> Self {
        let rotation = ChargerType::rotation();
        let stations = ev_spots
            .iter()
            .enumerate()
            .map(|(i, &spot)| ChargingStation {
                id: StationId::new(),
                spot,
                charger: rotation[i % rotation.len()],
                operational: true,
                current_session: None,
            })
            .collect::<Vec<_>>();
        info!(stations = stations.len(), "charging stations initialized");
        Self {
            stations,
            active: HashMap::new(),
            history: Vec::new(),
            reservations: Vec::new(),
            total_energy_kwh: 0.0,
        }
    }

    /// First available station, preferring the given charger type.
    ///
    /// With a preference set, stations of that type are tried first, then
    /// any available station.
    pub fn find_available(&self, preferred: Option<ChargerType>) -> Option<StationId> {
        if let Some(charger) = preferred {
            if let Some(station) =
                self.stations.iter().find(|s| s.is_available() && s.charger == charger)
            {
                return Some(station.id);
            }
        }
        self.stations.iter().find(|s| s.is_available()).map(|s| s.id)
    }

    /// Start a session on an available station and leave it running.
    ///
    /// Returns [`FacilityError::ResourceUnavailable`] when every station is
    /// busy or out of service, and [`FacilityError::InvalidConsumer`] for a
    /// vehicle that cannot charge. Nothing is mutated on failure.
    pub fn begin_session(
        &mut self,
        vehicle: &Vehicle,
        target_percent: u8,
        now: DateTime<Utc>,
    ) -> FacilityResult<SessionId> {
        let Some(capacity) = vehicle.battery_capacity_kwh.filter(|_| vehicle.is_electric()) else {
            return Err(FacilityError::invalid_consumer(format!(
                "vehicle {} cannot use charging stations",
                vehicle.plate
            )));
        };

        let station_id = self
            .find_available(None)
            .ok_or_else(|| FacilityError::resource_unavailable("charging stations"))?;
        let station =
            self.stations.iter_mut().find(|s| s.id == station_id).expect("station just found");

        let target = target_percent.min(100);
        let energy =
            pricing::charging_energy_kwh(capacity, INITIAL_BATTERY_PERCENT, target);
        let session = ChargingSession {
            id: SessionId::new(),
            station: station.id,
            plate: vehicle.plate.clone(),
            battery_capacity_kwh: capacity,
            initial_percent: INITIAL_BATTERY_PERCENT,
            target_percent: target,
            energy_kwh: 0.0,
            cost: 0.0,
            estimated_minutes: pricing::estimated_charge_minutes(energy, station.charger),
            started_at: Some(now),
            ended_at: None,
            status: EngagementStatus::Active,
            interrupt_reason: None,
        };

        station.current_session = Some(session.id);
        info!(
            session = %session.id,
            station = %station.id,
            plate = %vehicle.plate,
            from = INITIAL_BATTERY_PERCENT,
            to = target,
            "charging started"
        );
        let id = session.id;
        self.active.insert(id, session);
        Ok(id)
    }

    /// Finish an active session: energy and cost are computed exactly here,
    /// the station is freed, and the session moves to the history.
    pub fn complete_session(
        &mut self,
        session_id: SessionId,
        now: DateTime<Utc>,
    ) -> FacilityResult<ChargingSession> {
        let mut session = self
            .active
            .remove(&session_id)
            .ok_or_else(|| FacilityError::engagement_not_found(session_id))?;

        let station = self
            .stations
            .iter_mut()
            .find(|s| s.id == session.station)
            .expect("active session references a live station");

        session.energy_kwh = pricing::charging_energy_kwh(
            session.battery_capacity_kwh,
            session.initial_percent,
            session.target_percent,
        );
        session.cost = pricing::charging_cost(session.energy_kwh, station.charger);
        session.ended_at = Some(now);
        session.status = EngagementStatus::Completed;
        station.current_session = None;

        self.total_energy_kwh += session.energy_kwh;
        info!(
            session = %session.id,
            energy_kwh = session.energy_kwh,
            cost = session.cost,
            "charging completed"
        );
        self.history.push(session.clone());
        Ok(session)
    }

    /// Run a full session to completion in one call (the default
    /// instant-completion workflow).
    pub fn start_session(
        &mut self,
        vehicle: &Vehicle,
        target_percent: u8,
        now: DateTime<Utc>,
    ) -> FacilityResult<ChargingSession> {
        let id = self.begin_session(vehicle, target_percent, now)?;
        self.complete_session(id, now)
    }

    /// Abort an active session. The station is freed and no cost accrues.
    pub fn interrupt_session(
        &mut self,
        session_id: SessionId,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> FacilityResult<ChargingSession> {
        let mut session = self
            .active
            .remove(&session_id)
            .ok_or_else(|| FacilityError::engagement_not_found(session_id))?;

        let station = self
            .stations
            .iter_mut()
            .find(|s| s.id == session.station)
            .expect("active session references a live station");
        station.current_session = None;

        let reason = reason.into();
        warn!(session = %session.id, %reason, "charging interrupted");
        session.ended_at = Some(now);
        session.status = EngagementStatus::Cancelled;
        session.interrupt_reason = Some(reason);
        self.history.push(session.clone());
        Ok(session)
    }

    /// Reserve a station for a future slot.
    ///
    /// The reservation is confirmed against a currently-available station;
    /// it records intent but does not block allocation.
    pub fn create_reservation(
        &mut self,
        plate: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
        preferred: Option<ChargerType>,
        now: DateTime<Utc>,
    ) -> FacilityResult<ReservationId> {
        let station = self
            .find_available(preferred)
            .ok_or_else(|| FacilityError::resource_unavailable("charging stations"))?;

        let reservation = ChargingReservation {
            id: ReservationId::new(),
            plate: plate.into(),
            station,
            reserved_at: now,
            scheduled_at,
            duration_minutes,
            status: ReservationStatus::Confirmed,
        };
        let id = reservation.id;
        info!(reservation = %id, station = %station, %scheduled_at, "charging reservation confirmed");
        self.reservations.push(reservation);
        Ok(id)
    }

    /// Cancel a reservation that has not been served yet
    pub fn cancel_reservation(&mut self, id: ReservationId) -> FacilityResult<()> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| FacilityError::engagement_not_found(id))?;
        if matches!(
            reservation.status,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        ) {
            return Err(FacilityError::engagement_not_found(id));
        }
        reservation.status = ReservationStatus::Cancelled;
        debug!(reservation = %id, "charging reservation cancelled");
        Ok(())
    }

    /// All stations
    pub fn stations(&self) -> &[ChargingStation] {
        &self.stations
    }

    /// Number of stations currently able to start a session
    pub fn available_count(&self) -> usize {
        self.stations.iter().filter(|s| s.is_available()).count()
    }

    /// Number of stations in service
    pub fn operational_count(&self) -> usize {
        self.stations.iter().filter(|s| s.operational).count()
    }

    /// Take a station in or out of service
    pub fn set_operational(&mut self, station_id: StationId, operational: bool) {
        if let Some(station) = self.stations.iter_mut().find(|s| s.id == station_id) {
            station.operational = operational;
        }
    }

    /// Finished sessions, completed and interrupted, in finish order
    pub fn session_history(&self) -> &[ChargingSession] {
        &self.history
    }

    /// Total energy delivered across all completed sessions, kWh
    pub fn total_energy_kwh(&self) -> f64 {
        self.total_energy_kwh
    }

    /// All reservations in creation order
    pub fn reservations(&self) -> &[ChargingReservation] {
        &self.reservations
    }

    /// Reservations that are confirmed or being served
    pub fn active_reservation_count(&self) -> usize {
        self.reservations
            .iter()
            .filter(|r| {
                matches!(r.status, ReservationStatus::Confirmed | ReservationStatus::Active)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    fn ev(plate: &str, capacity: u32) -> Vehicle {
        Vehicle::electric(plate, "Tesla", "Model 3", "White", capacity).unwrap()
    }

    fn spots(n: usize) -> Vec<SpotId> {
        (0..n).map(|_| SpotId::new()).collect()
    }

    #[test]
    fn test_station_rotation() {
        let manager = ChargingStationManager::from_ev_spots(&spots(4));
        let chargers: Vec<_> = manager.stations().iter().map(|s| s.charger).collect();
        assert_eq!(
            chargers,
            vec![ChargerType::Chademo, ChargerType::Ccs, ChargerType::Type2, ChargerType::Chademo]
        );
    }

    #[test]
    fn test_instant_session_math() {
        let mut manager = ChargingStationManager::from_ev_spots(&spots(1));
        // Single station is CHAdeMO: 100 kW at 7.0 per kWh
        let session = manager.start_session(&ev("34EV001", 80), 100, now()).unwrap();

        // 80 kWh from 30% to 100% is 56 kWh
        assert!((session.energy_kwh - 56.0).abs() < 1e-9);
        assert!((session.cost - 392.0).abs() < 1e-9);
        assert_eq!(session.status, EngagementStatus::Completed);
        assert_eq!(session.estimated_minutes, 34); // 56 kWh / 100 kW = 33.6 min

        // Station freed, totals accrued
        assert_eq!(manager.available_count(), 1);
        assert!((manager.total_energy_kwh() - 56.0).abs() < 1e-9);
        assert_eq!(manager.session_history().len(), 1);
    }

    #[test]
    fn test_no_station_available() {
        let mut manager = ChargingStationManager::from_ev_spots(&[]);
        let err = manager.start_session(&ev("34EV001", 80), 100, now()).unwrap_err();
        assert!(matches!(err, FacilityError::ResourceUnavailable { .. }));
        assert!(manager.session_history().is_empty());
        assert_eq!(manager.total_energy_kwh(), 0.0);
    }

    #[test]
    fn test_non_electric_rejected() {
        let mut manager = ChargingStationManager::from_ev_spots(&spots(1));
        let car = Vehicle::new("34ABC123", crate::types::VehicleCategory::Car, "VW", "Golf", "Red")
            .unwrap();
        let err = manager.start_session(&car, 100, now()).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidConsumer(_)));
    }

    #[test]
    fn test_begin_occupies_station_until_completion() {
        let mut manager = ChargingStationManager::from_ev_spots(&spots(1));
        let id = manager.begin_session(&ev("34EV001", 60), 80, now()).unwrap();

        assert_eq!(manager.available_count(), 0);
        let err = manager.begin_session(&ev("34EV002", 60), 80, now()).unwrap_err();
        assert!(matches!(err, FacilityError::ResourceUnavailable { .. }));

        let session = manager.complete_session(id, now()).unwrap();
        assert_eq!(session.status, EngagementStatus::Completed);
        assert_eq!(manager.available_count(), 1);
    }

    #[test]
    fn test_interrupt_frees_station_without_cost() {
        let mut manager = ChargingStationManager::from_ev_spots(&spots(1));
        let id = manager.begin_session(&ev("34EV001", 60), 100, now()).unwrap();

        let session = manager.interrupt_session(id, "power outage", now()).unwrap();
        assert_eq!(session.status, EngagementStatus::Cancelled);
        assert_eq!(session.interrupt_reason.as_deref(), Some("power outage"));
        assert_eq!(session.cost, 0.0);
        assert_eq!(session.energy_kwh, 0.0);

        assert_eq!(manager.available_count(), 1);
        assert_eq!(manager.total_energy_kwh(), 0.0);

        // The session is gone from the active set
        let err = manager.complete_session(id, now()).unwrap_err();
        assert!(matches!(err, FacilityError::EngagementNotFound(_)));
    }

    #[test]
    fn test_preferred_charger_type() {
        let manager = ChargingStationManager::from_ev_spots(&spots(3));
        // Rotation gives CHAdeMO, CCS, Type2; ask for Type2 explicitly
        let station_id = manager.find_available(Some(ChargerType::Type2)).unwrap();
        let station = manager.stations().iter().find(|s| s.id == station_id).unwrap();
        assert_eq!(station.charger, ChargerType::Type2);

        // An unavailable preference falls back to any available station
        let mut manager = ChargingStationManager::from_ev_spots(&spots(1));
        let only = manager.stations()[0].id;
        assert_eq!(manager.find_available(Some(ChargerType::Ccs)), Some(only));
        manager.set_operational(only, false);
        assert_eq!(manager.find_available(None), None);
    }

    #[test]
    fn test_reservation_lifecycle() {
        let mut manager = ChargingStationManager::from_ev_spots(&spots(2));
        let scheduled = now() + chrono::Duration::hours(3);

        let id = manager
            .create_reservation("34EV001", scheduled, 45, Some(ChargerType::Ccs), now())
            .unwrap();
        assert_eq!(manager.active_reservation_count(), 1);
        let reservation = &manager.reservations()[0];
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.duration_minutes, 45);

        manager.cancel_reservation(id).unwrap();
        assert_eq!(manager.active_reservation_count(), 0);
        // Cancelling twice fails
        assert!(manager.cancel_reservation(id).is_err());
    }

    #[test]
    fn test_target_below_initial_charges_nothing() {
        let mut manager = ChargingStationManager::from_ev_spots(&spots(1));
        let session = manager.start_session(&ev("34EV001", 80), 20, now()).unwrap();
        assert_eq!(session.energy_kwh, 0.0);
        assert_eq!(session.cost, 0.0);
    }
}
