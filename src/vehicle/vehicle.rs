//! Vehicle records
//!
//! A vehicle is the consumer side of every engagement. It is immutable once
//! created, with one exception: charging completion clears the
//! `needs_charging` flag on electric vehicles.

use crate::facility::error::{FacilityError, FacilityResult};
use crate::types::VehicleCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vehicle registered with the facility
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    /// License plate, the vehicle's identity
    pub plate: String,
    /// Category tag driving fee multipliers and spot capability checks
    pub category: VehicleCategory,
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
    /// Body color
    pub color: String,
    /// Battery capacity in kWh, electric vehicles only
    pub battery_capacity_kwh: Option<u32>,
    /// Whether the vehicle wants a charge on admission
    pub needs_charging: bool,
}

impl Vehicle {
    /// Create a non-electric vehicle.
    ///
    /// Returns [`FacilityError::InvalidConsumer`] for an empty plate or for
    /// the electric category, which requires [`Vehicle::electric`].
    pub fn new(
        plate: impl Into<String>,
        category: VehicleCategory,
        brand: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> FacilityResult<Self> {
        let plate = plate.into();
        if plate.trim().is_empty() {
            return Err(FacilityError::invalid_consumer("license plate must not be empty"));
        }
        if category.is_electric() {
            return Err(FacilityError::invalid_consumer(
                "electric vehicles need a battery capacity, use Vehicle::electric",
            ));
        }
        Ok(Self {
            plate,
            category,
            brand: brand.into(),
            model: model.into(),
            color: color.into(),
            battery_capacity_kwh: None,
            needs_charging: false,
        })
    }

    /// Create an electric vehicle with the given battery capacity in kWh
    pub fn electric(
        plate: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
        battery_capacity_kwh: u32,
    ) -> FacilityResult<Self> {
        let plate = plate.into();
        if plate.trim().is_empty() {
            return Err(FacilityError::invalid_consumer("license plate must not be empty"));
        }
        if battery_capacity_kwh == 0 {
            return Err(FacilityError::invalid_consumer(
                "battery capacity must be greater than 0 kWh",
            ));
        }
        Ok(Self {
            plate,
            category: VehicleCategory::ElectricCar,
            brand: brand.into(),
            model: model.into(),
            color: color.into(),
            battery_capacity_kwh: Some(battery_capacity_kwh),
            needs_charging: false,
        })
    }

    /// Flag the vehicle as wanting a charge on admission
    pub fn with_needs_charging(mut self) -> Self {
        self.needs_charging = true;
        self
    }

    /// Size multiplier applied to time-based parking fees
    pub fn size_multiplier(&self) -> f64 {
        self.category.size_multiplier()
    }

    /// Whether the vehicle can use charging stations
    pub fn is_electric(&self) -> bool {
        self.category.is_electric()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {} ({})", self.category, self.brand, self.model, self.plate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_creation() {
        let car = Vehicle::new("34ABC123", VehicleCategory::Car, "Toyota", "Corolla", "Blue")
            .unwrap();
        assert_eq!(car.plate, "34ABC123");
        assert_eq!(car.size_multiplier(), 1.0);
        assert!(!car.is_electric());
        assert!(car.battery_capacity_kwh.is_none());
        assert!(!car.needs_charging);
    }

    #[test]
    fn test_empty_plate_rejected() {
        let result = Vehicle::new("", VehicleCategory::Car, "Toyota", "Corolla", "Blue");
        assert!(matches!(result, Err(FacilityError::InvalidConsumer(_))));

        let result = Vehicle::new("   ", VehicleCategory::Van, "Ford", "Transit", "White");
        assert!(matches!(result, Err(FacilityError::InvalidConsumer(_))));
    }

    #[test]
    fn test_electric_requires_dedicated_constructor() {
        let result =
            Vehicle::new("34EV001", VehicleCategory::ElectricCar, "Tesla", "Model 3", "Red");
        assert!(matches!(result, Err(FacilityError::InvalidConsumer(_))));

        let ev = Vehicle::electric("34EV001", "Tesla", "Model 3", "Red", 75).unwrap();
        assert!(ev.is_electric());
        assert_eq!(ev.battery_capacity_kwh, Some(75));
        assert_eq!(ev.size_multiplier(), 1.2);
    }

    #[test]
    fn test_electric_rejects_zero_battery() {
        let result = Vehicle::electric("34EV002", "Nissan", "Leaf", "Silver", 0);
        assert!(matches!(result, Err(FacilityError::InvalidConsumer(_))));
    }

    #[test]
    fn test_needs_charging_flag() {
        let ev = Vehicle::electric("34EV003", "Renault", "Zoe", "Green", 52)
            .unwrap()
            .with_needs_charging();
        assert!(ev.needs_charging);
    }

    #[test]
    fn test_display() {
        let truck =
            Vehicle::new("06TRK900", VehicleCategory::Truck, "Volvo", "FH16", "Gray").unwrap();
        assert_eq!(truck.to_string(), "Truck - Volvo FH16 (06TRK900)");
    }
}
