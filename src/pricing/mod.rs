//! Pricing engine
//!
//! Pure functions mapping (engagement kind, consumer category, resource
//! multiplier, duration or usage) to a fee. Nothing in here holds state; the
//! orchestrator calls in at well-defined lifecycle points and records the
//! result exactly once.
//!
//! Time-based tickets bill whole units (hours or days), rounded up, with a
//! minimum of one unit even for zero-length stays. Subscriptions pay a fixed
//! fee at issuance and nothing per exit. Wash prices apply a per-package
//! category multiplier table; charging bills metered energy at the
//! station's per-kWh price.

use crate::types::{ChargerType, TicketKind, VehicleCategory, WashPackageKind};
use chrono::Duration;

/// Base rate per started hour for hourly tickets
pub const HOURLY_BASE_RATE: f64 = 100.0;

/// Base rate per started day for daily tickets
pub const DAILY_BASE_RATE: f64 = 500.0;

/// Monthly subscription fee, collected at issuance
pub const MONTHLY_RATE: f64 = 3500.0;

/// Yearly subscription fee, collected at issuance
pub const YEARLY_RATE: f64 = 30000.0;

/// Surcharge factor for yearly subscriptions that include VIP access
pub const YEARLY_VIP_ACCESS_FACTOR: f64 = 1.5;

/// VIP membership fee per month, collected at issuance
pub const VIP_MONTHLY_RATE: f64 = 6000.0;

/// Whole hours billed for a stay, rounded up with a minimum of one
pub fn billed_hours(duration: Duration) -> i64 {
    let minutes = duration.num_minutes().max(0);
    ((minutes + 59) / 60).max(1)
}

/// Whole days billed for a stay, rounded up with a minimum of one
pub fn billed_days(duration: Duration) -> i64 {
    let hours = billed_hours(duration);
    (hours + 23) / 24
}

/// Parking fee due at exit for a ticket of the given kind.
///
/// `category_multiplier` is the vehicle's size multiplier and
/// `spot_multiplier` the multiplier of the spot the ticket is bound to.
/// Subscription kinds always return 0; their fee was collected at issuance.
pub fn parking_fee(
    kind: TicketKind,
    duration: Duration,
    category_multiplier: f64,
    spot_multiplier: f64,
) -> f64 {
    match kind {
        TicketKind::Hourly => {
            billed_hours(duration) as f64 * HOURLY_BASE_RATE * category_multiplier * spot_multiplier
        }
        TicketKind::Daily => {
            billed_days(duration) as f64 * DAILY_BASE_RATE * category_multiplier * spot_multiplier
        }
        TicketKind::Monthly | TicketKind::Yearly | TicketKind::Vip => 0.0,
    }
}

/// Fee collected when a subscription ticket is issued.
///
/// Non-subscription kinds cost nothing at issuance.
pub fn subscription_fee(kind: TicketKind, vip_access: bool) -> f64 {
    match kind {
        TicketKind::Hourly | TicketKind::Daily => 0.0,
        TicketKind::Monthly => MONTHLY_RATE,
        TicketKind::Yearly => {
            if vip_access {
                YEARLY_RATE * YEARLY_VIP_ACCESS_FACTOR
            } else {
                YEARLY_RATE
            }
        }
        TicketKind::Vip => VIP_MONTHLY_RATE,
    }
}

/// Per-category multiplier for a wash package.
///
/// Each package has its own table; the parking size multipliers do not apply
/// to washes. Electric cars wash at car rates.
pub fn wash_multiplier(package: WashPackageKind, category: VehicleCategory) -> f64 {
    use VehicleCategory::*;
    match package {
        WashPackageKind::Basic => match category {
            Truck => 2.0,
            Van => 1.5,
            Motorcycle => 0.5,
            Car | ElectricCar => 1.0,
        },
        WashPackageKind::Interior => match category {
            Truck | Van => 1.8,
            Motorcycle => 0.6,
            Car | ElectricCar => 1.0,
        },
        WashPackageKind::Full => match category {
            Truck => 2.5,
            Van => 1.8,
            Motorcycle => 0.7,
            Car | ElectricCar => 1.0,
        },
        WashPackageKind::Premium => match category {
            Truck => 3.0,
            Van => 2.0,
            Motorcycle => 0.8,
            Car | ElectricCar => 1.0,
        },
    }
}

/// Price of a wash package for a vehicle category
pub fn wash_price(package: WashPackageKind, category: VehicleCategory) -> f64 {
    package.base_price() * wash_multiplier(package, category)
}

/// Energy in kWh needed to charge a battery from `initial` to `target`
/// percent. Returns 0 if the target does not exceed the initial level.
pub fn charging_energy_kwh(battery_capacity_kwh: u32, initial: u8, target: u8) -> f64 {
    if target <= initial {
        return 0.0;
    }
    battery_capacity_kwh as f64 * (target - initial) as f64 / 100.0
}

/// Cost of delivering the given energy at a charger's per-kWh price
pub fn charging_cost(energy_kwh: f64, charger: ChargerType) -> f64 {
    energy_kwh * charger.price_per_kwh()
}

/// Estimated minutes to deliver the given energy at a charger's power
pub fn estimated_charge_minutes(energy_kwh: f64, charger: ChargerType) -> i64 {
    (energy_kwh / charger.power_kw() as f64 * 60.0).round() as i64
}

/// Round an amount to two decimals for currency display.
///
/// Stored amounts keep full precision; this is presentation only.
pub fn round_display(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
