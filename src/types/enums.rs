//! Enumeration types for the parking facility simulator
//!
//! All category tags are closed enums: vehicle categories, spot kinds,
//! ticket kinds, wash packages, charger types, incident classification, the
//! shared engagement lifecycle, and notification channels. Pricing
//! multipliers and capability rules live on the variants themselves so the
//! tables stay next to the tags they describe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle categories accepted by the facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCategory {
    /// Standard passenger car
    Car,
    /// Two-wheeler
    Motorcycle,
    /// Light commercial van
    Van,
    /// Heavy truck
    Truck,
    /// Battery-electric car
    ElectricCar,
}

impl VehicleCategory {
    /// Size multiplier applied to time-based parking fees
    pub fn size_multiplier(&self) -> f64 {
        match self {
            VehicleCategory::Car => 1.0,
            VehicleCategory::Motorcycle => 0.5,
            VehicleCategory::Van => 1.5,
            VehicleCategory::Truck => 2.0,
            VehicleCategory::ElectricCar => 1.2,
        }
    }

    /// Whether this category can use charging stations
    pub fn is_electric(&self) -> bool {
        matches!(self, VehicleCategory::ElectricCar)
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCategory::Car => write!(f, "Car"),
            VehicleCategory::Motorcycle => write!(f, "Motorcycle"),
            VehicleCategory::Van => write!(f, "Van"),
            VehicleCategory::Truck => write!(f, "Truck"),
            VehicleCategory::ElectricCar => write!(f, "Electric Car"),
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(VehicleCategory::Car),
            "motorcycle" | "motorbike" => Ok(VehicleCategory::Motorcycle),
            "van" => Ok(VehicleCategory::Van),
            "truck" => Ok(VehicleCategory::Truck),
            "electric car" | "electriccar" | "electric" | "ev" => {
                Ok(VehicleCategory::ElectricCar)
            }
            _ => Err(format!("Unknown vehicle category: {}", s)),
        }
    }
}

/// Parking spot kinds with their pricing and capability rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpotKind {
    /// Accessible spot close to the elevators, discounted
    Disabled,
    /// Narrow spot for small vehicles, discounted
    Compact,
    /// Premium spot with valet service
    Vip,
    /// Spot with a charging point, electric vehicles only
    EvCharging,
    /// Standard spot
    Regular,
}

impl SpotKind {
    /// Price multiplier applied to time-based parking fees
    pub fn price_multiplier(&self) -> f64 {
        match self {
            SpotKind::Regular => 1.0,
            SpotKind::Compact => 0.8,
            SpotKind::Disabled => 0.5,
            SpotKind::Vip => 2.5,
            SpotKind::EvCharging => 1.8,
        }
    }

    /// Capability predicate: which vehicle categories this spot kind serves.
    ///
    /// Trucks only fit VIP spots; electric-charging spots serve electric
    /// vehicles exclusively.
    pub fn accepts(&self, category: VehicleCategory) -> bool {
        use VehicleCategory::*;
        match self {
            SpotKind::Regular => !matches!(category, Truck),
            SpotKind::Compact => matches!(category, Motorcycle | Car | ElectricCar),
            SpotKind::Disabled => matches!(category, Car | Van | ElectricCar),
            SpotKind::Vip => true,
            SpotKind::EvCharging => matches!(category, ElectricCar),
        }
    }
}

impl fmt::Display for SpotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotKind::Disabled => write!(f, "Disabled Spot"),
            SpotKind::Compact => write!(f, "Compact Spot"),
            SpotKind::Vip => write!(f, "VIP Spot"),
            SpotKind::EvCharging => write!(f, "Electric Charging Spot"),
            SpotKind::Regular => write!(f, "Regular Spot"),
        }
    }
}

/// Ticket kinds offered at admission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketKind {
    /// Billed per started hour at exit
    Hourly,
    /// Billed per started day at exit
    Daily,
    /// Monthly subscription, paid at issuance
    Monthly,
    /// Yearly subscription, paid at issuance
    Yearly,
    /// VIP membership with valet and charging access, paid at issuance
    Vip,
}

impl TicketKind {
    /// Subscription kinds pay a fixed fee at issuance and nothing per exit
    pub fn is_subscription(&self) -> bool {
        matches!(self, TicketKind::Monthly | TicketKind::Yearly | TicketKind::Vip)
    }

    /// Validity window measured from issuance, if the kind expires
    pub fn validity(&self) -> Option<chrono::Duration> {
        match self {
            TicketKind::Hourly => None,
            TicketKind::Daily => Some(chrono::Duration::days(1)),
            TicketKind::Monthly | TicketKind::Vip => Some(chrono::Duration::days(30)),
            TicketKind::Yearly => Some(chrono::Duration::days(365)),
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketKind::Hourly => write!(f, "Hourly Ticket"),
            TicketKind::Daily => write!(f, "Daily Ticket"),
            TicketKind::Monthly => write!(f, "Monthly Subscription"),
            TicketKind::Yearly => write!(f, "Yearly Subscription"),
            TicketKind::Vip => write!(f, "VIP Membership"),
        }
    }
}

impl FromStr for TicketKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOURLY" => Ok(TicketKind::Hourly),
            "DAILY" => Ok(TicketKind::Daily),
            "MONTHLY" => Ok(TicketKind::Monthly),
            "YEARLY" => Ok(TicketKind::Yearly),
            "VIP" => Ok(TicketKind::Vip),
            _ => Err(format!("Unknown ticket kind: {}", s)),
        }
    }
}

/// Car wash packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WashPackageKind {
    /// Exterior wash
    Basic,
    /// Interior cleaning
    Interior,
    /// Exterior plus interior plus engine and polish
    Full,
    /// Detailed premium treatment
    Premium,
}

impl WashPackageKind {
    /// Base price before the per-category multiplier
    pub fn base_price(&self) -> f64 {
        match self {
            WashPackageKind::Basic => 50.0,
            WashPackageKind::Interior => 80.0,
            WashPackageKind::Full => 150.0,
            WashPackageKind::Premium => 300.0,
        }
    }

    /// Advertised duration in minutes
    pub fn estimated_minutes(&self) -> u32 {
        match self {
            WashPackageKind::Basic => 15,
            WashPackageKind::Interior => 30,
            WashPackageKind::Full => 60,
            WashPackageKind::Premium => 120,
        }
    }

    /// Line items included in the package
    pub fn services(&self) -> Vec<&'static str> {
        match self {
            WashPackageKind::Basic => {
                vec!["Exterior body wash", "Rim cleaning", "Window wipe"]
            }
            WashPackageKind::Interior => vec![
                "Seat cleaning",
                "Upholstery cleaning",
                "Dashboard cleaning",
                "Inside window wipe",
                "Vent cleaning",
            ],
            WashPackageKind::Full => {
                let mut services = WashPackageKind::Basic.services();
                services.extend(WashPackageKind::Interior.services());
                services.extend(["Engine cleaning", "Polish", "Air freshener"]);
                services
            }
            WashPackageKind::Premium => {
                let mut services = WashPackageKind::Full.services();
                services.extend([
                    "Ceramic coating",
                    "Headlight polishing",
                    "Rim painting",
                    "Odor removal (ozone)",
                ]);
                services
            }
        }
    }

    /// All packages in menu order
    pub fn all() -> [WashPackageKind; 4] {
        [
            WashPackageKind::Basic,
            WashPackageKind::Interior,
            WashPackageKind::Full,
            WashPackageKind::Premium,
        ]
    }
}

impl fmt::Display for WashPackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WashPackageKind::Basic => write!(f, "Basic Wash"),
            WashPackageKind::Interior => write!(f, "Interior Cleaning"),
            WashPackageKind::Full => write!(f, "Full Package"),
            WashPackageKind::Premium => write!(f, "Premium Detailing"),
        }
    }
}

impl FromStr for WashPackageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(WashPackageKind::Basic),
            "interior" => Ok(WashPackageKind::Interior),
            "full" => Ok(WashPackageKind::Full),
            "premium" => Ok(WashPackageKind::Premium),
            _ => Err(format!("Unknown wash package: {}", s)),
        }
    }
}

/// Charger hardware profiles installed at charging stations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargerType {
    /// Standard AC charger
    Type2,
    /// Fast DC charger
    Chademo,
    /// High-power DC charger
    Ccs,
}

impl ChargerType {
    /// Maximum charging power in kW
    pub fn power_kw(&self) -> u32 {
        match self {
            ChargerType::Type2 => 50,
            ChargerType::Chademo => 100,
            ChargerType::Ccs => 150,
        }
    }

    /// Energy price per kWh
    pub fn price_per_kwh(&self) -> f64 {
        match self {
            ChargerType::Type2 => 6.0,
            ChargerType::Chademo => 7.0,
            ChargerType::Ccs => 8.0,
        }
    }

    /// Station build-out rotation, in install order
    pub fn rotation() -> [ChargerType; 3] {
        [ChargerType::Chademo, ChargerType::Ccs, ChargerType::Type2]
    }
}

impl fmt::Display for ChargerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargerType::Type2 => write!(f, "Type2"),
            ChargerType::Chademo => write!(f, "CHAdeMO"),
            ChargerType::Ccs => write!(f, "CCS"),
        }
    }
}

impl FromStr for ChargerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type2" => Ok(ChargerType::Type2),
            "chademo" => Ok(ChargerType::Chademo),
            "ccs" => Ok(ChargerType::Ccs),
            _ => Err(format!("Unknown charger type: {}", s)),
        }
    }
}

/// Lifecycle of any tracked engagement (ticket, wash order, charging session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementStatus {
    /// Created but not yet bound to a resource
    Pending,
    /// Bound to a resource and in progress
    Active,
    /// Finished normally; fee finalized
    Completed,
    /// Abandoned before or during service; no fee
    Cancelled,
}

impl EngagementStatus {
    /// Terminal states never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngagementStatus::Completed | EngagementStatus::Cancelled)
    }

    /// Legal transitions of the lifecycle state machine.
    ///
    /// Pending may activate or cancel; Active may complete or cancel.
    /// Completion never skips Active.
    pub fn can_transition_to(&self, next: EngagementStatus) -> bool {
        use EngagementStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Cancelled) | (Active, Completed) | (Active, Cancelled)
        )
    }
}

impl fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementStatus::Pending => write!(f, "PENDING"),
            EngagementStatus::Active => write!(f, "ACTIVE"),
            EngagementStatus::Completed => write!(f, "COMPLETED"),
            EngagementStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Lifecycle of a charging reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Created, not yet confirmed against a station
    Pending,
    /// Station assigned and confirmed
    Confirmed,
    /// Currently being served
    Active,
    /// Served to completion
    Completed,
    /// Withdrawn before service
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "PENDING"),
            ReservationStatus::Confirmed => write!(f, "CONFIRMED"),
            ReservationStatus::Active => write!(f, "ACTIVE"),
            ReservationStatus::Completed => write!(f, "COMPLETED"),
            ReservationStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Classification of reported security incidents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentKind {
    /// Collision or property damage
    Accident,
    /// Stolen vehicle or belongings
    Theft,
    /// Deliberate damage
    Vandalism,
    /// Suspicious behavior observed
    Suspicious,
    /// Anything else
    Other,
}

impl IncidentKind {
    /// Severity derived from the incident classification
    pub fn severity(&self) -> IncidentSeverity {
        match self {
            IncidentKind::Theft | IncidentKind::Vandalism => IncidentSeverity::High,
            IncidentKind::Accident | IncidentKind::Other => IncidentSeverity::Medium,
            IncidentKind::Suspicious => IncidentSeverity::Low,
        }
    }
}

impl fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentKind::Accident => write!(f, "Accident"),
            IncidentKind::Theft => write!(f, "Theft"),
            IncidentKind::Vandalism => write!(f, "Vandalism"),
            IncidentKind::Suspicious => write!(f, "Suspicious"),
            IncidentKind::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for IncidentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accident" => Ok(IncidentKind::Accident),
            "theft" => Ok(IncidentKind::Theft),
            "vandalism" => Ok(IncidentKind::Vandalism),
            "suspicious" => Ok(IncidentKind::Suspicious),
            "other" => Ok(IncidentKind::Other),
            _ => Err(format!("Unknown incident kind: {}", s)),
        }
    }
}

/// Severity grading of security incidents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncidentSeverity {
    /// Informational, no immediate action
    Low,
    /// Needs follow-up
    Medium,
    /// Needs prompt investigation
    High,
    /// Emergency response
    Critical,
}

impl fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentSeverity::Low => write!(f, "LOW"),
            IncidentSeverity::Medium => write!(f, "MEDIUM"),
            IncidentSeverity::High => write!(f, "HIGH"),
            IncidentSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Investigation state of a security incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    /// Newly reported
    Open,
    /// Under investigation
    Investigating,
    /// Cause identified and handled
    Resolved,
    /// Archived
    Closed,
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentStatus::Open => write!(f, "OPEN"),
            IncidentStatus::Investigating => write!(f, "INVESTIGATING"),
            IncidentStatus::Resolved => write!(f, "RESOLVED"),
            IncidentStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Delivery channels for customer notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationChannel {
    /// Text message
    Sms,
    /// Email
    Email,
    /// Mobile push notification
    Push,
}

impl NotificationChannel {
    /// Simulated delivery success rate for the channel
    pub fn delivery_rate(&self) -> f64 {
        match self {
            NotificationChannel::Sms => 0.95,
            NotificationChannel::Email => 0.98,
            NotificationChannel::Push => 0.97,
        }
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationChannel::Sms => write!(f, "SMS"),
            NotificationChannel::Email => write!(f, "EMAIL"),
            NotificationChannel::Push => write!(f, "PUSH"),
        }
    }
}
