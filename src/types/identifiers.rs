//! Unique identifier types for the parking facility simulator
//!
//! Every tracked entity (tickets, spots, wash orders, charging sessions,
//! reservations, incidents, stations, payments) gets its own UUID-backed
//! newtype with a short display prefix so identifiers are unambiguous in
//! logs and serialized output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Defines a prefixed UUID newtype with `Display` and serde support.
///
/// Serialized form is `<PREFIX>_<32 hex chars>`; deserialization also accepts
/// a bare UUID for backward compatibility with older exports.
macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0.simple())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                let raw = s.strip_prefix(concat!($prefix, "_")).unwrap_or(&s);
                let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
                Ok($name(uuid))
            }
        }
    };
}

define_id!(
    /// Unique identifier for a parking ticket
    TicketId,
    "TKT"
);

define_id!(
    /// Unique identifier for a parking spot
    SpotId,
    "SPOT"
);

define_id!(
    /// Unique identifier for a car wash order
    OrderId,
    "WASH"
);

define_id!(
    /// Unique identifier for a charging session
    SessionId,
    "CHG"
);

define_id!(
    /// Unique identifier for a charging reservation
    ReservationId,
    "RSV"
);

define_id!(
    /// Unique identifier for a security incident report
    IncidentId,
    "INC"
);

define_id!(
    /// Unique identifier for a charging station
    StationId,
    "CS"
);

define_id!(
    /// Unique identifier for a payment
    PaymentId,
    "PAY"
);
