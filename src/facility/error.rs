//! Error types and handling
//!
//! All recoverable domain failures are collected in [`FacilityError`], one
//! variant per case the orchestrator can surface to its caller. None of them
//! are fatal to the facility; state is never partially mutated when one is
//! returned.

use crate::types::EngagementStatus;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by facility operations
#[derive(Debug, Error)]
pub enum FacilityError {
    /// No free resource matched the request
    #[error("No available {resource}")]
    ResourceUnavailable {
        /// What was requested, e.g. "parking spot for Truck"
        resource: String,
    },

    /// The consumer record is malformed or duplicates an active one
    #[error("Invalid consumer: {0}")]
    InvalidConsumer(String),

    /// A non-zero fee is due and no payment was offered
    #[error("Payment of {amount:.2} required")]
    PaymentRequired {
        /// Fee that must be covered
        amount: f64,
    },

    /// A payment was offered but did not go through
    #[error("Payment of {amount:.2} via {method} failed")]
    PaymentFailed {
        /// Fee that was being collected
        amount: f64,
        /// Human-readable payment method
        method: String,
    },

    /// No engagement with the given identifier is active
    #[error("Engagement not found: {0}")]
    EngagementNotFound(String),

    /// A subscription engagement is past its validity window
    #[error("Engagement {id} expired at {expired_at}")]
    ExpiredEngagement {
        /// Identifier of the expired engagement
        id: String,
        /// When validity ended
        expired_at: DateTime<Utc>,
    },

    /// A lifecycle transition that the state machine forbids was attempted
    #[error("Invalid lifecycle transition {from} -> {to}")]
    InvalidTransition {
        /// Current state
        from: EngagementStatus,
        /// Requested state
        to: EngagementStatus,
    },

    /// Configuration validation or loading failed
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<crate::types::ConfigValidationError> for FacilityError {
    fn from(error: crate::types::ConfigValidationError) -> Self {
        FacilityError::ConfigurationError(error.to_string())
    }
}

impl FacilityError {
    /// Create a resource-unavailable error
    pub fn resource_unavailable(resource: impl Into<String>) -> Self {
        Self::ResourceUnavailable { resource: resource.into() }
    }

    /// Create an invalid-consumer error
    pub fn invalid_consumer(msg: impl Into<String>) -> Self {
        Self::InvalidConsumer(msg.into())
    }

    /// Create a payment-required error
    pub fn payment_required(amount: f64) -> Self {
        Self::PaymentRequired { amount }
    }

    /// Create a payment-failed error
    pub fn payment_failed(amount: f64, method: impl Into<String>) -> Self {
        Self::PaymentFailed { amount, method: method.into() }
    }

    /// Create an engagement-not-found error
    pub fn engagement_not_found(id: impl ToString) -> Self {
        Self::EngagementNotFound(id.to_string())
    }

    /// Create an expired-engagement error
    pub fn expired_engagement(id: impl ToString, expired_at: DateTime<Utc>) -> Self {
        Self::ExpiredEngagement { id: id.to_string(), expired_at }
    }

    /// Create an invalid-transition error
    pub fn invalid_transition(from: EngagementStatus, to: EngagementStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Check if this is a recoverable error.
    ///
    /// Every domain error is recoverable: the caller can retry with a
    /// different request. Only broken configuration stops the facility from
    /// serving.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FacilityError::ConfigurationError(_))
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            FacilityError::ResourceUnavailable { .. } => "Resource",
            FacilityError::InvalidConsumer(_) => "Consumer",
            FacilityError::PaymentRequired { .. } | FacilityError::PaymentFailed { .. } => {
                "Payment"
            }
            FacilityError::EngagementNotFound(_) => "Lookup",
            FacilityError::ExpiredEngagement { .. } => "Expiry",
            FacilityError::InvalidTransition { .. } => "Lifecycle",
            FacilityError::ConfigurationError(_) => "Configuration",
            FacilityError::IoError(_) => "IO",
            FacilityError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for facility operations
pub type FacilityResult<T> = Result<T, FacilityError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketId;

    #[test]
    fn test_error_display() {
        let err = FacilityError::resource_unavailable("parking spot for Truck");
        assert_eq!(err.to_string(), "No available parking spot for Truck");

        let err = FacilityError::payment_required(150.0);
        assert_eq!(err.to_string(), "Payment of 150.00 required");

        let err = FacilityError::payment_failed(99.5, "Credit Card");
        assert_eq!(err.to_string(), "Payment of 99.50 via Credit Card failed");
    }

    #[test]
    fn test_engagement_not_found_carries_id() {
        let id = TicketId::new();
        let err = FacilityError::engagement_not_found(id);
        assert!(err.to_string().contains("TKT_"));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = FacilityError::invalid_transition(
            EngagementStatus::Completed,
            EngagementStatus::Active,
        );
        assert_eq!(err.to_string(), "Invalid lifecycle transition COMPLETED -> ACTIVE");
    }

    #[test]
    fn test_recoverability() {
        assert!(FacilityError::resource_unavailable("spot").is_recoverable());
        assert!(FacilityError::payment_required(10.0).is_recoverable());
        assert!(FacilityError::invalid_consumer("empty plate").is_recoverable());
        assert!(!FacilityError::configuration_error("zero floors").is_recoverable());
    }

    #[test]
    fn test_categories() {
        assert_eq!(FacilityError::resource_unavailable("spot").category(), "Resource");
        assert_eq!(FacilityError::payment_required(1.0).category(), "Payment");
        assert_eq!(FacilityError::payment_failed(1.0, "Cash").category(), "Payment");
        assert_eq!(FacilityError::engagement_not_found("x").category(), "Lookup");
        assert_eq!(FacilityError::configuration_error("x").category(), "Configuration");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FacilityError = io_error.into();
        assert!(matches!(err, FacilityError::IoError(_)));
        assert_eq!(err.category(), "IO");
    }
}
