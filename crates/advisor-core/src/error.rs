//! Error types for the advisor service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire advisor service.
///
/// Variants follow the service's failure taxonomy: configuration problems are
/// fatal at boot, validation and not-found errors map to client errors, and
/// upstream failures are logged with context but surfaced generically.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AdvisorError {
    /// Required configuration is missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Generation or payment provider failure
    #[error("Upstream error from {service}: {message}")]
    Upstream { service: String, message: String },

    /// Webhook signature did not verify
    #[error("Signature error: {0}")]
    Signature(String),

    /// Data access error (hosted database / repository layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error, including rejected rows
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Upstream error for the named external service
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a Signature error
    pub fn signature(message: impl Into<String>) -> Self {
        Self::Signature(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Serialization error for a rejected record
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an upstream provider error
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Check if this is a signature error
    pub fn is_signature(&self) -> bool {
        matches!(self, Self::Signature(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for AdvisorError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, AdvisorError>`.
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        let err = AdvisorError::not_found("conversation", "c-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: conversation 'c-1'");
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let err: AdvisorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AdvisorError::Serialization { ref format, .. } if format == "JSON"));
    }
}
