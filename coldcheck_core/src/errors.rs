//! # Error Types
//!
//! Structured error types for coldcheck_core. These errors carry enough
//! context (field name, offending value, reason) to surface a useful
//! message or to handle the failure programmatically.
//!
//! ## Example
//!
//! ```rust
//! use coldcheck_core::errors::{BalanceError, BalanceResult};
//!
//! fn validate_duration(duration_hr: f64) -> BalanceResult<()> {
//!     if duration_hr <= 0.0 {
//!         return Err(BalanceError::InvalidInput {
//!             field: "duration_hr".to_string(),
//!             value: duration_hr.to_string(),
//!             reason: "Duration must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for coldcheck_core operations
pub type BalanceResult<T> = Result<T, BalanceError>;

/// Structured error type for thermal balance operations.
///
/// Each variant provides specific context about what went wrong. Note that
/// the read paths of the setup store and brand catalog deliberately do NOT
/// return these errors; they substitute defaults per the leniency policy.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BalanceError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A value fell outside the mathematical domain of a calculation
    #[error("Domain error for '{field}': {reason}")]
    Domain { field: String, reason: String },

    /// File I/O error (write paths only)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error (write paths only)
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl BalanceError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        BalanceError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Domain error
    pub fn domain(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BalanceError::Domain {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        BalanceError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BalanceError::InvalidInput { .. } => "INVALID_INPUT",
            BalanceError::Domain { .. } => "DOMAIN_ERROR",
            BalanceError::FileError { .. } => "FILE_ERROR",
            BalanceError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = BalanceError::invalid_input("duration_hr", "-3.0", "Duration must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: BalanceError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BalanceError::domain("effective_r", "non-positive").error_code(),
            "DOMAIN_ERROR"
        );
        assert_eq!(
            BalanceError::file_error("write", "x.json", "denied").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let error = BalanceError::invalid_input("weight_lb", "0", "Weight must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'weight_lb': 0 - Weight must be positive"
        );
    }
}
