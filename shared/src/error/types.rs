//! Application error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type surfaced to callers of the engine, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (per-violation context, identifiers, etc.)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a required-field error
    pub fn required_field(field: impl Into<String>) -> Self {
        let f = field.into();
        Self::with_message(ErrorCode::RequiredField, format!("{} is required", f))
            .with_detail("field", f)
    }

    /// Create an allocation error
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AllocationInvalid, msg)
    }

    /// Create a build error
    pub fn build(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BuildInvalid, msg)
    }

    /// Create a submission error
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SubmissionFailed, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::AllocationInvalid);
        assert_eq!(err.code, ErrorCode::AllocationInvalid);
        assert_eq!(err.message, "Allocation failed validation");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::BelowMinimum, "Contribution below 10% minimum");
        assert_eq!(err.code, ErrorCode::BelowMinimum);
        assert_eq!(err.message, "Contribution below 10% minimum");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::allocation("Instrument reused")
            .with_detail("paymentMethodId", "pm_1")
            .with_detail("mode", "SUPERCHARGE");

        let details = err.details.unwrap();
        assert_eq!(details.get("paymentMethodId").unwrap(), "pm_1");
        assert_eq!(details.get("mode").unwrap(), "SUPERCHARGE");
    }

    #[test]
    fn test_required_field() {
        let err = AppError::required_field("merchantId");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "merchantId is required");
        assert!(err.details.as_ref().unwrap().contains_key("field"));
    }

    #[test]
    fn test_display() {
        let err = AppError::with_message(ErrorCode::SubmissionRejected, "splitPaymentsList invalid");
        assert_eq!(format!("{}", err), "splitPaymentsList invalid");
    }

    #[test]
    fn test_serialize() {
        let err = AppError::new(ErrorCode::SubmissionTimeout);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":6002"));
        assert!(!json.contains("details"));
    }
}
