//! Unified error codes for the Krill checkout engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Session errors
//! - 2xxx: Merchant/eligibility errors
//! - 3xxx: Discount errors
//! - 4xxx: Allocation errors
//! - 5xxx: Request build errors
//! - 6xxx: Submission errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Session ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1002,

    // ==================== 2xxx: Merchant ====================
    /// Merchant configuration could not be loaded
    MerchantConfigMissing = 2001,
    /// Merchant does not offer self-pay plans
    SelfPayNotOffered = 2002,
    /// Amount does not fit any configured tier
    AmountOutOfTierRange = 2003,

    // ==================== 3xxx: Discount ====================
    /// Discount not found in the catalog
    DiscountNotFound = 3001,
    /// Discount has expired
    DiscountExpired = 3002,
    /// Discount value exceeds the payable total
    DiscountExceedsTotal = 3003,

    // ==================== 4xxx: Allocation ====================
    /// Allocation failed one or more invariants
    AllocationInvalid = 4001,
    /// Allocated amounts fall short of the target
    NotEnoughAllocated = 4002,
    /// Allocated amounts exceed the target
    ExceedsTarget = 4003,
    /// The same payment instrument is used twice
    InstrumentReused = 4004,
    /// A contribution is missing its payment instrument
    InstrumentMissing = 4005,
    /// Contribution is below the minimum-contribution rule
    BelowMinimum = 4006,
    /// Self-pay remainder is not strictly positive
    RemainderNotPositive = 4007,
    /// A contribution amount is negative
    NegativeContribution = 4008,

    // ==================== 5xxx: Build ====================
    /// Request build failed
    BuildInvalid = 5001,
    /// Merchant id is required for this operation
    MissingMerchantId = 5002,
    /// Recipient is required for a SEND operation
    MissingRecipient = 5003,
    /// Request id is required for accept operations
    MissingRequestId = 5004,
    /// Payment-plan id is required for a Soteria payment
    MissingPaymentPlanId = 5005,
    /// Split-payment id is required for a Soteria payment
    MissingSplitPaymentId = 5006,

    // ==================== 6xxx: Submission ====================
    /// Submission failed
    SubmissionFailed = 6001,
    /// Submission timed out client-side
    SubmissionTimeout = 6002,
    /// Submission was cancelled before sending
    SubmissionCancelled = 6003,
    /// Server rejected the request
    SubmissionRejected = 6004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Session
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",

            // Merchant
            ErrorCode::MerchantConfigMissing => "Merchant configuration could not be loaded",
            ErrorCode::SelfPayNotOffered => "Merchant does not offer self-pay plans",
            ErrorCode::AmountOutOfTierRange => "Amount does not fit any configured tier",

            // Discount
            ErrorCode::DiscountNotFound => "Discount not found",
            ErrorCode::DiscountExpired => "Discount has expired",
            ErrorCode::DiscountExceedsTotal => "Discount value exceeds the payable total",

            // Allocation
            ErrorCode::AllocationInvalid => "Allocation failed validation",
            ErrorCode::NotEnoughAllocated => "Allocated amounts fall short of the target",
            ErrorCode::ExceedsTarget => "Allocated amounts exceed the target",
            ErrorCode::InstrumentReused => "The same payment instrument is used more than once",
            ErrorCode::InstrumentMissing => "A contribution is missing its payment instrument",
            ErrorCode::BelowMinimum => "Contribution is below the minimum required",
            ErrorCode::RemainderNotPositive => {
                "No installment-eligible amount remains after supercharge"
            }
            ErrorCode::NegativeContribution => "Contribution amount is negative",

            // Build
            ErrorCode::BuildInvalid => "Request build failed",
            ErrorCode::MissingMerchantId => "Merchant id is required for this operation",
            ErrorCode::MissingRecipient => "Recipient is required for a send operation",
            ErrorCode::MissingRequestId => "Request id is required for this operation",
            ErrorCode::MissingPaymentPlanId => "Payment-plan id is required",
            ErrorCode::MissingSplitPaymentId => "Split-payment id is required",

            // Submission
            ErrorCode::SubmissionFailed => "Submission failed",
            ErrorCode::SubmissionTimeout => "Submission timed out",
            ErrorCode::SubmissionCancelled => "Submission was cancelled",
            ErrorCode::SubmissionRejected => "Server rejected the request",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Session
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::TokenExpired),

            // Merchant
            2001 => Ok(ErrorCode::MerchantConfigMissing),
            2002 => Ok(ErrorCode::SelfPayNotOffered),
            2003 => Ok(ErrorCode::AmountOutOfTierRange),

            // Discount
            3001 => Ok(ErrorCode::DiscountNotFound),
            3002 => Ok(ErrorCode::DiscountExpired),
            3003 => Ok(ErrorCode::DiscountExceedsTotal),

            // Allocation
            4001 => Ok(ErrorCode::AllocationInvalid),
            4002 => Ok(ErrorCode::NotEnoughAllocated),
            4003 => Ok(ErrorCode::ExceedsTarget),
            4004 => Ok(ErrorCode::InstrumentReused),
            4005 => Ok(ErrorCode::InstrumentMissing),
            4006 => Ok(ErrorCode::BelowMinimum),
            4007 => Ok(ErrorCode::RemainderNotPositive),
            4008 => Ok(ErrorCode::NegativeContribution),

            // Build
            5001 => Ok(ErrorCode::BuildInvalid),
            5002 => Ok(ErrorCode::MissingMerchantId),
            5003 => Ok(ErrorCode::MissingRecipient),
            5004 => Ok(ErrorCode::MissingRequestId),
            5005 => Ok(ErrorCode::MissingPaymentPlanId),
            5006 => Ok(ErrorCode::MissingSplitPaymentId),

            // Submission
            6001 => Ok(ErrorCode::SubmissionFailed),
            6002 => Ok(ErrorCode::SubmissionTimeout),
            6003 => Ok(ErrorCode::SubmissionCancelled),
            6004 => Ok(ErrorCode::SubmissionRejected),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::MerchantConfigMissing.code(), 2001);
        assert_eq!(ErrorCode::DiscountNotFound.code(), 3001);
        assert_eq!(ErrorCode::AllocationInvalid.code(), 4001);
        assert_eq!(ErrorCode::InstrumentReused.code(), 4004);
        assert_eq!(ErrorCode::BuildInvalid.code(), 5001);
        assert_eq!(ErrorCode::SubmissionTimeout.code(), 6002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::AllocationInvalid.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4007), Ok(ErrorCode::RemainderNotPositive));
        assert_eq!(ErrorCode::try_from(5003), Ok(ErrorCode::MissingRecipient));
        assert_eq!(ErrorCode::try_from(6004), Ok(ErrorCode::SubmissionRejected));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::AllocationInvalid).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(code, ErrorCode::SubmissionTimeout);
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::SelfPayNotOffered,
            ErrorCode::BelowMinimum,
            ErrorCode::MissingSplitPaymentId,
            ErrorCode::SubmissionCancelled,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::Success.message(), "Operation completed successfully");
        assert_eq!(
            ErrorCode::MissingRecipient.message(),
            "Recipient is required for a send operation"
        );
    }
}
