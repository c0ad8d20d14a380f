//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Session errors
/// - 2xxx: Merchant/eligibility errors
/// - 3xxx: Discount errors
/// - 4xxx: Allocation errors
/// - 5xxx: Request build errors
/// - 6xxx: Submission errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Session errors (1xxx)
    Session,
    /// Merchant/eligibility errors (2xxx)
    Merchant,
    /// Discount errors (3xxx)
    Discount,
    /// Allocation errors (4xxx)
    Allocation,
    /// Request build errors (5xxx)
    Build,
    /// Submission errors (6xxx)
    Submission,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Session,
            2000..3000 => Self::Merchant,
            3000..4000 => Self::Discount,
            4000..5000 => Self::Allocation,
            5000..6000 => Self::Build,
            6000..7000 => Self::Submission,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Session => "session",
            Self::Merchant => "merchant",
            Self::Discount => "discount",
            Self::Allocation => "allocation",
            Self::Build => "build",
            Self::Submission => "submission",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Session);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Merchant);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Discount);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Allocation);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Build);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Submission);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Session);
        assert_eq!(
            ErrorCode::SelfPayNotOffered.category(),
            ErrorCategory::Merchant
        );
        assert_eq!(ErrorCode::DiscountExpired.category(), ErrorCategory::Discount);
        assert_eq!(
            ErrorCode::InstrumentReused.category(),
            ErrorCategory::Allocation
        );
        assert_eq!(ErrorCode::MissingRecipient.category(), ErrorCategory::Build);
        assert_eq!(
            ErrorCode::SubmissionTimeout.category(),
            ErrorCategory::Submission
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Allocation).unwrap();
        assert_eq!(json, "\"allocation\"");

        let category: ErrorCategory = serde_json::from_str("\"submission\"").unwrap();
        assert_eq!(category, ErrorCategory::Submission);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Allocation.name(), "allocation");
        assert_eq!(ErrorCategory::Submission.name(), "submission");
    }
}
