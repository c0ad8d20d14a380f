//! Checkout value types
//!
//! Pure value vocabulary shared between the allocator, the request builder
//! and callers: power modes, split parties, supercharge contributions,
//! eligibility output and allocation results. All amounts are major units
//! at two decimal places.

use crate::error::{AppError, ErrorCode};
use crate::models::merchant::Frequency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The user's chosen payment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerMode {
    Instant,
    Yearly,
    Supercharge,
    #[serde(rename = "SELFPAY")]
    SelfPay,
}

/// A non-acting participant's share of a split order.
///
/// The acting party is never represented in a split-party list; raw input
/// containing the acting party's id must be self-excluded before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitParty {
    pub user_id: String,
    pub amount: f64,
}

/// A named amount charged to one specific payment instrument as part of
/// covering a target amount at checkout time. Instruments must be distinct
/// within one allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperchargeContribution {
    pub payment_method_id: String,
    pub amount: f64,
}

/// Inclusive period-count bounds for one frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermBounds {
    pub min: u32,
    pub max: u32,
}

/// Eligibility resolver output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub self_pay_eligible: bool,
    pub allowed_frequencies: Vec<Frequency>,
    pub term_bounds: HashMap<Frequency, TermBounds>,
}

/// Kind of allocation invariant violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    NotEnoughAllocated,
    ExceedsTarget,
    InstrumentReused,
    InstrumentMissing,
    BelowMinimum,
    NegativeContribution,
    RemainderNotPositive,
}

impl ViolationKind {
    /// The platform error code for this violation kind
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ViolationKind::NotEnoughAllocated => ErrorCode::NotEnoughAllocated,
            ViolationKind::ExceedsTarget => ErrorCode::ExceedsTarget,
            ViolationKind::InstrumentReused => ErrorCode::InstrumentReused,
            ViolationKind::InstrumentMissing => ErrorCode::InstrumentMissing,
            ViolationKind::BelowMinimum => ErrorCode::BelowMinimum,
            ViolationKind::NegativeContribution => ErrorCode::NegativeContribution,
            ViolationKind::RemainderNotPositive => ErrorCode::RemainderNotPositive,
        }
    }
}

/// One failed allocation invariant, reported as data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Amount allocator output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// The acting party's own contribution
    pub my_contribution: f64,
    /// Installment-eligible amount remaining after supercharge (self-pay)
    pub remaining_for_installments: f64,
    /// Sum of all supercharge contributions
    pub supercharge_total: f64,
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl AllocationResult {
    /// Convert an invalid allocation into a structured error, or `None`
    /// when the allocation is valid.
    pub fn as_error(&self) -> Option<AppError> {
        if self.is_valid {
            return None;
        }
        let summary = self
            .violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let mut err = AppError::with_message(ErrorCode::AllocationInvalid, summary);
        for v in &self.violations {
            err = err.with_detail(v.kind.error_code().code().to_string(), v.message.clone());
        }
        Some(err)
    }
}
