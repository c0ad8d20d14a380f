//! Shared types for the Krill checkout engine
//!
//! Wire/request/response types, domain models (merchant configuration,
//! discounts, payment instruments), checkout value types and the unified
//! error system used by the client crate.

pub mod checkout;
pub mod error;
pub mod models;
pub mod operation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use checkout::{AllocationResult, PowerMode, SplitParty, SuperchargeContribution, Violation};
pub use error::{AppError, AppResult, ErrorCode};
pub use operation::{OperationKind, OperationRequest, OperationResponse};
