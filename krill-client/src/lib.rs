//! Krill Client - payment allocation and commerce request client
//!
//! Turns a purchase intent (target amount, power mode, optional discount,
//! split, supercharge contributions, interest-free credit and self-pay
//! plan) into one canonical commerce operation request, and submits it
//! with a bounded, signature-based retry policy.

pub mod allocation;
pub mod builder;
pub mod config;
pub mod credit;
pub mod discount;
pub mod draft;
pub mod eligibility;
pub mod error;
pub mod http;
pub mod money;
pub mod plan;
pub mod retry;
pub mod submit;

pub use builder::{build_request, BuildError, OperationDraft};
pub use config::ClientConfig;
pub use draft::DraftStore;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use submit::{CommerceTransport, SubmissionMachine, SubmissionState, TransportReply};

// Re-export shared types for convenience
pub use shared::checkout::{AllocationResult, PowerMode, SplitParty, SuperchargeContribution};
pub use shared::operation::{OperationKind, OperationRequest, OperationResponse};
