//! Canonical commerce operation wire types

pub mod request;
pub mod response;

pub use request::{
    CommonPlanFields, OperationKind, OperationRequest, PlanPayment, VirtualCardOptions,
};
pub use response::OperationResponse;
