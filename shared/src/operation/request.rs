//! Canonical operation request union
//!
//! The seven operation kinds accepted by `POST /api/user/unified`, as an
//! internally-tagged union over a `type` discriminant. Each variant carries
//! only its own identifiers plus the shared plan fields, so operation
//! exclusivity holds by construction.

use crate::checkout::{SplitParty, SuperchargeContribution};
use crate::models::merchant::Frequency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Checkout,
    Payment,
    Send,
    AcceptRequest,
    AcceptSplitRequest,
    VirtualCard,
    SoteriaPayment,
}

impl OperationKind {
    /// The wire name of this kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Checkout => "CHECKOUT",
            OperationKind::Payment => "PAYMENT",
            OperationKind::Send => "SEND",
            OperationKind::AcceptRequest => "ACCEPT_REQUEST",
            OperationKind::AcceptSplitRequest => "ACCEPT_SPLIT_REQUEST",
            OperationKind::VirtualCard => "VIRTUAL_CARD",
            OperationKind::SoteriaPayment => "SOTERIA_PAYMENT",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One installment row of a self-pay plan schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayment {
    pub due_date: NaiveDate,
    /// Total due this period (principal + interest)
    pub amount: f64,
    pub principal: f64,
    pub interest: f64,
}

/// Plan fields shared by every operation kind.
///
/// Collections are omitted from the wire when empty; servers reject some
/// empty-but-present collections (notably `splitPaymentsList`). Every
/// field falls back to its default on input, so a partial screen payload
/// still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonPlanFields {
    /// Total plan amount in major units
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Period count of the installment plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_payments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Selected payment instrument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supercharge: Vec<SuperchargeContribution>,
    #[serde(default)]
    pub self_pay: bool,
    /// Interest-free credit applied to the plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_free_used: Option<f64>,
    /// Annual percentage rate of the plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discount_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_parties: Vec<SplitParty>,
    /// Installment schedule; `None` rather than an empty list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_payments_list: Option<Vec<PlanPayment>>,
}

impl Default for CommonPlanFields {
    fn default() -> Self {
        Self {
            amount: 0.0,
            currency: "USD".to_string(),
            frequency: None,
            number_of_payments: None,
            start_date: None,
            payment_method_id: None,
            supercharge: Vec::new(),
            self_pay: false,
            interest_free_used: None,
            apr: None,
            discount_ids: Vec::new(),
            other_parties: Vec::new(),
            split_payments_list: None,
        }
    }
}

/// Virtual-card issuance options.
///
/// Every field is optional on the wire; an absent field means "server
/// default". The builder prunes fields equal to the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualCardOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_controls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefund: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approvals_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate_card: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_pan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_cvv: Option<bool>,
}

/// A canonical, server-acceptable commerce operation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum OperationRequest {
    Checkout {
        merchant_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        checkout_token: Option<String>,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
    Payment {
        merchant_id: String,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
    Send {
        recipient_id: String,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
    AcceptRequest {
        request_id: String,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
    AcceptSplitRequest {
        request_id: String,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
    VirtualCard {
        merchant_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        card_options: Option<VirtualCardOptions>,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
    SoteriaPayment {
        merchant_id: String,
        payment_plan_id: String,
        split_payment_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        scheme_id: Option<String>,
        #[serde(flatten)]
        plan: CommonPlanFields,
    },
}

impl OperationRequest {
    /// The discriminant of this request
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Checkout { .. } => OperationKind::Checkout,
            OperationRequest::Payment { .. } => OperationKind::Payment,
            OperationRequest::Send { .. } => OperationKind::Send,
            OperationRequest::AcceptRequest { .. } => OperationKind::AcceptRequest,
            OperationRequest::AcceptSplitRequest { .. } => OperationKind::AcceptSplitRequest,
            OperationRequest::VirtualCard { .. } => OperationKind::VirtualCard,
            OperationRequest::SoteriaPayment { .. } => OperationKind::SoteriaPayment,
        }
    }

    /// The shared plan fields of this request
    pub fn plan(&self) -> &CommonPlanFields {
        match self {
            OperationRequest::Checkout { plan, .. }
            | OperationRequest::Payment { plan, .. }
            | OperationRequest::Send { plan, .. }
            | OperationRequest::AcceptRequest { plan, .. }
            | OperationRequest::AcceptSplitRequest { plan, .. }
            | OperationRequest::VirtualCard { plan, .. }
            | OperationRequest::SoteriaPayment { plan, .. } => plan,
        }
    }
}
