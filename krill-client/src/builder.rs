//! Operation request builder
//!
//! Turns a permissive checkout draft into a canonical `OperationRequest`.
//! Canonicalization lifts legacy aliases to their canonical fields,
//! pruning drops empty collections and default-valued virtual-card
//! options, and required identifiers are checked per operation kind so a
//! malformed request fails here instead of at the server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use shared::checkout::AllocationResult;
use shared::error::ErrorCode;
use shared::operation::request::{
    CommonPlanFields, OperationKind, OperationRequest, VirtualCardOptions,
};
use tracing::debug;

/// A build-time validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("{0} requires a merchant id")]
    MissingMerchantId(OperationKind),
    #[error("SEND requires a recipient id")]
    MissingRecipient,
    #[error("{0} requires a request id")]
    MissingRequestId(OperationKind),
    #[error("SOTERIA_PAYMENT requires a payment plan id")]
    MissingPaymentPlanId,
    #[error("SOTERIA_PAYMENT requires a split payment id")]
    MissingSplitPaymentId,
}

impl BuildError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BuildError::MissingMerchantId(_) => ErrorCode::MissingMerchantId,
            BuildError::MissingRecipient => ErrorCode::MissingRecipient,
            BuildError::MissingRequestId(_) => ErrorCode::MissingRequestId,
            BuildError::MissingPaymentPlanId => ErrorCode::MissingPaymentPlanId,
            BuildError::MissingSplitPaymentId => ErrorCode::MissingSplitPaymentId,
        }
    }
}

/// Legacy nested checkout block still sent by older screens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyCheckout {
    pub token: Option<String>,
    pub merchant_id: Option<String>,
}

/// Permissive operation input as assembled by a checkout flow.
///
/// Carries the canonical identifiers plus the legacy shapes screens still
/// produce; `build_request` canonicalizes and validates. Deserializes from
/// a raw screen payload, with the plan fields inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationDraft {
    pub merchant_id: Option<String>,
    pub recipient_id: Option<String>,
    pub request_id: Option<String>,
    pub payment_plan_id: Option<String>,
    pub split_payment_id: Option<String>,
    pub scheme_id: Option<String>,
    pub checkout_token: Option<String>,
    /// Legacy nested `checkout {token, merchantId}` block
    pub checkout: Option<LegacyCheckout>,
    pub card_options: Option<VirtualCardOptions>,
    /// Legacy alias for `card_options`
    pub card: Option<VirtualCardOptions>,
    #[serde(flatten)]
    pub plan: CommonPlanFields,
}

impl OperationDraft {
    /// Copy an allocation result's amounts into the draft
    pub fn with_allocation(mut self, result: &AllocationResult) -> Self {
        self.plan.amount = result.my_contribution;
        self
    }

    /// Lift legacy fields to their canonical location. Canonical values
    /// win when both are present; the legacy fields are always cleared.
    fn canonicalize(&mut self) {
        if let Some(legacy) = self.checkout.take() {
            if self.checkout_token.is_none() {
                self.checkout_token = legacy.token;
            }
            if self.merchant_id.is_none() {
                self.merchant_id = legacy.merchant_id;
            }
        }
        if let Some(card) = self.card.take() {
            if self.card_options.is_none() {
                self.card_options = Some(card);
            }
        }
    }
}

/// Server-side defaults for virtual-card options; a field equal to its
/// default is stripped from the wire.
fn card_option_defaults() -> [(&'static str, Value); 8] {
    [
        ("cardOnly", json!(false)),
        ("disableControls", json!(false)),
        ("prefund", json!(true)),
        ("approvalsOnly", json!(true)),
        ("activateCard", json!(true)),
        ("expirationHours", json!(24)),
        ("showPan", json!(false)),
        ("showCvv", json!(false)),
    ]
}

/// Drop entries matching the default table; `None` when nothing survives
fn prune_defaults(
    options: VirtualCardOptions,
    defaults: &[(&str, Value)],
) -> Option<VirtualCardOptions> {
    let mut map = match serde_json::to_value(&options) {
        Ok(Value::Object(map)) => map,
        _ => return None,
    };
    for (field, default) in defaults {
        if map.get(*field) == Some(default) {
            map.remove(*field);
        }
    }
    if map.is_empty() {
        return None;
    }
    serde_json::from_value(Value::Object(map)).ok()
}

fn require(value: Option<String>, error: BuildError) -> Result<String, BuildError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(error),
    }
}

/// Build the canonical request for one operation kind.
///
/// Each enum variant can only carry its own identifiers, so operation
/// exclusivity holds without cross-field checks.
pub fn build_request(
    kind: OperationKind,
    mut draft: OperationDraft,
) -> Result<OperationRequest, BuildError> {
    draft.canonicalize();

    let mut plan = draft.plan;
    // Servers reject an empty-but-present splitPaymentsList
    if plan.split_payments_list.as_ref().is_some_and(Vec::is_empty) {
        plan.split_payments_list = None;
    }

    let request = match kind {
        OperationKind::Checkout => OperationRequest::Checkout {
            merchant_id: require(draft.merchant_id, BuildError::MissingMerchantId(kind))?,
            checkout_token: draft.checkout_token,
            plan,
        },
        OperationKind::Payment => OperationRequest::Payment {
            merchant_id: require(draft.merchant_id, BuildError::MissingMerchantId(kind))?,
            plan,
        },
        OperationKind::Send => OperationRequest::Send {
            recipient_id: require(draft.recipient_id, BuildError::MissingRecipient)?,
            plan,
        },
        OperationKind::AcceptRequest => OperationRequest::AcceptRequest {
            request_id: require(draft.request_id, BuildError::MissingRequestId(kind))?,
            plan,
        },
        OperationKind::AcceptSplitRequest => OperationRequest::AcceptSplitRequest {
            request_id: require(draft.request_id, BuildError::MissingRequestId(kind))?,
            plan,
        },
        OperationKind::VirtualCard => OperationRequest::VirtualCard {
            merchant_id: require(draft.merchant_id, BuildError::MissingMerchantId(kind))?,
            card_options: draft
                .card_options
                .and_then(|opts| prune_defaults(opts, &card_option_defaults())),
            plan,
        },
        OperationKind::SoteriaPayment => OperationRequest::SoteriaPayment {
            merchant_id: require(draft.merchant_id, BuildError::MissingMerchantId(kind))?,
            payment_plan_id: require(draft.payment_plan_id, BuildError::MissingPaymentPlanId)?,
            split_payment_id: require(draft.split_payment_id, BuildError::MissingSplitPaymentId)?,
            scheme_id: draft.scheme_id,
            plan,
        },
    };

    debug!(kind = %kind, "Operation request built");
    Ok(request)
}

/// Serialize a built request, dropping any residual null entries
pub fn to_payload(request: &OperationRequest) -> serde_json::Result<Map<String, Value>> {
    let value = serde_json::to_value(request)?;
    match value {
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => Ok(Map::from_iter([("request".to_string(), other)])),
    }
}
