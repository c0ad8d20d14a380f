//! Commerce endpoint response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `POST /api/user/unified`.
///
/// Success bodies carry one per-operation sub-object whose shape varies by
/// operation and is opaque to this engine; failure bodies carry a
/// `message` or `error` string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soteria_payment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResponse {
    /// The server-reported failure text, preferring `message` over `error`
    pub fn failure_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let json = r#"{"payment":{"id":"pay_1","status":"APPROVED"}}"#;
        let response: OperationResponse = serde_json::from_str(json).unwrap();
        assert!(response.payment.is_some());
        assert!(response.failure_message().is_none());
    }

    #[test]
    fn test_failure_message_preference() {
        let json = r#"{"message":"splitPaymentsList must not be null or empty","error":"400"}"#;
        let response: OperationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.failure_message(),
            Some("splitPaymentsList must not be null or empty")
        );

        let json = r#"{"error":"internal failure"}"#;
        let response: OperationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.failure_message(), Some("internal failure"));
    }

    #[test]
    fn test_card_response_wire_name() {
        let json = r#"{"cardResponse":{"pan":null}}"#;
        let response: OperationResponse = serde_json::from_str(json).unwrap();
        assert!(response.card_response.is_some());
    }
}
