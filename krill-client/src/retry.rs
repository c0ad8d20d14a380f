//! Retryable-rejection matching and payload repair
//!
//! Some servers reject an otherwise valid request over an empty or null
//! `splitPaymentsList` and accept the identical request without it. The
//! accepted phrasings are held as a data table of fragment sets so new
//! wordings are a one-line change; the match is case-insensitive and
//! requires every fragment of a set to appear in the server message.
//! Structured rejection codes would make this shim unnecessary.

use serde_json::Value;
use tracing::debug;

/// Fragment sets identifying a retryable rejection. A message matches a
/// set when it contains all of its fragments.
const RETRYABLE_SIGNATURES: &[&[&str]] = &[
    &["splitpaymentslist must not be null or empty"],
    &["split payments list", "empty"],
];

const SPLIT_PAYMENTS_KEY: &str = "splitPaymentsList";
const PERIOD_COUNT_KEY: &str = "numberOfPayments";

/// Whether a server rejection message identifies the known-retryable case
pub fn is_retryable_rejection(message: &str) -> bool {
    let message = message.to_lowercase();
    RETRYABLE_SIGNATURES
        .iter()
        .any(|fragments| fragments.iter().all(|f| message.contains(f)))
}

/// Repair a rejected payload for the single retry: remove every
/// `splitPaymentsList` at any nesting depth and clamp non-positive
/// period counts to 1.
pub fn repair_payload(payload: &mut Value) {
    let removed = strip_key(payload, SPLIT_PAYMENTS_KEY);
    clamp_period_count(payload);
    debug!(removed, "Payload repaired for retry");
}

/// Remove every occurrence of `key`, recursing through objects and
/// arrays; returns the number of removals.
fn strip_key(value: &mut Value, key: &str) -> usize {
    match value {
        Value::Object(map) => {
            let mut removed = usize::from(map.remove(key).is_some());
            for nested in map.values_mut() {
                removed += strip_key(nested, key);
            }
            removed
        }
        Value::Array(items) => items.iter_mut().map(|item| strip_key(item, key)).sum(),
        _ => 0,
    }
}

fn clamp_period_count(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(count) = map.get_mut(PERIOD_COUNT_KEY) {
                if count.as_i64().is_some_and(|n| n <= 0) {
                    *count = Value::from(1);
                }
            }
            for nested in map.values_mut() {
                clamp_period_count(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                clamp_period_count(item);
            }
        }
        _ => {}
    }
}
