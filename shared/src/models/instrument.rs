//! Payment instrument listing model

use serde::{Deserialize, Serialize};

/// Payment instrument kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    Card,
    BankAccount,
    Wallet,
}

/// A payment instrument available for contribution assignment.
///
/// CRUD and listing live with an external collaborator; this is the
/// read-only shape the engine consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstrument {
    pub id: String,
    pub kind: InstrumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
