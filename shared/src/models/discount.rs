//! Discount catalog model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discount kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    PercentageOff,
    FixedOff,
}

/// A discount offered by the catalog for a given merchant and amount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: String,
    pub kind: DiscountKind,
    /// Percentage off, for PERCENTAGE_OFF (e.g. 15.0 = 15%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    /// Fixed amount off in major units, for FIXED_OFF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Discount {
    /// Whether this discount has expired as of `now`.
    ///
    /// Consulted at the catalog boundary; the resolver assumes the catalog
    /// already returned live discounts.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }
}
