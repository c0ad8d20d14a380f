//! Merchant configuration model
//!
//! Fetched from the merchant configuration collaborator and consumed as
//! read-only eligibility input. Amount bounds are in major units at two
//! decimal places; a bound of zero or below means "no bound".

use serde::{Deserialize, Serialize};

/// Installment frequency for self-pay plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    BiWeekly,
    Monthly,
}

impl Frequency {
    /// Number of periods in one year at this frequency
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::BiWeekly => 26,
            Frequency::Monthly => 12,
        }
    }

    /// Default maximum term when no tier configures this frequency
    pub const fn default_max_terms(&self) -> u32 {
        match self {
            Frequency::BiWeekly => 26,
            Frequency::Monthly => 12,
        }
    }
}

/// A merchant-configured (frequency, term-range, amount-range) eligibility
/// bracket for self-pay plans. A tier whose amount bounds are both absent or
/// zero is a wildcard matching any amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub frequency: Frequency,
    pub min_term: u32,
    pub max_term: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

impl Tier {
    /// Whether this tier matches any amount (wildcard)
    pub fn is_wildcard(&self) -> bool {
        fn unbounded(v: Option<f64>) -> bool {
            v.map(|a| a <= 0.0).unwrap_or(true)
        }
        unbounded(self.min_amount) && unbounded(self.max_amount)
    }
}

/// Merchant configuration for checkout and self-pay eligibility
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantConfig {
    pub self_pay_enabled: bool,
    /// Global minimum amount; zero or negative means no bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    /// Global maximum amount; zero or negative means no bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub tiers: Vec<Tier>,
}
