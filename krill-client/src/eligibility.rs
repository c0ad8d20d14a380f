//! Self-pay eligibility resolver
//!
//! Derives which installment frequencies are usable and their term bounds
//! from merchant configuration. Intentionally forgiving: absent or
//! malformed configuration degrades to permissive defaults instead of
//! blocking the flow, since the amount allocator performs the hard
//! validation.

use crate::money::to_decimal;
use rust_decimal::Decimal;
use shared::checkout::{Eligibility, TermBounds};
use shared::models::merchant::{Frequency, MerchantConfig, Tier};
use std::collections::HashMap;
use tracing::warn;

/// Term floor applied in fallback mode; configured bounds may widen it
/// but never narrow it.
const FALLBACK_MIN_TERMS: u32 = 4;

/// Resolve self-pay eligibility for a target amount.
///
/// `fallback_mode` is set when merchant configuration could not be loaded
/// but the flow context (e.g. accepting a split request) implies self-pay
/// must still be offered.
pub fn resolve_eligibility(
    config: Option<&MerchantConfig>,
    target_amount: f64,
    fallback_mode: bool,
) -> Eligibility {
    let target = to_decimal(target_amount);
    let tiers: &[Tier] = config.map(|c| c.tiers.as_slice()).unwrap_or(&[]);

    let allowed_frequencies = distinct_frequencies(tiers);
    let mut term_bounds = HashMap::new();
    for freq in &allowed_frequencies {
        term_bounds.insert(*freq, frequency_bounds(tiers, *freq, fallback_mode));
    }

    let self_pay_eligible = if fallback_mode {
        target > Decimal::ZERO
    } else {
        match config {
            Some(config) => {
                config.self_pay_enabled
                    && within_global_bounds(config, target)
                    && fits_any_tier(tiers, target)
            }
            None => {
                warn!("Merchant configuration unavailable outside fallback mode, self-pay withheld");
                false
            }
        }
    };

    Eligibility {
        self_pay_eligible,
        allowed_frequencies,
        term_bounds,
    }
}

/// Distinct frequencies across all tiers, in first-seen order; both
/// frequencies when no tiers exist.
fn distinct_frequencies(tiers: &[Tier]) -> Vec<Frequency> {
    if tiers.is_empty() {
        return vec![Frequency::BiWeekly, Frequency::Monthly];
    }
    let mut seen = Vec::new();
    for tier in tiers {
        if !seen.contains(&tier.frequency) {
            seen.push(tier.frequency);
        }
    }
    seen
}

/// Amount-side bound: zero or negative means unbounded
fn bound(value: Option<f64>) -> Option<Decimal> {
    value.map(to_decimal).filter(|v| *v > Decimal::ZERO)
}

fn within_global_bounds(config: &MerchantConfig, target: Decimal) -> bool {
    if let Some(min) = bound(config.min_amount) {
        if target < min {
            return false;
        }
    }
    if let Some(max) = bound(config.max_amount) {
        if target > max {
            return false;
        }
    }
    true
}

fn tier_matches_amount(tier: &Tier, target: Decimal) -> bool {
    if tier.is_wildcard() {
        return true;
    }
    if let Some(min) = bound(tier.min_amount) {
        if target < min {
            return false;
        }
    }
    if let Some(max) = bound(tier.max_amount) {
        if target > max {
            return false;
        }
    }
    true
}

/// No tiers means the amount trivially fits
fn fits_any_tier(tiers: &[Tier], target: Decimal) -> bool {
    tiers.is_empty() || tiers.iter().any(|t| tier_matches_amount(t, target))
}

/// Period-count bounds for one frequency.
///
/// Configured: `min = max(1, min over matching tiers)`,
/// `max = max(min, max over matching tiers)`; without a matching tier the
/// frequency default applies. Fallback mode starts from `{4, 4}` and only
/// ever widens.
fn frequency_bounds(tiers: &[Tier], frequency: Frequency, fallback_mode: bool) -> TermBounds {
    let matching: Vec<&Tier> = tiers.iter().filter(|t| t.frequency == frequency).collect();

    let configured = if matching.is_empty() {
        None
    } else {
        let min = matching
            .iter()
            .map(|t| t.min_term)
            .min()
            .unwrap_or(1)
            .max(1);
        let max = matching
            .iter()
            .map(|t| t.max_term)
            .max()
            .unwrap_or(frequency.default_max_terms())
            .max(min);
        Some(TermBounds { min, max })
    };

    if fallback_mode {
        // Start from {4, 4}; configured values may widen, never narrow
        TermBounds {
            min: configured
                .map(|b| b.min.min(FALLBACK_MIN_TERMS))
                .unwrap_or(FALLBACK_MIN_TERMS),
            max: configured
                .map(|b| b.max)
                .unwrap_or(frequency.default_max_terms())
                .max(FALLBACK_MIN_TERMS),
        }
    } else {
        configured.unwrap_or(TermBounds {
            min: 1,
            max: frequency.default_max_terms(),
        })
    }
}
