//! Discount resolver
//!
//! Canonicalizes discount-id selections and auto-selects the best valid
//! discount for a target amount. At most one discount is ever active, and
//! selection is idempotent for identical inputs.

use crate::money::{round2, to_decimal};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::discount::{Discount, DiscountKind};

/// A raw discount-id selection as received from callers.
///
/// Screens hand discounts over in several legacy shapes: raw id strings,
/// comma-separated id strings, or objects keyed `id`, `discountId` or
/// `code`. All are accepted and canonicalized.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DiscountIdInput {
    Object {
        #[serde(alias = "discountId", alias = "code")]
        id: String,
    },
    /// Raw id, possibly a comma-separated list
    Raw(String),
}

/// Canonicalize raw discount-id inputs: split comma-separated strings,
/// trim, drop empties, deduplicate preserving first-seen order.
pub fn canonicalize_ids(inputs: &[DiscountIdInput]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let mut push = |id: &str| {
        let id = id.trim();
        if !id.is_empty() && !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    };
    for input in inputs {
        match input {
            DiscountIdInput::Object { id } => push(id),
            DiscountIdInput::Raw(raw) => {
                for part in raw.split(',') {
                    push(part);
                }
            }
        }
    }
    ids
}

/// The value of a discount against a target amount, at 2 decimal places.
///
/// Returns `None` when the discount carries no usable value for its kind.
pub fn discount_value(discount: &Discount, target_amount: f64) -> Option<Decimal> {
    let target = to_decimal(target_amount);
    match discount.kind {
        DiscountKind::PercentageOff => discount
            .percentage
            .map(|p| round2(target * to_decimal(p) / Decimal::ONE_HUNDRED)),
        DiscountKind::FixedOff => discount.amount.map(|a| round2(to_decimal(a))),
    }
}

/// A discount is valid iff applying it leaves a non-negative total
fn is_valid(discount: &Discount, target_amount: f64) -> bool {
    match discount_value(discount, target_amount) {
        Some(value) => to_decimal(target_amount) - value >= Decimal::ZERO,
        None => false,
    }
}

/// Resolve the active discount id.
///
/// A non-empty preselection is used verbatim after canonicalization (the
/// first canonical id becomes the selection). Otherwise the single valid
/// discount with the maximum value wins, ties broken by first-seen order.
pub fn select_discount(
    available: &[Discount],
    target_amount: f64,
    preselected: &[DiscountIdInput],
) -> Option<String> {
    let preselected_ids = canonicalize_ids(preselected);
    if let Some(id) = preselected_ids.into_iter().next() {
        return Some(id);
    }

    let mut best: Option<(&Discount, Decimal)> = None;
    for discount in available {
        if !is_valid(discount, target_amount) {
            continue;
        }
        let value = match discount_value(discount, target_amount) {
            Some(v) => v,
            None => continue,
        };
        // Strict comparison keeps the first-seen discount on ties
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((discount, value)),
        }
    }
    best.map(|(d, _)| d.id.clone())
}
