//! Interest-free credit capper
//!
//! Caps a requested interest-free draw-down by the party's available
//! balance and the payable total. Applied before plan recomputation:
//! a changed `used` amount changes the payable total, so the allocator
//! and plan calculator must run again downstream.

use crate::money::{round2, to_decimal, to_f64};
use rust_decimal::Decimal;

/// `used = min(requested, available, payable_total)`, clamped to >= 0,
/// at 2 decimal places.
pub fn cap_interest_free(requested: f64, available: f64, payable_total: f64) -> f64 {
    let used = round2(to_decimal(requested))
        .min(round2(to_decimal(available)))
        .min(round2(to_decimal(payable_total)))
        .max(Decimal::ZERO);
    to_f64(used)
}
