//! Amount allocator
//!
//! The central numeric engine: computes the acting party's contribution
//! for a power mode, validates exact-sum and minimum-contribution
//! invariants, and for self-pay computes the installment-eligible
//! remainder after supercharge. Never errors; invalid inputs come back as
//! `is_valid = false` with a violation list, and callers decide whether
//! to block submission.

use crate::money::{min_contribution, money_eq, round2, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::checkout::{
    AllocationResult, PowerMode, SplitParty, SuperchargeContribution, Violation, ViolationKind,
};
use std::collections::HashSet;
use tracing::debug;

/// Input to one allocation pass.
///
/// `other_parties` is the raw split-party list; self-exclusion against
/// `acting_user_id` is applied here before any sums are taken.
#[derive(Debug, Clone)]
pub struct AllocationInput<'a> {
    pub target_amount: f64,
    pub mode: PowerMode,
    pub acting_user_id: &'a str,
    pub other_parties: &'a [SplitParty],
    pub supercharge: &'a [SuperchargeContribution],
    /// The amount the user typed directly (INSTANT/YEARLY); defaults to
    /// the target when absent.
    pub entered_amount: Option<f64>,
    /// Present when the target is only this party's share of a larger,
    /// externally-specified order.
    pub explicit_order_total: Option<f64>,
}

impl<'a> AllocationInput<'a> {
    pub fn new(target_amount: f64, mode: PowerMode, acting_user_id: &'a str) -> Self {
        Self {
            target_amount,
            mode,
            acting_user_id,
            other_parties: &[],
            supercharge: &[],
            entered_amount: None,
            explicit_order_total: None,
        }
    }
}

/// Drop any occurrence of the acting party from a raw split-party list.
pub fn exclude_self(acting_user_id: &str, parties: &[SplitParty]) -> Vec<SplitParty> {
    parties
        .iter()
        .filter(|p| p.user_id != acting_user_id)
        .cloned()
        .collect()
}

/// Run the allocator for one purchase intent.
pub fn allocate(input: &AllocationInput<'_>) -> AllocationResult {
    let target = round2(to_decimal(input.target_amount));
    let parties = exclude_self(input.acting_user_id, input.other_parties);

    let result = match input.mode {
        PowerMode::Instant | PowerMode::Yearly => allocate_direct(input, target, &parties),
        PowerMode::Supercharge => allocate_supercharge(input, target),
        PowerMode::SelfPay => allocate_self_pay(input, target),
    };

    debug!(
        mode = ?input.mode,
        target = %target,
        my_contribution = result.my_contribution,
        is_valid = result.is_valid,
        violations = result.violations.len(),
        "Allocation computed"
    );
    result
}

/// INSTANT / YEARLY: the user's typed amount must cover the target
/// exactly. When an explicit order total is present and a split is
/// active, the expected amount is instead the order total minus the
/// other parties' shares.
fn allocate_direct(
    input: &AllocationInput<'_>,
    target: Decimal,
    parties: &[SplitParty],
) -> AllocationResult {
    let mine = round2(to_decimal(input.entered_amount.unwrap_or(input.target_amount)));

    let expected = match input.explicit_order_total {
        Some(order_total) if !parties.is_empty() => {
            let others: Decimal = parties.iter().map(|p| round2(to_decimal(p.amount))).sum();
            (round2(to_decimal(order_total)) - round2(others)).max(Decimal::ZERO)
        }
        _ => target,
    };

    let mut violations = Vec::new();
    if !money_eq(mine, expected) {
        if mine < expected {
            violations.push(Violation::new(
                ViolationKind::NotEnoughAllocated,
                format!("contribution {} falls short of {}", mine, expected),
            ));
        } else {
            violations.push(Violation::new(
                ViolationKind::ExceedsTarget,
                format!("contribution {} exceeds {}", mine, expected),
            ));
        }
    }
    let is_valid = violations.is_empty();

    // Soft gate: reported but does not flip validity on its own
    if mine < min_contribution(target) {
        violations.push(Violation::new(
            ViolationKind::BelowMinimum,
            format!(
                "contribution {} is below the minimum of {}",
                mine,
                min_contribution(target)
            ),
        ));
    }

    AllocationResult {
        my_contribution: to_f64(mine),
        remaining_for_installments: 0.0,
        supercharge_total: 0.0,
        is_valid,
        violations,
    }
}

/// SUPERCHARGE: the contributions themselves are the acting party's
/// payment; their sum must hit the target to the cent.
fn allocate_supercharge(input: &AllocationInput<'_>, target: Decimal) -> AllocationResult {
    let mut violations = Vec::new();
    let total = supercharge_sum(input.supercharge);

    check_instruments(input.supercharge, &mut violations);
    for contribution in input.supercharge {
        if to_decimal(contribution.amount) < Decimal::ZERO {
            violations.push(Violation::new(
                ViolationKind::NegativeContribution,
                format!(
                    "contribution on {} is negative",
                    contribution.payment_method_id
                ),
            ));
        }
    }

    if !money_eq(total, target) {
        if total < target {
            violations.push(Violation::new(
                ViolationKind::NotEnoughAllocated,
                format!("supercharge total {} falls short of target {}", total, target),
            ));
        } else {
            violations.push(Violation::new(
                ViolationKind::ExceedsTarget,
                format!("supercharge total {} exceeds target {}", total, target),
            ));
        }
    }

    // The 10% minimum is a hard requirement in supercharge mode
    if total < min_contribution(target) {
        violations.push(Violation::new(
            ViolationKind::BelowMinimum,
            format!(
                "supercharge total {} is below the minimum of {}",
                total,
                min_contribution(target)
            ),
        ));
    }

    AllocationResult {
        my_contribution: to_f64(total),
        remaining_for_installments: 0.0,
        supercharge_total: to_f64(total),
        is_valid: violations.is_empty(),
        violations,
    }
}

/// SELFPAY: supercharge covers part of the target up front; a strictly
/// positive remainder must be left for the installment plan.
fn allocate_self_pay(input: &AllocationInput<'_>, target: Decimal) -> AllocationResult {
    let mut violations = Vec::new();
    let total = supercharge_sum(input.supercharge);
    let remaining = (target - total).max(Decimal::ZERO);

    check_instruments(input.supercharge, &mut violations);
    for contribution in input.supercharge {
        if contribution.payment_method_id.trim().is_empty() {
            violations.push(Violation::new(
                ViolationKind::InstrumentMissing,
                "supercharge contribution has no payment instrument assigned",
            ));
        }
        if to_decimal(contribution.amount) < Decimal::ZERO {
            violations.push(Violation::new(
                ViolationKind::NegativeContribution,
                format!(
                    "contribution on {} is negative",
                    contribution.payment_method_id
                ),
            ));
        }
    }

    if total >= target {
        violations.push(Violation::new(
            ViolationKind::RemainderNotPositive,
            format!(
                "supercharge total {} leaves no installment-eligible amount of target {}",
                total, target
            ),
        ));
    }

    AllocationResult {
        my_contribution: to_f64(target),
        remaining_for_installments: to_f64(remaining),
        supercharge_total: to_f64(total),
        is_valid: violations.is_empty(),
        violations,
    }
}

/// Sum of contributions, each rounded to the cent before summing
fn supercharge_sum(contributions: &[SuperchargeContribution]) -> Decimal {
    round2(
        contributions
            .iter()
            .map(|c| round2(to_decimal(c.amount)))
            .sum(),
    )
}

/// No two contributions may reference the same payment instrument
fn check_instruments(contributions: &[SuperchargeContribution], violations: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    for contribution in contributions {
        let id = contribution.payment_method_id.as_str();
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id) {
            violations.push(Violation::new(
                ViolationKind::InstrumentReused,
                format!("payment instrument {} is used more than once", id),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_party(user_id: &str, amount: f64) -> SplitParty {
        SplitParty {
            user_id: user_id.to_string(),
            amount,
        }
    }

    fn create_test_contribution(pm: &str, amount: f64) -> SuperchargeContribution {
        SuperchargeContribution {
            payment_method_id: pm.to_string(),
            amount,
        }
    }

    fn has_violation(result: &AllocationResult, kind: ViolationKind) -> bool {
        result.violations.iter().any(|v| v.kind == kind)
    }

    #[test]
    fn test_exclude_self_filters_acting_user() {
        let parties = vec![
            create_test_party("me", 30.0),
            create_test_party("B", 40.0),
            create_test_party("me", 10.0),
        ];
        let effective = exclude_self("me", &parties);
        assert_eq!(effective.len(), 1);
        assert_eq!(effective[0].user_id, "B");
    }

    #[test]
    fn test_instant_exact_match() {
        let input = AllocationInput::new(100.0, PowerMode::Instant, "me");
        let result = allocate(&input);
        assert!(result.is_valid);
        assert_eq!(result.my_contribution, 100.0);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_instant_entered_amount_mismatch() {
        let mut input = AllocationInput::new(100.0, PowerMode::Instant, "me");
        input.entered_amount = Some(90.0);
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::NotEnoughAllocated));

        input.entered_amount = Some(110.0);
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::ExceedsTarget));
    }

    #[test]
    fn test_split_payment_scenario() {
        // target 100.00, one other party at 40.00, explicit order total 140.00
        let parties = vec![create_test_party("B", 40.0)];
        let mut input = AllocationInput::new(100.0, PowerMode::Instant, "me");
        input.other_parties = &parties;
        input.explicit_order_total = Some(140.0);
        let result = allocate(&input);
        assert!(result.is_valid, "violations: {:?}", result.violations);
        assert_eq!(result.my_contribution, 100.0);
    }

    #[test]
    fn test_split_with_self_in_raw_list() {
        // The acting party's own share in the raw list must not be counted
        let parties = vec![create_test_party("me", 100.0), create_test_party("B", 40.0)];
        let mut input = AllocationInput::new(100.0, PowerMode::Instant, "me");
        input.other_parties = &parties;
        input.explicit_order_total = Some(140.0);
        let result = allocate(&input);
        assert!(result.is_valid, "violations: {:?}", result.violations);
        assert_eq!(result.my_contribution, 100.0);
    }

    #[test]
    fn test_below_minimum_is_soft_for_instant() {
        // Typed amount equals the target, so the hard invariants pass;
        // the 10% rule is reported without flipping validity.
        let input = AllocationInput::new(0.5, PowerMode::Instant, "me");
        let result = allocate(&input);
        assert!(result.is_valid);
        assert!(has_violation(&result, ViolationKind::BelowMinimum));
    }

    #[test]
    fn test_supercharge_exact_sum() {
        let contributions = vec![
            create_test_contribution("pm_1", 60.0),
            create_test_contribution("pm_2", 40.0),
        ];
        let mut input = AllocationInput::new(100.0, PowerMode::Supercharge, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(result.is_valid);
        assert_eq!(result.my_contribution, 100.0);
        assert_eq!(result.supercharge_total, 100.0);
    }

    #[test]
    fn test_supercharge_sum_mismatch() {
        let contributions = vec![create_test_contribution("pm_1", 60.0)];
        let mut input = AllocationInput::new(100.0, PowerMode::Supercharge, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::NotEnoughAllocated));
    }

    #[test]
    fn test_supercharge_cent_precision() {
        // 33.33 + 33.33 + 33.34 == 100.00 exactly at 2dp
        let contributions = vec![
            create_test_contribution("pm_1", 33.33),
            create_test_contribution("pm_2", 33.33),
            create_test_contribution("pm_3", 33.34),
        ];
        let mut input = AllocationInput::new(100.0, PowerMode::Supercharge, "me");
        input.supercharge = &contributions;
        assert!(allocate(&input).is_valid);
    }

    #[test]
    fn test_supercharge_instrument_reuse() {
        let contributions = vec![
            create_test_contribution("pm_1", 60.0),
            create_test_contribution("pm_1", 40.0),
        ];
        let mut input = AllocationInput::new(100.0, PowerMode::Supercharge, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::InstrumentReused));
    }

    #[test]
    fn test_supercharge_negative_contribution() {
        let contributions = vec![
            create_test_contribution("pm_1", 110.0),
            create_test_contribution("pm_2", -10.0),
        ];
        let mut input = AllocationInput::new(100.0, PowerMode::Supercharge, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::NegativeContribution));
    }

    #[test]
    fn test_self_pay_with_supercharge_remainder() {
        // supercharge 150.00 of 200.00 leaves 50.00 for installments
        let contributions = vec![create_test_contribution("pm_1", 150.0)];
        let mut input = AllocationInput::new(200.0, PowerMode::SelfPay, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(result.is_valid, "violations: {:?}", result.violations);
        assert_eq!(result.remaining_for_installments, 50.0);
        assert_eq!(result.supercharge_total, 150.0);
    }

    #[test]
    fn test_self_pay_full_supercharge_invalid() {
        // supercharge covering the whole target leaves nothing to finance
        let contributions = vec![create_test_contribution("pm_1", 200.0)];
        let mut input = AllocationInput::new(200.0, PowerMode::SelfPay, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::RemainderNotPositive));
    }

    #[test]
    fn test_self_pay_without_supercharge() {
        let input = AllocationInput::new(200.0, PowerMode::SelfPay, "me");
        let result = allocate(&input);
        assert!(result.is_valid);
        assert_eq!(result.remaining_for_installments, 200.0);
        assert_eq!(result.supercharge_total, 0.0);
    }

    #[test]
    fn test_self_pay_missing_instrument() {
        let contributions = vec![create_test_contribution("", 50.0)];
        let mut input = AllocationInput::new(200.0, PowerMode::SelfPay, "me");
        input.supercharge = &contributions;
        let result = allocate(&input);
        assert!(!result.is_valid);
        assert!(has_violation(&result, ViolationKind::InstrumentMissing));
    }

    #[test]
    fn test_valid_self_pay_remainder_strictly_positive() {
        // Property: any valid self-pay allocation has remaining > 0
        for supercharge_amount in [0.0, 50.0, 199.99] {
            let contributions = vec![create_test_contribution("pm_1", supercharge_amount)];
            let mut input = AllocationInput::new(200.0, PowerMode::SelfPay, "me");
            input.supercharge = &contributions;
            let result = allocate(&input);
            if result.is_valid {
                assert!(result.remaining_for_installments > 0.0);
            }
        }
    }
}
