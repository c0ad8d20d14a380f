//! Installment plan calculator
//!
//! Produces the `PlanPayment` schedule submitted as `splitPaymentsList`.
//! Principal is split equally with the last payment absorbing cent-level
//! rounding, so the schedule always sums to the purchase amount exactly.
//! Interest is simple per-period interest on the declining
//! interest-bearing balance (purchase minus the interest-free portion).

use crate::money::{round2, to_decimal, to_f64};
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use shared::models::merchant::Frequency;
use shared::operation::request::PlanPayment;
use tracing::debug;

/// Inputs to one schedule computation
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub frequency: Frequency,
    pub period_count: u32,
    pub purchase_amount: f64,
    pub start_date: NaiveDate,
    /// Portion of the purchase covered by interest-free credit
    pub interest_free_amount: f64,
    /// Annual percentage rate; zero or negative means interest-free
    pub apr: f64,
}

/// Compute the installment schedule for a plan request.
///
/// A period count below 1 is clamped to 1 rather than rejected, matching
/// the forgiving posture of the rest of the engine.
pub fn compute_schedule(request: &PlanRequest) -> Vec<PlanPayment> {
    let periods = request.period_count.max(1);
    let purchase = round2(to_decimal(request.purchase_amount));
    let interest_free = round2(to_decimal(request.interest_free_amount))
        .max(Decimal::ZERO)
        .min(purchase);

    let per_period_principal = round2(purchase / Decimal::from(periods));
    let period_rate = period_interest_rate(request.apr, request.frequency);

    // Interest accrues only on the part not covered by interest-free credit
    let mut interest_bearing = purchase - interest_free;
    let mut remaining_principal = purchase;
    let mut due_date = request.start_date;
    let mut schedule = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        due_date = advance(due_date, request.frequency);

        let principal = if period == periods {
            remaining_principal
        } else {
            per_period_principal
        };
        let interest = round2(interest_bearing.max(Decimal::ZERO) * period_rate);

        schedule.push(PlanPayment {
            due_date,
            amount: to_f64(principal + interest),
            principal: to_f64(principal),
            interest: to_f64(interest),
        });

        remaining_principal -= principal;
        interest_bearing -= principal;
    }

    debug!(
        periods,
        purchase = %purchase,
        frequency = ?request.frequency,
        "Installment schedule computed"
    );
    schedule
}

/// Simple per-period rate: APR split evenly across the year's periods
fn period_interest_rate(apr: f64, frequency: Frequency) -> Decimal {
    let apr = to_decimal(apr);
    if apr <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    apr / Decimal::ONE_HUNDRED / Decimal::from(frequency.periods_per_year())
}

fn advance(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::BiWeekly => date + chrono::Duration::days(14),
        Frequency::Monthly => date
            .checked_add_months(Months::new(1))
            .unwrap_or(date + chrono::Duration::days(30)),
    }
}
