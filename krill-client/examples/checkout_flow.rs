//! End-to-end checkout flow example.
//!
//! Resolves eligibility, picks a discount, caps interest-free credit,
//! allocates the amount, computes the installment schedule, builds the
//! request and submits it.
//!
//! Run against a local server:
//! ```sh
//! KRILL_API_URL=http://localhost:8080 KRILL_API_TOKEN=... \
//!     cargo run --example checkout_flow
//! ```

use anyhow::{Context, bail};
use chrono::Utc;
use krill_client::allocation::{AllocationInput, allocate};
use krill_client::credit::cap_interest_free;
use krill_client::discount::select_discount;
use krill_client::eligibility::resolve_eligibility;
use krill_client::plan::{PlanRequest, compute_schedule};
use krill_client::{
    ClientConfig, OperationDraft, OperationKind, PowerMode, SubmissionMachine,
    SuperchargeContribution, build_request,
};
use shared::models::discount::{Discount, DiscountKind};
use shared::models::instrument::{InstrumentKind, PaymentInstrument};
use shared::models::merchant::{Frequency, MerchantConfig, Tier};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env();
    println!("Commerce endpoint: {}", config.base_url);

    let target_amount = 200.0;
    let acting_user = "user_1";

    // Merchant configuration would normally come from the platform
    let merchant = MerchantConfig {
        self_pay_enabled: true,
        min_amount: Some(10.0),
        max_amount: Some(5000.0),
        tiers: vec![Tier {
            frequency: Frequency::BiWeekly,
            min_term: 4,
            max_term: 12,
            min_amount: Some(50.0),
            max_amount: Some(2000.0),
        }],
    };

    let eligibility = resolve_eligibility(Some(&merchant), target_amount, false);
    if !eligibility.self_pay_eligible {
        bail!("self-pay is not offered for {target_amount}");
    }
    let frequency = eligibility.allowed_frequencies[0];
    let bounds = eligibility.term_bounds[&frequency];
    println!("Self-pay eligible: {frequency:?} terms {}..={}", bounds.min, bounds.max);

    let catalog = vec![
        Discount {
            id: "welcome10".to_string(),
            kind: DiscountKind::PercentageOff,
            percentage: Some(10.0),
            amount: None,
            expires_at: None,
        },
        Discount {
            id: "flat5".to_string(),
            kind: DiscountKind::FixedOff,
            percentage: None,
            amount: Some(5.0),
            expires_at: None,
        },
    ];
    let discount_id = select_discount(&catalog, target_amount, &[]);
    println!("Selected discount: {discount_id:?}");

    // Cap the interest-free draw-down against the available balance
    let interest_free_used = cap_interest_free(50.0, 30.0, target_amount);
    println!("Interest-free credit applied: {interest_free_used}");

    // Instruments would come from the instrument-listing collaborator
    let instruments = vec![
        PaymentInstrument {
            id: "pm_card_1".to_string(),
            kind: InstrumentKind::Card,
            label: Some("Visa 4242".to_string()),
        },
        PaymentInstrument {
            id: "pm_bank_1".to_string(),
            kind: InstrumentKind::BankAccount,
            label: None,
        },
    ];
    let card = instruments
        .iter()
        .find(|i| i.kind == InstrumentKind::Card)
        .context("no card instrument on file")?;

    // Cover part of the target up front from the card, finance the rest
    let supercharge = vec![SuperchargeContribution {
        payment_method_id: card.id.clone(),
        amount: 50.0,
    }];
    println!(
        "Supercharging {} from {}",
        supercharge[0].amount,
        card.label.as_deref().unwrap_or(&card.id)
    );

    let mut input = AllocationInput::new(target_amount, PowerMode::SelfPay, acting_user);
    input.supercharge = &supercharge;
    let allocation = allocate(&input);
    if !allocation.is_valid {
        bail!("allocation invalid: {:?}", allocation.violations);
    }
    println!(
        "Allocated {} with {} left for installments",
        allocation.my_contribution, allocation.remaining_for_installments
    );

    let schedule = compute_schedule(&PlanRequest {
        frequency,
        period_count: bounds.min,
        purchase_amount: allocation.remaining_for_installments,
        start_date: Utc::now().date_naive(),
        interest_free_amount: interest_free_used,
        apr: 0.0,
    });
    for payment in &schedule {
        println!("  due {} amount {}", payment.due_date, payment.amount);
    }

    let mut draft = OperationDraft {
        merchant_id: Some("m_demo".to_string()),
        ..Default::default()
    }
    .with_allocation(&allocation);
    draft.plan.self_pay = true;
    draft.plan.payment_method_id = Some(card.id.clone());
    draft.plan.supercharge = supercharge;
    draft.plan.frequency = Some(frequency);
    draft.plan.number_of_payments = Some(bounds.min);
    draft.plan.interest_free_used = Some(interest_free_used);
    draft.plan.discount_ids = discount_id.into_iter().collect();
    draft.plan.split_payments_list = Some(schedule);

    let request = build_request(OperationKind::Payment, draft).context("building request")?;
    let mut machine = SubmissionMachine::new(config.build_http_client());
    match machine.submit(&request, &CancellationToken::new()).await {
        Ok(response) => println!("Accepted: {:?}", response.payment),
        Err(error) => println!("Submission failed: {error}"),
    }

    Ok(())
}
