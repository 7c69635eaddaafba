//! Early payoff: what an added extra payment saves over the base schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{build_schedule, LoanParameters};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffInput {
    pub loan: LoanParameters,
    /// Additional payment per period on top of `loan.extra_payment`.
    pub extra_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffComparison {
    /// Periods cut from the base schedule (months for a monthly loan).
    pub months_saved: u32,
    pub interest_saved: Money,
    pub baseline_periods: u32,
    pub accelerated_periods: u32,
    pub baseline_interest: Money,
    pub accelerated_interest: Money,
}

/// Compare the base schedule against one with `extra_payment` added each period.
pub fn compare_payoff(input: &PayoffInput) -> MortgageResult<ComputationOutput<PayoffComparison>> {
    let start = Instant::now();
    let (output, warnings) = compute_payoff(&input.loan, input.extra_payment)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Early Payoff Comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub fn compute_payoff(
    base: &LoanParameters,
    extra_payment: Money,
) -> MortgageResult<(PayoffComparison, Vec<String>)> {
    if extra_payment < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "extra_payment",
            "Additional payment cannot be negative",
        ));
    }

    let (baseline, mut warnings) = build_schedule(base)?;
    let combined_extra = base
        .extra_payment
        .checked_add(extra_payment)
        .ok_or_else(|| MortgageError::overflow("combined extra payment"))?;
    let accelerated_params = base.clone().with_extra_payment(combined_extra);
    let (accelerated, _) = build_schedule(&accelerated_params)?;

    if extra_payment.is_zero() {
        warnings.push("No additional payment; schedules are identical".into());
    }

    Ok((
        PayoffComparison {
            months_saved: baseline
                .actual_periods
                .saturating_sub(accelerated.actual_periods),
            interest_saved: baseline.total_interest - accelerated.total_interest,
            baseline_periods: baseline.actual_periods,
            accelerated_periods: accelerated.actual_periods,
            baseline_interest: baseline.total_interest,
            accelerated_interest: accelerated.total_interest,
        },
        warnings,
    ))
}
