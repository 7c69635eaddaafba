//! Refinance break-even: months of payment savings needed to recover closing costs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{build_schedule, AmortizationResult, LoanParameters};
use crate::error::MortgageError;
use crate::types::{to_cents, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

fn default_periods_per_year() -> u32 {
    12
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    /// Payment on the existing loan.
    pub current_payment: Money,
    /// Balance the new loan would pay off.
    pub remaining_balance: Money,
    pub refi_rate_pct: Percent,
    pub refi_term_years: u32,
    /// Closing costs of the new loan.
    pub refi_cost: Money,
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    /// First payment date of the new loan.
    pub start_date: NaiveDate,
}

/// Break-even either lands after a number of periods or never arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "months", rename_all = "snake_case")]
pub enum BreakEven {
    Months(Decimal),
    /// The new payment is not lower, so the costs are never recovered.
    Unreachable,
}

impl BreakEven {
    pub fn is_reachable(&self) -> bool {
        matches!(self, BreakEven::Months(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceOutput {
    pub current_payment: Money,
    pub refi_payment: Money,
    /// Current payment minus refinanced payment (negative when refinancing costs more).
    pub periodic_saving: Money,
    pub break_even: BreakEven,
    pub refi_total_interest: Money,
}

/// Compute the refinance break-even point.
pub fn break_even_months(
    input: &RefinanceInput,
) -> MortgageResult<ComputationOutput<RefinanceOutput>> {
    let start = Instant::now();
    let (output, warnings) = compute_break_even(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance Break-Even",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Refinance the loan behind an existing schedule.
///
/// Takes the current payment and the balance after the first payment from
/// the schedule's first record.
pub fn refinance_from_schedule(
    schedule: &AmortizationResult,
    periods_per_year: u32,
    refi_rate_pct: Percent,
    refi_term_years: u32,
    refi_cost: Money,
    start_date: NaiveDate,
) -> MortgageResult<RefinanceInput> {
    let first = schedule.schedule.first().ok_or_else(|| {
        MortgageError::invalid("schedule", "Schedule has no payments to refinance")
    })?;
    Ok(RefinanceInput {
        current_payment: first.payment,
        remaining_balance: first.remaining_balance,
        refi_rate_pct,
        refi_term_years,
        refi_cost,
        periods_per_year,
        start_date,
    })
}

pub fn compute_break_even(
    input: &RefinanceInput,
) -> MortgageResult<(RefinanceOutput, Vec<String>)> {
    validate(input)?;
    let mut warnings: Vec<String> = Vec::new();

    let refi_params = LoanParameters::new(
        input.remaining_balance,
        input.refi_rate_pct,
        input.refi_term_years,
        input.start_date,
    )
    .with_periods_per_year(input.periods_per_year);
    let (refi, _) = build_schedule(&refi_params)?;

    let refi_payment = refi.first_payment();
    let periodic_saving = input
        .current_payment
        .checked_sub(refi_payment)
        .ok_or_else(|| MortgageError::overflow("periodic saving"))?;

    let break_even = if periodic_saving > Decimal::ZERO {
        let months = input
            .refi_cost
            .checked_div(periodic_saving)
            .ok_or_else(|| MortgageError::overflow("break-even months"))?;
        BreakEven::Months(months.round_dp(2))
    } else {
        log::warn!(
            "refinance payment {} does not undercut current payment {}",
            refi_payment,
            input.current_payment
        );
        warnings.push("This refinance option doesn't reduce your payment".into());
        BreakEven::Unreachable
    };

    Ok((
        RefinanceOutput {
            current_payment: to_cents(input.current_payment),
            refi_payment,
            periodic_saving: to_cents(periodic_saving),
            break_even,
            refi_total_interest: refi.total_interest,
        },
        warnings,
    ))
}

fn validate(input: &RefinanceInput) -> MortgageResult<()> {
    if input.current_payment <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "current_payment",
            "Current payment must be positive",
        ));
    }
    if input.remaining_balance <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "remaining_balance",
            "Remaining balance must be positive",
        ));
    }
    if input.refi_cost < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "refi_cost",
            "Refinance cost cannot be negative",
        ));
    }
    Ok(())
}
