//! Maximum affordable loan from income, existing debts and a DTI ceiling.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::time_value::{annuity_present_value, periodic_rate};
use crate::types::{to_cents, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Affordability always assumes monthly payments.
const MONTHS_PER_YEAR: u32 = 12;

fn default_dti_limit_pct() -> Percent {
    dec!(36)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Gross monthly income.
    pub monthly_income: Money,
    /// Monthly payments on debts already held.
    pub monthly_debts: Money,
    /// Market rate as an annual percentage.
    pub annual_rate_pct: Percent,
    pub years: u32,
    /// Lender's DTI ceiling as a percentage.
    #[serde(default = "default_dti_limit_pct")]
    pub dti_limit_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    /// Largest mortgage payment the DTI ceiling leaves room for.
    pub max_monthly_payment: Money,
    /// Principal that payment supports over the term.
    pub max_loan: Money,
    pub periods: u32,
}

/// Calculate the largest loan the borrower can carry under a DTI ceiling.
///
/// A ceiling already consumed by existing debts yields a zero loan, never a
/// negative one.
pub fn calculate_max_loan(
    input: &AffordabilityInput,
) -> MortgageResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let (output, warnings) = compute_max_loan(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Affordability (DTI-Constrained Annuity PV)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub fn compute_max_loan(
    input: &AffordabilityInput,
) -> MortgageResult<(AffordabilityOutput, Vec<String>)> {
    validate(input)?;
    let mut warnings: Vec<String> = Vec::new();

    let periods = input
        .years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| MortgageError::invalid("years", "Loan term is too long"))?;
    let max_payment = input
        .monthly_income
        .checked_mul(input.dti_limit_pct)
        .map(|v| v / dec!(100))
        .and_then(|v| v.checked_sub(input.monthly_debts))
        .ok_or_else(|| MortgageError::overflow("maximum monthly payment"))?;

    if max_payment <= Decimal::ZERO {
        log::warn!(
            "existing debts {} exhaust the {}% DTI ceiling",
            input.monthly_debts,
            input.dti_limit_pct
        );
        warnings.push(format!(
            "Existing debts already use the full {}% DTI limit; no loan is affordable",
            input.dti_limit_pct
        ));
        return Ok((
            AffordabilityOutput {
                max_monthly_payment: Decimal::ZERO,
                max_loan: Decimal::ZERO,
                periods,
            },
            warnings,
        ));
    }

    let rate = periodic_rate(input.annual_rate_pct, MONTHS_PER_YEAR)?;
    if rate.is_zero() {
        warnings.push("Zero interest rate: loan equals payment times term".into());
    }
    let max_loan = annuity_present_value(max_payment, rate, periods)?;

    Ok((
        AffordabilityOutput {
            max_monthly_payment: to_cents(max_payment),
            max_loan: to_cents(max_loan),
            periods,
        },
        warnings,
    ))
}

fn validate(input: &AffordabilityInput) -> MortgageResult<()> {
    if input.monthly_income <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "monthly_income",
            "Monthly income must be positive",
        ));
    }
    if input.monthly_debts < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "monthly_debts",
            "Monthly debts cannot be negative",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "annual_rate_pct",
            "Interest rate cannot be negative",
        ));
    }
    if input.years == 0 {
        return Err(MortgageError::invalid(
            "years",
            "Loan term must be at least 1 year",
        ));
    }
    if input.dti_limit_pct <= Decimal::ZERO || input.dti_limit_pct > dec!(100) {
        return Err(MortgageError::invalid(
            "dti_limit_pct",
            "DTI limit must be between 0 and 100 percent",
        ));
    }
    Ok(())
}
