//! Side-by-side comparison of two loan scenarios on the same principal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{build_schedule, AmortizationResult, LoanParameters};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub base: LoanParameters,
    pub alternative: LoanParameters,
}

/// Headline figures of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub first_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub periods: u32,
    /// Remaining balance after each period, for plotting balance curves.
    pub balance_path: Vec<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub base: ScenarioSummary,
    pub alternative: ScenarioSummary,
    /// Base total interest minus alternative total interest.
    pub interest_savings: Money,
    /// Base first payment minus alternative first payment.
    pub payment_difference: Money,
    pub alternative_is_cheaper_per_period: bool,
    /// Periods by which the alternative finishes sooner (negative when later).
    pub period_difference: i64,
}

/// Compare an alternative rate / term / extra payment against the base loan.
pub fn compare_scenarios(
    input: &ScenarioInput,
) -> MortgageResult<ComputationOutput<ScenarioComparison>> {
    let start = Instant::now();
    let (output, warnings) = compute_comparison(&input.base, &input.alternative)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario Comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub fn compute_comparison(
    base: &LoanParameters,
    alternative: &LoanParameters,
) -> MortgageResult<(ScenarioComparison, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();

    if base.principal != alternative.principal {
        warnings.push(format!(
            "Scenarios borrow different amounts ({} vs {}); interest savings mix in the principal change",
            base.principal, alternative.principal
        ));
    }
    if base.periods_per_year != alternative.periods_per_year {
        warnings.push("Scenarios use different payment frequencies".into());
    }

    let (base_result, _) = build_schedule(base)?;
    let (alt_result, _) = build_schedule(alternative)?;

    let base_summary = summarize(&base_result);
    let alt_summary = summarize(&alt_result);

    let payment_difference = base_summary.first_payment - alt_summary.first_payment;
    Ok((
        ScenarioComparison {
            interest_savings: base_summary.total_interest - alt_summary.total_interest,
            payment_difference,
            alternative_is_cheaper_per_period: payment_difference > Decimal::ZERO,
            period_difference: i64::from(base_summary.periods) - i64::from(alt_summary.periods),
            base: base_summary,
            alternative: alt_summary,
        },
        warnings,
    ))
}

fn summarize(result: &AmortizationResult) -> ScenarioSummary {
    ScenarioSummary {
        first_payment: result.first_payment(),
        total_interest: result.total_interest,
        total_paid: result.total_paid,
        periods: result.actual_periods,
        balance_path: result
            .schedule
            .iter()
            .map(|r| r.remaining_balance)
            .collect(),
    }
}
