//! Debt-to-income ratio with the conventional underwriting bands.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{to_cents, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Highest DTI still considered favorable.
pub const FAVORABLE_MAX_PCT: Decimal = dec!(36);

/// Highest DTI most lenders will still approve.
pub const MARGINAL_MAX_PCT: Decimal = dec!(43);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtiInput {
    /// Gross monthly income.
    pub monthly_income: Money,
    /// Monthly payments on debts already held.
    pub existing_debts: Money,
    /// Proposed mortgage payment.
    pub new_payment: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtiBand {
    Favorable,
    Marginal,
    HighRisk,
}

impl DtiBand {
    pub fn classify(dti_pct: Percent) -> Self {
        if dti_pct > MARGINAL_MAX_PCT {
            DtiBand::HighRisk
        } else if dti_pct > FAVORABLE_MAX_PCT {
            DtiBand::Marginal
        } else {
            DtiBand::Favorable
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            DtiBand::Favorable => "Good DTI (under 36%)",
            DtiBand::Marginal => "Approval may be difficult (36-43% DTI)",
            DtiBand::HighRisk => "Most lenders will reject applications over 43% DTI",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtiOutput {
    /// Debt-to-income as a percentage, rounded to 2 dp.
    pub dti_pct: Percent,
    pub total_monthly_debt: Money,
    pub band: DtiBand,
    pub advisory: String,
    /// Extra monthly debt that still keeps the ratio favorable (negative when already above).
    pub favorable_headroom: Money,
}

/// Calculate the debt-to-income ratio including a proposed payment.
pub fn calculate_dti(input: &DtiInput) -> MortgageResult<ComputationOutput<DtiOutput>> {
    let start = Instant::now();
    let output = compute_dti(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt-to-Income Ratio",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

pub fn compute_dti(input: &DtiInput) -> MortgageResult<DtiOutput> {
    validate(input)?;

    let total_monthly_debt = input
        .existing_debts
        .checked_add(input.new_payment)
        .ok_or_else(|| MortgageError::overflow("total monthly debt"))?;
    let dti_pct = total_monthly_debt
        .checked_div(input.monthly_income)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| MortgageError::overflow("debt-to-income ratio"))?;
    let band = DtiBand::classify(dti_pct);
    let favorable_headroom = input
        .monthly_income
        .checked_mul(FAVORABLE_MAX_PCT)
        .map(|v| v / dec!(100))
        .and_then(|v| v.checked_sub(total_monthly_debt))
        .ok_or_else(|| MortgageError::overflow("favorable headroom"))?;

    Ok(DtiOutput {
        dti_pct: dti_pct.round_dp(2),
        total_monthly_debt: to_cents(total_monthly_debt),
        band,
        advisory: band.advisory().to_string(),
        favorable_headroom: to_cents(favorable_headroom),
    })
}

fn validate(input: &DtiInput) -> MortgageResult<()> {
    if input.monthly_income <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "monthly_income",
            "Monthly income must be positive",
        ));
    }
    if input.existing_debts < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "existing_debts",
            "Existing debts cannot be negative",
        ));
    }
    if input.new_payment < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "new_payment",
            "Proposed payment cannot be negative",
        ));
    }
    Ok(())
}
