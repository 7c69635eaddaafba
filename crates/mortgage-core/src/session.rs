//! Caller-owned results of one interactive analysis.
//!
//! The engine functions are stateless; a front-end that needs to remember
//! the last schedule between interactions keeps an [`AnalysisSession`] and
//! hands it back on every call. Recalculating the mortgage invalidates every
//! result derived from the previous schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{build_schedule, AmortizationResult, LoanParameters};
use crate::analysis::payoff::{compute_payoff, PayoffComparison};
use crate::analysis::refinance::{compute_break_even, refinance_from_schedule, RefinanceOutput};
use crate::analysis::scenario::{compute_comparison, ScenarioComparison};
use crate::borrower::affordability::{compute_max_loan, AffordabilityInput, AffordabilityOutput};
use crate::borrower::dti::{compute_dti, DtiInput, DtiOutput};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub loan: Option<LoanParameters>,
    pub schedule: Option<AmortizationResult>,
    pub dti: Option<DtiOutput>,
    pub affordability: Option<AffordabilityOutput>,
    pub comparison: Option<ScenarioComparison>,
    pub payoff: Option<PayoffComparison>,
    pub refinance: Option<RefinanceOutput>,
    /// Warnings collected from every calculation in the session.
    pub warnings: Vec<String>,
    /// Warnings of the affordability result, which outlives a recalculated schedule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    affordability_warnings: Vec<String>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the schedule for `params`, replacing the previous loan.
    pub fn calculate_mortgage(
        &mut self,
        params: LoanParameters,
    ) -> MortgageResult<&AmortizationResult> {
        let (result, warnings) = build_schedule(&params)?;
        self.dti = None;
        self.comparison = None;
        self.payoff = None;
        self.refinance = None;
        self.warnings = self.affordability_warnings.clone();
        self.warnings.extend(warnings);
        self.loan = Some(params);
        Ok(self.schedule.insert(result))
    }

    /// DTI using the first payment of the current schedule as the new payment.
    pub fn calculate_dti(
        &mut self,
        monthly_income: Money,
        existing_debts: Money,
    ) -> MortgageResult<&DtiOutput> {
        let (_, schedule) = self.current()?;
        let output = compute_dti(&DtiInput {
            monthly_income,
            existing_debts,
            new_payment: schedule.first_payment(),
        })?;
        Ok(self.dti.insert(output))
    }

    /// Affordability does not depend on the current loan.
    pub fn calculate_affordability(
        &mut self,
        input: &AffordabilityInput,
    ) -> MortgageResult<&AffordabilityOutput> {
        let (output, warnings) = compute_max_loan(input)?;
        let stale = std::mem::replace(&mut self.affordability_warnings, warnings.clone());
        self.warnings.retain(|w| !stale.contains(w));
        self.warnings.extend(warnings);
        Ok(self.affordability.insert(output))
    }

    /// Compare the current loan with another rate, term and extra payment.
    pub fn compare_with(
        &mut self,
        annual_rate_pct: Percent,
        years: u32,
        extra_payment: Money,
    ) -> MortgageResult<&ScenarioComparison> {
        let (loan, _) = self.current()?;
        let alternative = LoanParameters {
            annual_rate_pct,
            years,
            extra_payment,
            ..loan.clone()
        };
        let (output, warnings) = compute_comparison(loan, &alternative)?;
        self.warnings.extend(warnings);
        Ok(self.comparison.insert(output))
    }

    /// Savings from paying `extra_payment` more every period.
    pub fn early_payoff(&mut self, extra_payment: Money) -> MortgageResult<&PayoffComparison> {
        let (loan, _) = self.current()?;
        let (output, warnings) = compute_payoff(loan, extra_payment)?;
        self.warnings.extend(warnings);
        Ok(self.payoff.insert(output))
    }

    /// Break-even of refinancing the balance left after the first payment.
    pub fn refinance(
        &mut self,
        refi_rate_pct: Percent,
        refi_term_years: u32,
        refi_cost: Money,
        start_date: NaiveDate,
    ) -> MortgageResult<&RefinanceOutput> {
        let (loan, schedule) = self.current()?;
        let input = refinance_from_schedule(
            schedule,
            loan.periods_per_year,
            refi_rate_pct,
            refi_term_years,
            refi_cost,
            start_date,
        )?;
        let (output, warnings) = compute_break_even(&input)?;
        self.warnings.extend(warnings);
        Ok(self.refinance.insert(output))
    }

    fn current(&self) -> MortgageResult<(&LoanParameters, &AmortizationResult)> {
        match (&self.loan, &self.schedule) {
            (Some(loan), Some(schedule)) => Ok((loan, schedule)),
            _ => Err(MortgageError::invalid(
                "schedule",
                "Calculate the mortgage before running dependent analyses",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// One-shot session requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtiRequest {
    pub monthly_income: Money,
    pub existing_debts: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub annual_rate_pct: Percent,
    pub years: u32,
    #[serde(default)]
    pub extra_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffRequest {
    pub extra_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceRequest {
    pub refi_rate_pct: Percent,
    pub refi_term_years: u32,
    pub refi_cost: Money,
    /// Defaults to the loan's start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

/// A loan plus any derived analyses to run against it in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub loan: LoanParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dti: Option<DtiRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payoff: Option<PayoffRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinance: Option<RefinanceRequest>,
}

/// Run every analysis the request asks for and return the filled session.
pub fn run_session(
    request: &SessionRequest,
) -> MortgageResult<ComputationOutput<AnalysisSession>> {
    let start = Instant::now();
    let mut session = AnalysisSession::new();

    session.calculate_mortgage(request.loan.clone())?;
    if let Some(dti) = &request.dti {
        session.calculate_dti(dti.monthly_income, dti.existing_debts)?;
    }
    if let Some(afford) = &request.affordability {
        session.calculate_affordability(afford)?;
    }
    if let Some(cmp) = &request.comparison {
        session.compare_with(cmp.annual_rate_pct, cmp.years, cmp.extra_payment)?;
    }
    if let Some(payoff) = &request.payoff {
        session.early_payoff(payoff.extra_payment)?;
    }
    if let Some(refi) = &request.refinance {
        let start_date = refi.start_date.unwrap_or(request.loan.start_date);
        session.refinance(
            refi.refi_rate_pct,
            refi.refi_term_years,
            refi.refi_cost,
            start_date,
        )?;
    }

    let warnings = std::mem::take(&mut session.warnings);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage Analysis Session",
        request,
        warnings,
        elapsed,
        session,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::refinance::BreakEven;
    use crate::borrower::dti::DtiBand;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn loan() -> LoanParameters {
        LoanParameters::new(dec!(300000), dec!(5.5), 30, start())
    }

    #[test]
    fn test_dependent_analysis_requires_schedule() {
        let mut session = AnalysisSession::new();
        let err = session.calculate_dti(dec!(6000), dec!(500)).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { ref field, .. } if field == "schedule"));
        assert!(session.early_payoff(dec!(100)).is_err());
        assert!(session.compare_with(dec!(4.5), 25, dec!(0)).is_err());
    }

    #[test]
    fn test_dti_uses_first_payment() {
        let mut session = AnalysisSession::new();
        session.calculate_mortgage(loan()).unwrap();
        let dti = session.calculate_dti(dec!(6000), dec!(500)).unwrap();
        assert_eq!(dti.dti_pct, dec!(36.72));
        assert_eq!(dti.band, DtiBand::Marginal);
    }

    #[test]
    fn test_recalculation_clears_dependents() {
        let mut session = AnalysisSession::new();
        session.calculate_mortgage(loan()).unwrap();
        session.calculate_dti(dec!(6000), dec!(500)).unwrap();
        session.early_payoff(dec!(200)).unwrap();
        session
            .calculate_affordability(&AffordabilityInput {
                monthly_income: dec!(6000),
                monthly_debts: dec!(500),
                annual_rate_pct: dec!(5.5),
                years: 30,
                dti_limit_pct: dec!(36),
            })
            .unwrap();

        session
            .calculate_mortgage(loan().with_extra_payment(dec!(100)))
            .unwrap();
        assert!(session.dti.is_none());
        assert!(session.payoff.is_none());
        assert!(session.affordability.is_some());
    }

    #[test]
    fn test_recalculation_keeps_affordability_warnings() {
        let mut session = AnalysisSession::new();
        session.calculate_mortgage(loan()).unwrap();
        let exhausted = AffordabilityInput {
            monthly_income: dec!(3000),
            monthly_debts: dec!(2000),
            annual_rate_pct: dec!(5.5),
            years: 30,
            dti_limit_pct: dec!(36),
        };
        session.calculate_affordability(&exhausted).unwrap();
        assert_eq!(session.warnings.len(), 1);

        session
            .calculate_mortgage(loan().with_extra_payment(dec!(500)))
            .unwrap();
        assert_eq!(session.affordability.as_ref().unwrap().max_loan, Decimal::ZERO);
        assert!(session.warnings.iter().any(|w| w.contains("DTI limit")));
        assert!(session.warnings.iter().any(|w| w.contains("Extra payments")));

        // A fresh affordability result replaces the old warning.
        session
            .calculate_affordability(&AffordabilityInput {
                monthly_income: dec!(9000),
                ..exhausted
            })
            .unwrap();
        assert!(!session.warnings.iter().any(|w| w.contains("DTI limit")));
        assert!(session.warnings.iter().any(|w| w.contains("Extra payments")));
    }

    #[test]
    fn test_failed_recalculation_keeps_previous_results() {
        let mut session = AnalysisSession::new();
        session.calculate_mortgage(loan()).unwrap();
        session.calculate_dti(dec!(6000), dec!(500)).unwrap();
        let bad = LoanParameters::new(Decimal::ZERO, dec!(5.5), 30, start());
        assert!(session.calculate_mortgage(bad).is_err());
        assert!(session.dti.is_some());
        assert_eq!(session.loan, Some(loan()));
    }

    #[test]
    fn test_compare_keeps_principal_and_frequency() {
        let mut session = AnalysisSession::new();
        session
            .calculate_mortgage(loan().with_periods_per_year(26))
            .unwrap();
        let cmp = session.compare_with(dec!(4.5), 25, dec!(100)).unwrap();
        assert!(cmp.interest_savings > Decimal::ZERO);
        assert_eq!(cmp.base.periods, 780);
    }

    #[test]
    fn test_run_session_full_request() {
        let request = SessionRequest {
            loan: loan(),
            dti: Some(DtiRequest {
                monthly_income: dec!(6000),
                existing_debts: dec!(500),
            }),
            affordability: Some(AffordabilityInput {
                monthly_income: dec!(80000) / dec!(12),
                monthly_debts: dec!(500),
                annual_rate_pct: dec!(5.5),
                years: 30,
                dti_limit_pct: dec!(36),
            }),
            comparison: Some(ComparisonRequest {
                annual_rate_pct: dec!(4.5),
                years: 25,
                extra_payment: dec!(100),
            }),
            payoff: Some(PayoffRequest {
                extra_payment: dec!(200),
            }),
            refinance: Some(RefinanceRequest {
                refi_rate_pct: dec!(4.0),
                refi_term_years: 30,
                refi_cost: dec!(3000),
                start_date: None,
            }),
        };
        let out = run_session(&request).unwrap();
        assert!(out.warnings.is_empty());
        let session = out.result;
        assert_eq!(session.schedule.as_ref().unwrap().actual_periods, 360);
        assert!(session.dti.is_some());
        assert!(session.affordability.unwrap().max_loan > Decimal::ZERO);
        assert!(session.comparison.is_some());
        assert!(session.payoff.unwrap().months_saved > 0);
        assert!(matches!(
            session.refinance.unwrap().break_even,
            BreakEven::Months(_)
        ));
    }

    #[test]
    fn test_run_session_loan_only_from_json() {
        let request: SessionRequest = serde_json::from_str(
            r#"{"loan": {"principal": "150000", "annual_rate_pct": "6.25", "years": 20, "start_date": "2025-06-01"}}"#,
        )
        .unwrap();
        let out = run_session(&request).unwrap();
        assert_eq!(out.result.schedule.unwrap().actual_periods, 240);
        assert!(out.result.dti.is_none());
    }
}
