//! Level-payment amortization schedules.
//!
//! Produces a period-by-period schedule for a fixed-rate loan with optional
//! extra principal each period. Balances and interest accumulate at full
//! `Decimal` precision; only the emitted records are rounded to cents.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::dates::{period_date, DateRoll};
use crate::error::MortgageError;
use crate::time_value::{level_payment, periodic_rate};
use crate::types::{to_cents, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound on nominal periods (100 years of daily payments).
const MAX_PERIODS: u32 = 36_600;

/// Frequencies lenders commonly offer: monthly, bi-weekly, weekly.
const STANDARD_FREQUENCIES: [u32; 3] = [12, 26, 52];

fn default_periods_per_year() -> u32 {
    12
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate mortgage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual rate as a percentage (5.5 = 5.5%).
    pub annual_rate_pct: Percent,
    /// Loan term in whole years.
    pub years: u32,
    /// Payments per year (12 monthly, 26 bi-weekly, 52 weekly).
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    /// Date of the first payment.
    pub start_date: NaiveDate,
    /// Additional principal paid every period.
    #[serde(default)]
    pub extra_payment: Money,
    #[serde(default)]
    pub date_roll: DateRoll,
}

impl LoanParameters {
    /// Monthly loan with no extra payment.
    pub fn new(
        principal: Money,
        annual_rate_pct: Percent,
        years: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            annual_rate_pct,
            years,
            periods_per_year: default_periods_per_year(),
            start_date,
            extra_payment: Decimal::ZERO,
            date_roll: DateRoll::default(),
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: Money) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn with_periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    pub fn with_date_roll(mut self, date_roll: DateRoll) -> Self {
        self.date_roll = date_roll;
        self
    }

    /// Nominal number of payments (`years * periods_per_year`).
    pub fn nominal_periods(&self) -> MortgageResult<u32> {
        self.years
            .checked_mul(self.periods_per_year)
            .filter(|n| *n <= MAX_PERIODS)
            .ok_or_else(|| {
                MortgageError::invalid(
                    "years",
                    format!("Term exceeds the maximum of {MAX_PERIODS} payment periods"),
                )
            })
    }

    fn validate(&self) -> MortgageResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "principal",
                "Loan principal must be positive",
            ));
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "annual_rate_pct",
                "Interest rate cannot be negative",
            ));
        }
        if self.years == 0 {
            return Err(MortgageError::invalid(
                "years",
                "Loan term must be at least 1 year",
            ));
        }
        if self.periods_per_year == 0 {
            return Err(MortgageError::invalid(
                "periods_per_year",
                "Payment frequency must be at least one period per year",
            ));
        }
        if self.extra_payment < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "extra_payment",
                "Extra payment cannot be negative",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One payment in the schedule. Currency fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: NaiveDate,
    /// Period number (1-indexed).
    pub period: u32,
    /// Total paid this period (principal + interest, including extra).
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Balance after this payment, never negative.
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

/// Full schedule plus summary totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub schedule: Vec<PaymentRecord>,
    /// Sum of all interest; equals the last record's cumulative interest.
    pub total_interest: Money,
    /// Nominal annuity payment before any extra payment.
    pub level_payment: Money,
    /// Regular payment including the extra payment.
    pub periodic_payment: Money,
    /// Principal plus total interest.
    pub total_paid: Money,
    pub nominal_periods: u32,
    pub actual_periods: u32,
    /// Whole years to payoff.
    pub payoff_years: u32,
    /// Periods left over after `payoff_years`.
    pub payoff_remainder_periods: u32,
}

impl AmortizationResult {
    /// Payment of the first period, the figure lenders quote.
    pub fn first_payment(&self) -> Money {
        self.schedule
            .first()
            .map(|r| r.payment)
            .unwrap_or(Decimal::ZERO)
    }

    /// Periods cut from the nominal term by extra payments.
    pub fn periods_saved(&self) -> u32 {
        self.nominal_periods.saturating_sub(self.actual_periods)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the amortization schedule for a loan.
pub fn generate_schedule(
    params: &LoanParameters,
) -> MortgageResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let (output, warnings) = build_schedule(params)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization",
        params,
        warnings,
        elapsed,
        output,
    ))
}

/// Schedule without the metadata envelope, for callers that combine runs.
pub fn build_schedule(
    params: &LoanParameters,
) -> MortgageResult<(AmortizationResult, Vec<String>)> {
    params.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    let nominal_periods = params.nominal_periods()?;
    let rate = periodic_rate(params.annual_rate_pct, params.periods_per_year)?;
    let payment = level_payment(params.principal, rate, nominal_periods)?;

    if rate.is_zero() {
        warnings.push("Zero interest rate: principal amortizes in equal installments".into());
    }
    if !STANDARD_FREQUENCIES.contains(&params.periods_per_year) {
        warnings.push(format!(
            "Non-standard payment frequency of {} periods per year",
            params.periods_per_year
        ));
    }
    if params.date_roll == DateRoll::CalendarMonth && params.periods_per_year != 12 {
        warnings.push(format!(
            "Payment dates advance one calendar month per period although {} periods fall in a year",
            params.periods_per_year
        ));
    }

    let mut schedule = Vec::with_capacity(nominal_periods as usize);
    let mut balance = params.principal;
    let mut cumulative_interest = Decimal::ZERO;

    for period in 1..=nominal_periods {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| MortgageError::overflow("periodic interest"))?;
        let mut principal_paid = payment
            .checked_sub(interest)
            .and_then(|v| v.checked_add(params.extra_payment))
            .ok_or_else(|| MortgageError::overflow("principal payment"))?;

        // The last payment retires whatever is left, including sub-cent residue.
        if principal_paid >= balance || period == nominal_periods {
            principal_paid = balance;
        }

        balance -= principal_paid;
        cumulative_interest = cumulative_interest
            .checked_add(interest)
            .ok_or_else(|| MortgageError::overflow("cumulative interest"))?;

        schedule.push(PaymentRecord {
            date: period_date(
                params.start_date,
                params.date_roll,
                params.periods_per_year,
                period - 1,
            )?,
            period,
            payment: to_cents(
                principal_paid
                    .checked_add(interest)
                    .ok_or_else(|| MortgageError::overflow("period payment"))?,
            ),
            principal: to_cents(principal_paid),
            interest: to_cents(interest),
            remaining_balance: to_cents(balance.max(Decimal::ZERO)),
            cumulative_interest: to_cents(cumulative_interest),
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    let actual_periods = schedule.len() as u32;
    if actual_periods < nominal_periods {
        warnings.push(format!(
            "Extra payments retire the loan in {actual_periods} of {nominal_periods} periods"
        ));
    }

    log::debug!(
        "amortized {} at {}% over {} periods ({} paid)",
        params.principal,
        params.annual_rate_pct,
        nominal_periods,
        actual_periods
    );

    let total_interest = to_cents(cumulative_interest);
    let periodic_payment = payment
        .checked_add(params.extra_payment)
        .ok_or_else(|| MortgageError::overflow("periodic payment"))?;
    let total_paid = params
        .principal
        .checked_add(cumulative_interest)
        .ok_or_else(|| MortgageError::overflow("total paid"))?;
    Ok((
        AmortizationResult {
            schedule,
            total_interest,
            level_payment: to_cents(payment),
            periodic_payment: to_cents(periodic_payment),
            total_paid: to_cents(total_paid),
            nominal_periods,
            actual_periods,
            payoff_years: actual_periods / params.periods_per_year,
            payoff_remainder_periods: actual_periods % params.periods_per_year,
        },
        warnings,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
