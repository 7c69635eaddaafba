use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::analysis::payoff::{self, PayoffInput};
use mortgage_core::analysis::refinance::{self, RefinanceInput};
use mortgage_core::analysis::scenario::{self, ScenarioInput};
use mortgage_core::amortization::LoanParameters;

use super::loan::{Frequency, LoanArgs};
use crate::input;

/// Arguments for scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Alternative annual rate in percent
    #[arg(long)]
    pub alt_rate: Option<Decimal>,

    /// Alternative term in years
    #[arg(long)]
    pub alt_years: Option<u32>,

    /// Alternative extra payment per period
    #[arg(long)]
    pub alt_extra_payment: Option<Decimal>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario_input: ScenarioInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let base = args.loan.to_params()?;
        let alternative = LoanParameters {
            annual_rate_pct: args.alt_rate.unwrap_or(base.annual_rate_pct),
            years: args.alt_years.unwrap_or(base.years),
            extra_payment: args.alt_extra_payment.unwrap_or(base.extra_payment),
            ..base.clone()
        };
        ScenarioInput { base, alternative }
    };

    let result = scenario::compare_scenarios(&scenario_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for early payoff analysis
#[derive(Args)]
pub struct PayoffArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Additional payment per period on top of --extra-payment
    #[arg(long)]
    pub additional_payment: Option<Decimal>,
}

pub fn run_payoff(args: PayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payoff_input: PayoffInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PayoffInput {
            loan: args.loan.to_params()?,
            extra_payment: args
                .additional_payment
                .ok_or("--additional-payment is required (or provide --input)")?,
        }
    };

    let result = payoff::compare_payoff(&payoff_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for refinance break-even
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Payment on the existing loan
    #[arg(long)]
    pub current_payment: Option<Decimal>,

    /// Balance to refinance
    #[arg(long)]
    pub remaining_balance: Option<Decimal>,

    /// Refinance rate in percent
    #[arg(long)]
    pub refi_rate: Option<Decimal>,

    /// Refinance term in years
    #[arg(long, default_value_t = 30)]
    pub refi_term: u32,

    /// Closing costs of the refinance
    #[arg(long, default_value = "0")]
    pub refi_cost: Decimal,

    /// Payment frequency of the new loan
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: Frequency,

    /// First payment date of the new loan (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RefinanceInput {
            current_payment: args
                .current_payment
                .ok_or("--current-payment is required (or provide --input)")?,
            remaining_balance: args
                .remaining_balance
                .ok_or("--remaining-balance is required (or provide --input)")?,
            refi_rate_pct: args
                .refi_rate
                .ok_or("--refi-rate is required (or provide --input)")?,
            refi_term_years: args.refi_term,
            refi_cost: args.refi_cost,
            periods_per_year: args.frequency.periods_per_year(),
            start_date: args
                .start_date
                .unwrap_or_else(|| Local::now().date_naive()),
        }
    };

    let result = refinance::break_even_months(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}
