use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use mortgage_core::borrower::affordability::{self, AffordabilityInput};
use mortgage_core::borrower::dti::{self, DtiInput};

use crate::input;

/// Arguments for debt-to-income calculation
#[derive(Args)]
pub struct DtiArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Existing monthly debt payments
    #[arg(long, default_value = "0")]
    pub existing_debts: Decimal,

    /// Proposed mortgage payment
    #[arg(long)]
    pub new_payment: Option<Decimal>,
}

pub fn run_dti(args: DtiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dti_input: DtiInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DtiInput {
            monthly_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            existing_debts: args.existing_debts,
            new_payment: args
                .new_payment
                .ok_or("--new-payment is required (or provide --input)")?,
        }
    };

    let result = dti::calculate_dti(&dti_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for maximum affordable loan
#[derive(Args)]
pub struct AffordArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long, conflicts_with = "annual_income")]
    pub monthly_income: Option<Decimal>,

    /// Gross annual income (divided by 12)
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Existing monthly debt payments
    #[arg(long, default_value = "0")]
    pub monthly_debts: Decimal,

    /// Market rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub years: u32,

    /// Lender's DTI limit in percent
    #[arg(long, default_value = "36")]
    pub dti_limit: Decimal,
}

pub fn run_afford(args: AffordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let monthly_income = match (args.monthly_income, args.annual_income) {
            (Some(monthly), _) => monthly,
            (None, Some(annual)) => annual / dec!(12),
            (None, None) => {
                return Err("--monthly-income or --annual-income is required (or provide --input)".into())
            }
        };
        AffordabilityInput {
            monthly_income,
            monthly_debts: args.monthly_debts,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years,
            dti_limit_pct: args.dti_limit,
        }
    };

    let result = affordability::calculate_max_loan(&afford_input)?;
    Ok(serde_json::to_value(result)?)
}
