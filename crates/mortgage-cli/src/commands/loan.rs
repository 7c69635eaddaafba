use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization::{self, DateRoll, LoanParameters};

use crate::input;

/// Payment frequency presets
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Frequency {
    /// 12 payments per year
    Monthly,
    /// 26 payments per year
    BiWeekly,
    /// 52 payments per year
    Weekly,
}

impl Frequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::BiWeekly => 26,
            Frequency::Weekly => 52,
        }
    }
}

/// How payment dates advance between periods
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RollArg {
    /// One calendar month per period
    CalendarMonth,
    /// One period length (14 days bi-weekly, 7 days weekly)
    Frequency,
}

impl From<RollArg> for DateRoll {
    fn from(roll: RollArg) -> Self {
        match roll {
            RollArg::CalendarMonth => DateRoll::CalendarMonth,
            RollArg::Frequency => DateRoll::Frequency,
        }
    }
}

/// Loan terms shared by every command that builds a schedule
#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub years: u32,

    /// Payment frequency
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: Frequency,

    /// Custom number of payments per year (overrides --frequency)
    #[arg(long)]
    pub periods_per_year: Option<u32>,

    /// First payment date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Extra principal paid every period
    #[arg(long, default_value = "0")]
    pub extra_payment: Decimal,

    /// Payment date rolling convention
    #[arg(long, value_enum, default_value = "calendar-month")]
    pub date_roll: RollArg,
}

impl LoanArgs {
    pub fn to_params(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let start_date = self
            .start_date
            .unwrap_or_else(|| Local::now().date_naive());

        Ok(LoanParameters::new(principal, rate, self.years, start_date)
            .with_periods_per_year(
                self.periods_per_year
                    .unwrap_or_else(|| self.frequency.periods_per_year()),
            )
            .with_extra_payment(self.extra_payment)
            .with_date_roll(self.date_roll.into()))
    }
}

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Omit the period-by-period rows and print only the totals
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.loan.to_params()?
    };

    let result = amortization::generate_schedule(&params)?;
    let mut value = serde_json::to_value(result)?;
    if args.summary_only {
        if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
            result.remove("schedule");
        }
    }
    Ok(value)
}
