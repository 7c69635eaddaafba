mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{CompareArgs, PayoffArgs, RefinanceArgs};
use commands::borrower::{AffordArgs, DtiArgs};
use commands::loan::ScheduleArgs;
use commands::session::AnalyzeArgs;

/// Mortgage amortization and affordability analysis
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage amortization and affordability analysis",
    long_about = "A CLI for mortgage analysis with decimal precision. Generates \
                  amortization schedules and computes debt-to-income, maximum \
                  affordable loan, scenario comparisons, early payoff savings \
                  and refinance break-even."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a payment-by-payment amortization schedule
    Schedule(ScheduleArgs),
    /// Debt-to-income ratio with a proposed payment
    Dti(DtiArgs),
    /// Maximum affordable loan under a DTI limit
    Afford(AffordArgs),
    /// Compare the loan against an alternative rate, term or extra payment
    Compare(CompareArgs),
    /// Months and interest saved by paying extra each period
    Payoff(PayoffArgs),
    /// Refinance break-even point
    Refinance(RefinanceArgs),
    /// Run a full analysis session from one input document
    Analyze(AnalyzeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Dti(args) => commands::borrower::run_dti(args),
        Commands::Afford(args) => commands::borrower::run_afford(args),
        Commands::Compare(args) => commands::analysis::run_compare(args),
        Commands::Payoff(args) => commands::analysis::run_payoff(args),
        Commands::Refinance(args) => commands::analysis::run_refinance(args),
        Commands::Analyze(args) => commands::session::run_analyze(args),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_schedule_flags() {
        let cli = Cli::try_parse_from([
            "mortgage",
            "schedule",
            "--principal",
            "300000",
            "--rate",
            "5.5",
            "--frequency",
            "bi-weekly",
            "--start-date",
            "2024-01-01",
            "--output",
            "table",
        ])
        .unwrap();
        match cli.command {
            Commands::Schedule(args) => {
                let params = args.loan.to_params().unwrap();
                assert_eq!(params.periods_per_year, 26);
                assert_eq!(params.years, 30);
            }
            _ => panic!("expected schedule command"),
        }
        assert!(matches!(cli.output, OutputFormat::Table));
    }

    #[test]
    fn test_missing_principal_reported() {
        let cli = Cli::try_parse_from(["mortgage", "schedule", "--rate", "5.5"]).unwrap();
        match cli.command {
            Commands::Schedule(args) => {
                let err = args.loan.to_params().unwrap_err();
                assert!(err.to_string().contains("--principal"));
            }
            _ => panic!("expected schedule command"),
        }
    }
}
