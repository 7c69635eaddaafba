use clap::Args;
use serde_json::Value;

use mortgage_core::session::{self, SessionRequest};

use crate::input;

/// Arguments for a full analysis session
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML session document
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: SessionRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or stdin required for a full analysis".into());
    };

    log::debug!(
        "analysis session: dti={} affordability={} comparison={} payoff={} refinance={}",
        request.dti.is_some(),
        request.affordability.is_some(),
        request.comparison.is_some(),
        request.payoff.is_some(),
        request.refinance.is_some()
    );

    let result = session::run_session(&request)?;
    Ok(serde_json::to_value(result)?)
}
