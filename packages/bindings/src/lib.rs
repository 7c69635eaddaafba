use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::amortization::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::amortization::generate_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Borrower
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_dti(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::borrower::dti::DtiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::borrower::dti::calculate_dti(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_max_loan(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::borrower::affordability::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::borrower::affordability::calculate_max_loan(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::analysis::scenario::ScenarioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::analysis::scenario::compare_scenarios(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_payoff(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::analysis::payoff::PayoffInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::analysis::payoff::compare_payoff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn break_even_months(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::analysis::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::analysis::refinance::break_even_months(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct LoanRefinanceBindingInput {
    #[serde(flatten)]
    loan: mortgage_core::amortization::LoanParameters,
    refi_rate_pct: rust_decimal::Decimal,
    refi_term_years: u32,
    refi_cost: rust_decimal::Decimal,
}

/// Break-even of refinancing a loan described by its original terms.
#[napi]
pub fn refinance_loan(input_json: String) -> NapiResult<String> {
    let binding_input: LoanRefinanceBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (schedule, _) = mortgage_core::amortization::build_schedule(&binding_input.loan)
        .map_err(to_napi_error)?;
    let input = mortgage_core::analysis::refinance::refinance_from_schedule(
        &schedule,
        binding_input.loan.periods_per_year,
        binding_input.refi_rate_pct,
        binding_input.refi_term_years,
        binding_input.refi_cost,
        binding_input.loan.start_date,
    )
    .map_err(to_napi_error)?;
    let output = mortgage_core::analysis::refinance::break_even_months(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[napi]
pub fn run_session(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::session::SessionRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::session::run_session(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
