use chrono::NaiveDate;
use mortgage_core::amortization::{generate_schedule, DateRoll, LoanParameters};
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn reference_loan() -> LoanParameters {
    LoanParameters::new(dec!(300000), dec!(5.5), 30, start())
}

// ===========================================================================
// Reference loan: 300k @ 5.5% over 30 years, monthly
// ===========================================================================

#[test]
fn test_reference_loan_payment_and_length() {
    let out = generate_schedule(&reference_loan()).unwrap();
    let result = out.result;
    assert_eq!(result.first_payment(), dec!(1703.37));
    assert_eq!(result.schedule.len(), 360);
    assert_eq!(result.nominal_periods, 360);
    assert_eq!(result.payoff_years, 30);
    assert_eq!(result.payoff_remainder_periods, 0);
}

#[test]
fn test_reference_loan_total_interest() {
    let result = generate_schedule(&reference_loan()).unwrap().result;
    assert!(
        (result.total_interest - dec!(313212)).abs() < dec!(1),
        "Expected total interest ~313,212, got {}",
        result.total_interest
    );
    let last = result.schedule.last().unwrap();
    assert_eq!(last.cumulative_interest, result.total_interest);
    assert_eq!(last.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_reference_loan_with_extra_500() {
    let base = generate_schedule(&reference_loan()).unwrap().result;
    let accelerated = generate_schedule(&reference_loan().with_extra_payment(dec!(500)))
        .unwrap();
    assert!(accelerated.result.schedule.len() < 360);
    assert!(accelerated.result.total_interest < base.total_interest);
    assert!(accelerated
        .warnings
        .iter()
        .any(|w| w.contains("Extra payments retire the loan")));
}

#[test]
fn test_schedule_dates_advance_monthly() {
    let result = generate_schedule(&reference_loan()).unwrap().result;
    assert_eq!(result.schedule[0].date, start());
    assert_eq!(
        result.schedule[11].date,
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    );
    assert_eq!(
        result.schedule[359].date,
        NaiveDate::from_ymd_opt(2053, 12, 1).unwrap()
    );
}

#[test]
fn test_period_indices_contiguous() {
    let result = generate_schedule(&reference_loan().with_extra_payment(dec!(150)))
        .unwrap()
        .result;
    for (i, rec) in result.schedule.iter().enumerate() {
        assert_eq!(rec.period, i as u32 + 1);
    }
}

// ===========================================================================
// Properties across a spread of loans
// ===========================================================================

fn loan_grid() -> Vec<LoanParameters> {
    let mut loans = Vec::new();
    for (principal, rate, years) in [
        (dec!(50000), dec!(3.25), 10),
        (dec!(180000), dec!(6.875), 15),
        (dec!(425000), dec!(7.1), 30),
        (dec!(1200000), dec!(4.0), 40),
    ] {
        for ppy in [12, 26, 52] {
            loans.push(LoanParameters::new(principal, rate, years, start()).with_periods_per_year(ppy));
        }
    }
    loans
}

#[test]
fn test_principal_portions_sum_to_loan() {
    for params in loan_grid() {
        let result = generate_schedule(&params).unwrap().result;
        let total: Decimal = result.schedule.iter().map(|r| r.principal).sum();
        let tol = dec!(0.01) * Decimal::from(result.schedule.len() as u32);
        assert!(
            (total - params.principal).abs() <= tol,
            "principal sum {} vs {} for {:?}",
            total,
            params.principal,
            params
        );
    }
}

#[test]
fn test_balance_monotone_and_ends_at_zero() {
    for params in loan_grid() {
        let result = generate_schedule(&params.clone().with_extra_payment(dec!(75)))
            .unwrap()
            .result;
        for pair in result.schedule.windows(2) {
            assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
            assert!(pair[1].remaining_balance >= Decimal::ZERO);
        }
        assert_eq!(
            result.schedule.last().unwrap().remaining_balance,
            Decimal::ZERO
        );
    }
}

#[test]
fn test_total_interest_matches_record_sum() {
    for params in loan_grid() {
        let result = generate_schedule(&params).unwrap().result;
        let summed: Decimal = result.schedule.iter().map(|r| r.interest).sum();
        let tol = dec!(0.01) * Decimal::from(result.schedule.len() as u32);
        assert!((summed - result.total_interest).abs() <= tol);
    }
}

#[test]
fn test_generate_is_pure() {
    let params = reference_loan()
        .with_periods_per_year(26)
        .with_date_roll(DateRoll::Frequency)
        .with_extra_payment(dec!(40));
    let a = generate_schedule(&params).unwrap().result;
    let b = generate_schedule(&params).unwrap().result;
    assert_eq!(a, b);
}

#[test]
fn test_weekly_frequency_roll_dates() {
    let params = reference_loan()
        .with_periods_per_year(52)
        .with_date_roll(DateRoll::Frequency);
    let result = generate_schedule(&params).unwrap().result;
    assert_eq!(result.schedule.len(), 1560);
    assert_eq!(
        result.schedule[52].date,
        NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
    );
}

#[test]
fn test_zero_rate_branch() {
    let params = LoanParameters::new(dec!(90000), Decimal::ZERO, 15, start());
    let out = generate_schedule(&params).unwrap();
    assert_eq!(out.result.total_interest, Decimal::ZERO);
    assert_eq!(out.result.first_payment(), dec!(500));
    assert_eq!(out.result.schedule.len(), 180);
}

#[test]
fn test_invalid_principal_is_invalid_input() {
    let params = LoanParameters::new(dec!(-1), dec!(5), 30, start());
    match generate_schedule(&params) {
        Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
        other => panic!("expected InvalidInput, got {:?}", other.map(|o| o.result.total_interest)),
    }
}

#[test]
fn test_overflowing_extra_payment_is_computation_error() {
    let params = LoanParameters::new(dec!(1000), dec!(5), 1, start())
        .with_extra_payment(Decimal::MAX);
    match generate_schedule(&params) {
        Err(MortgageError::ComputationError(_)) => {}
        other => panic!("expected ComputationError, got {:?}", other.map(|o| o.result.total_interest)),
    }
}

#[test]
fn test_envelope_serializes() {
    let out = generate_schedule(&reference_loan()).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["schedule"].as_array().unwrap().len(), 360);
    assert_eq!(json["result"]["schedule"][0]["date"], "2024-01-01");
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
}
