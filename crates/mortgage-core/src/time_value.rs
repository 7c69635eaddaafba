use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

/// Convert an annual percentage into a per-period decimal rate.
pub fn periodic_rate(annual_rate_pct: Percent, periods_per_year: u32) -> MortgageResult<Rate> {
    if periods_per_year == 0 {
        return Err(MortgageError::invalid(
            "periods_per_year",
            "Payment frequency must be at least one period per year",
        ));
    }
    Ok(annual_rate_pct / dec!(100) / Decimal::from(periods_per_year))
}

/// Compounding factor (1 + r)^n
pub fn growth_factor(rate: Rate, nper: u32) -> MortgageResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            MortgageError::ComputationError(format!(
                "(1 + {rate})^{nper} overflows decimal precision"
            ))
        })
}

/// Level payment that retires `principal` over `nper` periods.
///
/// Uses `P * r / (1 - (1+r)^-n)`. A zero rate amortizes linearly.
pub fn level_payment(principal: Money, rate: Rate, nper: u32) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::invalid("rate", "Rate cannot be negative"));
    }

    if rate.is_zero() {
        return principal
            .checked_div(Decimal::from(nper))
            .ok_or_else(|| MortgageError::overflow("level payment"));
    }

    let factor = growth_factor(rate, nper)?;
    let denominator = Decimal::ONE - Decimal::ONE / factor;
    if denominator <= Decimal::ZERO {
        return Err(MortgageError::ComputationError(format!(
            "annuity denominator vanished for rate {rate} over {nper} periods"
        )));
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| MortgageError::overflow("level payment"))
}

/// Present value of `nper` level payments of `payment` discounted at `rate`.
pub fn annuity_present_value(payment: Money, rate: Rate, nper: u32) -> MortgageResult<Money> {
    if rate < Decimal::ZERO {
        return Err(MortgageError::invalid("rate", "Rate cannot be negative"));
    }

    if rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(nper))
            .ok_or_else(|| MortgageError::overflow("annuity present value"));
    }

    let factor = growth_factor(rate, nper)?;
    if factor.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "PV discount factor".into(),
        });
    }

    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / rate;
    payment
        .checked_mul(annuity_factor)
        .ok_or_else(|| MortgageError::overflow("annuity present value"))
}
