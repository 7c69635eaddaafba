//! Payment date rolling for amortization schedules.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::MortgageResult;

/// How a schedule moves from one payment date to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRoll {
    /// One calendar month per period whatever the payment frequency.
    #[default]
    CalendarMonth,
    /// Step by the length of one period: whole months when the frequency
    /// divides a year into months, otherwise a fixed number of days
    /// (14 for bi-weekly, 7 for weekly).
    Frequency,
}

/// Date of the payment `offset` periods after `start` (offset 0 is `start`).
///
/// Month steps are always taken from `start`, so a 31st clamps to shorter
/// month ends without drifting earlier in later months.
pub fn period_date(
    start: NaiveDate,
    roll: DateRoll,
    periods_per_year: u32,
    offset: u32,
) -> MortgageResult<NaiveDate> {
    let date = match roll {
        DateRoll::CalendarMonth => start.checked_add_months(Months::new(offset)),
        DateRoll::Frequency => {
            if periods_per_year > 0 && 12 % periods_per_year == 0 {
                let step = 12 / periods_per_year;
                offset
                    .checked_mul(step)
                    .and_then(|m| start.checked_add_months(Months::new(m)))
            } else {
                let days = period_days(periods_per_year, offset);
                start.checked_add_days(Days::new(days))
            }
        }
    };

    date.ok_or_else(|| {
        MortgageError::DateError(format!(
            "payment {offset} after {start} is outside the supported calendar range"
        ))
    })
}

fn period_days(periods_per_year: u32, offset: u32) -> u64 {
    let ppy = u64::from(periods_per_year.max(1));
    let offset = u64::from(offset);
    // Week-based frequencies land on a fixed weekday.
    if 364 % ppy == 0 {
        offset * (364 / ppy)
    } else {
        offset * 365 / ppy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_month_clamps_without_drift() {
        let start = ymd(2024, 1, 31);
        assert_eq!(period_date(start, DateRoll::CalendarMonth, 12, 0).unwrap(), start);
        assert_eq!(
            period_date(start, DateRoll::CalendarMonth, 12, 1).unwrap(),
            ymd(2024, 2, 29)
        );
        assert_eq!(
            period_date(start, DateRoll::CalendarMonth, 12, 2).unwrap(),
            ymd(2024, 3, 31)
        );
    }

    #[test]
    fn test_calendar_month_ignores_frequency() {
        let start = ymd(2024, 1, 15);
        assert_eq!(
            period_date(start, DateRoll::CalendarMonth, 26, 3).unwrap(),
            ymd(2024, 4, 15)
        );
    }

    #[test]
    fn test_frequency_roll_biweekly_and_weekly() {
        let start = ymd(2024, 1, 1);
        assert_eq!(
            period_date(start, DateRoll::Frequency, 26, 2).unwrap(),
            ymd(2024, 1, 29)
        );
        assert_eq!(
            period_date(start, DateRoll::Frequency, 52, 3).unwrap(),
            ymd(2024, 1, 22)
        );
    }

    #[test]
    fn test_frequency_roll_quarterly_uses_months() {
        let start = ymd(2024, 1, 1);
        assert_eq!(
            period_date(start, DateRoll::Frequency, 4, 2).unwrap(),
            ymd(2024, 7, 1)
        );
    }

    #[test]
    fn test_out_of_range_is_date_error() {
        let err = period_date(NaiveDate::MAX, DateRoll::CalendarMonth, 12, 1).unwrap_err();
        assert!(matches!(err, MortgageError::DateError(_)));
    }
}
