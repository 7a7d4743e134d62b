use chrono::{Days, Months, NaiveDate};

use crate::error::LoanError;
use crate::types::PaymentFrequency;
use crate::LoanResult;

/// Date of the last payment when `periods` payments are made from `start`.
///
/// Weekly and bi-weekly cadences step in whole days; monthly steps in
/// calendar months, clamping to the end of shorter months.
pub fn payoff_date(
    start: NaiveDate,
    frequency: PaymentFrequency,
    periods: u32,
) -> LoanResult<NaiveDate> {
    let end = match frequency {
        PaymentFrequency::Weekly => start.checked_add_days(Days::new(7 * u64::from(periods))),
        PaymentFrequency::BiWeekly => start.checked_add_days(Days::new(14 * u64::from(periods))),
        PaymentFrequency::Monthly => start.checked_add_months(Months::new(periods)),
    };
    end.ok_or_else(|| {
        LoanError::DateError(format!(
            "{periods} {} payments from {start} overflow the calendar",
            frequency.label().to_lowercase()
        ))
    })
}
