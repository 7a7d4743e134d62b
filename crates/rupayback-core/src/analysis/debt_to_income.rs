use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::repayment::schedule::PeriodRecord;
use crate::types::Money;
use crate::LoanResult;

/// Debt-to-income ratio at one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtToIncomePoint {
    pub period: u32,
    pub remaining_balance: Money,
    /// `remaining_balance / total_income * 100`, rounded to 2 dp.
    pub ratio_pct: Decimal,
}

/// Remaining balance as a percentage of annual income, period by period.
pub fn debt_to_income_series(
    periods: &[PeriodRecord],
    total_income: Money,
) -> LoanResult<Vec<DebtToIncomePoint>> {
    if total_income <= Decimal::ZERO {
        return Err(LoanError::DivisionByZero {
            context: format!("debt-to-income ratio (total_income = {total_income})"),
        });
    }

    Ok(periods
        .iter()
        .map(|p| DebtToIncomePoint {
            period: p.period,
            remaining_balance: p.remaining_balance,
            ratio_pct: (p.remaining_balance / total_income * dec!(100)).round_dp(2),
        })
        .collect())
}
