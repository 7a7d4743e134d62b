use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::Money;
use crate::LoanResult;

/// Split of total loan cost into principal and interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub total_cost: Money,
    pub principal_pct: Decimal,
    pub interest_pct: Decimal,
}

pub fn cost_breakdown(principal: Money, total_interest: Money) -> LoanResult<CostBreakdown> {
    let total_cost = principal + total_interest;
    if total_cost <= Decimal::ZERO {
        return Err(LoanError::DivisionByZero {
            context: "cost breakdown (total cost is zero)".into(),
        });
    }

    Ok(CostBreakdown {
        principal,
        interest: total_interest,
        total_cost,
        principal_pct: (principal / total_cost * dec!(100)).round_dp(2),
        interest_pct: (total_interest / total_cost * dec!(100)).round_dp(2),
    })
}
