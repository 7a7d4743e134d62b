//! Figures derived from a finished schedule for charting: debt-to-income
//! over time and the principal/interest split of total cost.

pub mod cost_breakdown;
pub mod debt_to_income;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::repayment::schedule::{build_schedule, LoanTerms, Schedule};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanResult;

use cost_breakdown::{cost_breakdown, CostBreakdown};
use debt_to_income::{debt_to_income_series, DebtToIncomePoint};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysisInput {
    pub loan: LoanTerms,
    /// Annual income used as the debt-to-income denominator.
    pub total_income: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub schedule: Schedule,
    pub debt_to_income: Vec<DebtToIncomePoint>,
    pub cost_breakdown: CostBreakdown,
    /// Highest ratio over the life of the loan (after the first payment).
    pub peak_debt_to_income_pct: Decimal,
}

/// Build the schedule and every chart series derived from it.
pub fn analyze_loan(
    input: &LoanAnalysisInput,
    config: &EngineConfig,
) -> LoanResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();

    let scheduled = build_schedule(&input.loan, config)?;
    let schedule = scheduled.result;
    let dti = debt_to_income_series(&schedule.periods, input.total_income)?;
    let breakdown = cost_breakdown(input.loan.principal, schedule.total_interest_paid)?;
    let peak = dti
        .iter()
        .map(|p| p.ratio_pct)
        .max()
        .unwrap_or(Decimal::ZERO);

    let output = LoanAnalysis {
        schedule,
        debt_to_income: dti,
        cost_breakdown: breakdown,
        peak_debt_to_income_pct: peak,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization schedule with debt-to-income and cost breakdown",
        &serde_json::json!({
            "loan": scheduled.assumptions,
            "total_income": input.total_income.to_string(),
        }),
        scheduled.warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentFrequency, RepaymentPlan};
    use rust_decimal_macros::dec;

    #[test]
    fn test_analysis_combines_series() {
        let input = LoanAnalysisInput {
            loan: LoanTerms {
                principal: dec!(10000),
                annual_rate_percent: dec!(5),
                term_years: 10,
                frequency: PaymentFrequency::Monthly,
                plan: RepaymentPlan::Standard,
                adjusted_gross_income: dec!(50000),
                start_date: None,
            },
            total_income: dec!(50000),
        };
        let result = analyze_loan(&input, &EngineConfig::default()).unwrap();
        let a = &result.result;
        assert_eq!(a.debt_to_income.len(), a.schedule.periods.len());
        // First remaining balance 9935.60 / 50,000 = 19.87%
        assert_eq!(a.peak_debt_to_income_pct, dec!(19.87));
        let total_pct = a.cost_breakdown.principal_pct + a.cost_breakdown.interest_pct;
        assert!((total_pct - dec!(100)).abs() <= dec!(0.01));
    }
}
