use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::refinance::projection::{project_refinance, RefinanceInput};
use crate::repayment::schedule::{build_schedule, LoanTerms};
use crate::types::*;
use crate::LoanResult;

/// Original loan plus the rate and term on offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceComparisonInput {
    pub loan: LoanTerms,
    pub new_annual_rate_percent: Decimal,
    pub new_term_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinanceOutcome {
    Saving,
    Loss,
    BreakEven,
}

/// Balances of both loans at one period index. `None` once a loan has
/// already been paid off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub period: u32,
    pub original_balance: Option<Money>,
    pub refinanced_balance: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub original_payment: Money,
    pub refinanced_payment: Money,
    pub original_total_interest: Money,
    pub refinanced_total_interest: Money,
    pub original_total_cost: Money,
    pub refinanced_total_cost: Money,
    pub original_periods: u32,
    pub refinanced_periods: u32,
    /// `original_total_cost - refinanced_total_cost`; positive means refinancing saves.
    pub savings: Money,
    pub outcome: RefinanceOutcome,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_payoff_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinanced_payoff_date: Option<NaiveDate>,
    pub balance_comparison: Vec<BalancePoint>,
}

/// Classify a cost difference and phrase it for the borrower.
///
/// The outcome follows the exact sign; only the displayed amount is rounded
/// to cents.
pub fn savings_message(savings: Money) -> (RefinanceOutcome, String) {
    let cents = savings.abs().round_dp(2);
    if savings > Decimal::ZERO {
        (
            RefinanceOutcome::Saving,
            format!("You would save ${:.2} by refinancing.", cents),
        )
    } else if savings < Decimal::ZERO {
        (
            RefinanceOutcome::Loss,
            format!("You would lose ${:.2} by refinancing.", cents),
        )
    } else {
        (
            RefinanceOutcome::BreakEven,
            "Refinancing would neither save nor cost you anything.".to_string(),
        )
    }
}

/// Compare the original loan against the same principal refinanced at a new
/// rate and term. Frequency, plan and income carry over from the original.
pub fn compare_refinance(
    input: &RefinanceComparisonInput,
    config: &EngineConfig,
) -> LoanResult<ComputationOutput<RefinanceComparison>> {
    let start = Instant::now();
    let loan = &input.loan;

    let original = build_schedule(loan, config)?;
    let refinanced = project_refinance(
        &RefinanceInput {
            principal: loan.principal,
            new_annual_rate_percent: input.new_annual_rate_percent,
            new_term_years: input.new_term_years,
            frequency: loan.frequency,
            plan: loan.plan,
            adjusted_gross_income: loan.adjusted_gross_income,
            start_date: loan.start_date,
        },
        config,
    )?;

    let mut warnings: Vec<String> = Vec::new();
    warnings.extend(original.warnings.iter().map(|w| format!("original: {w}")));
    warnings.extend(refinanced.warnings.iter().map(|w| format!("refinanced: {w}")));

    let orig = &original.result;
    let refi = &refinanced.result;

    let savings = orig.total_loan_cost - refi.total_loan_cost;
    let (outcome, message) = savings_message(savings);

    let span = orig.elapsed_periods.max(refi.elapsed_periods);
    let balance_comparison = (1..=span)
        .map(|period| {
            let idx = period as usize - 1;
            BalancePoint {
                period,
                original_balance: orig.periods.get(idx).map(|p| p.remaining_balance),
                refinanced_balance: refi.balances.get(idx).copied(),
            }
        })
        .collect();

    tracing::debug!(savings = %savings, ?outcome, "refinance comparison complete");

    let output = RefinanceComparison {
        original_payment: orig.payment,
        refinanced_payment: refi.payment,
        original_total_interest: orig.total_interest_paid,
        refinanced_total_interest: refi.total_interest_paid,
        original_total_cost: orig.total_loan_cost,
        refinanced_total_cost: refi.total_loan_cost,
        original_periods: orig.elapsed_periods,
        refinanced_periods: refi.elapsed_periods,
        savings,
        outcome,
        message,
        original_payoff_date: orig.payoff_date,
        refinanced_payoff_date: refi.payoff_date,
        balance_comparison,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Original vs refinanced total cost comparison",
        &serde_json::json!({
            "principal": loan.principal.to_string(),
            "original_rate_percent": loan.annual_rate_percent.to_string(),
            "original_term_years": orig.term_years,
            "new_rate_percent": input.new_annual_rate_percent.to_string(),
            "new_term_years": refi.term_years,
            "frequency": loan.frequency,
            "plan": loan.plan,
        }),
        warnings,
        elapsed,
        output,
    ))
}
