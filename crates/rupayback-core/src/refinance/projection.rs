use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::payment_math::derive_payment_terms;
use crate::repayment::payoff::payoff_date;
use crate::types::*;
use crate::LoanResult;

/// Input for projecting the same principal under new refinance terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub principal: Money,
    /// New annual rate as a percentage (3 = 3%).
    pub new_annual_rate_percent: Decimal,
    pub new_term_years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default)]
    pub plan: RepaymentPlan,
    #[serde(default)]
    pub adjusted_gross_income: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Totals and balance trajectory of a refinanced loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceProjection {
    pub payment: Money,
    pub term_years: u32,
    pub nominal_periods: u32,
    pub elapsed_periods: u32,
    pub total_interest_paid: Money,
    pub total_loan_cost: Money,
    /// Balance before each elapsed period's payment: `balances[0]` is the
    /// principal and `balances.len() == elapsed_periods`.
    pub balances: Vec<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
}

/// Project the balance trajectory of a refinanced loan.
///
/// Payment and period count are derived exactly as for the original
/// schedule. Only balances are tracked, no per-period rows.
pub fn project_refinance(
    input: &RefinanceInput,
    config: &EngineConfig,
) -> LoanResult<ComputationOutput<RefinanceProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let derived = derive_payment_terms(
        input.principal,
        input.new_annual_rate_percent,
        input.new_term_years,
        input.frequency,
        input.plan,
        input.adjusted_gross_income,
        config,
    )?;
    let rate = derived.rate_per_period;
    let payment = derived.payment;

    // trajectory[0] is the opening principal; trajectory[k] is the balance
    // after period k, clamped to zero on the payoff period.
    let mut trajectory: Vec<Money> = Vec::new();
    trajectory.push(input.principal);
    let mut total_interest_paid = Decimal::ZERO;
    let mut elapsed_periods: u32 = 0;

    for period in 1..=derived.period_count {
        let opening = trajectory[period as usize - 1];
        if opening <= Decimal::ZERO {
            break;
        }

        let interest = opening * rate;
        total_interest_paid += interest;
        let closing = opening - (payment - interest);
        elapsed_periods = period;

        if closing <= Decimal::ZERO {
            trajectory.push(Decimal::ZERO);
            break;
        }
        trajectory.push(closing);
    }

    let outstanding = trajectory[elapsed_periods as usize];
    if outstanding.round_dp(2) > Decimal::ZERO {
        warnings.push(format!(
            "Refinanced balance of {} remains after {} periods",
            outstanding.round_dp(2),
            elapsed_periods
        ));
    }
    if elapsed_periods > 0 && trajectory[1] >= trajectory[0] {
        tracing::warn!(payment = %payment, "refinanced payment does not reduce the balance");
        warnings.push("Refinanced payment does not reduce the balance".into());
    }

    // Drop the closing entry so the series holds one pre-payment balance per
    // elapsed period and lines up with the original schedule's period axis.
    trajectory.truncate(elapsed_periods as usize);
    let balances = trajectory;

    let payoff = match input.start_date {
        Some(start_date) => Some(payoff_date(start_date, input.frequency, elapsed_periods)?),
        None => None,
    };

    tracing::debug!(
        elapsed_periods,
        total_interest = %total_interest_paid,
        "refinance projection complete"
    );

    let output = RefinanceProjection {
        payment,
        term_years: derived.term_years,
        nominal_periods: derived.period_count,
        elapsed_periods,
        total_interest_paid,
        total_loan_cost: input.principal + total_interest_paid,
        balances,
        payoff_date: payoff,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance balance projection",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "new_annual_rate_percent": input.new_annual_rate_percent.to_string(),
            "term_years": derived.term_years,
            "frequency": input.frequency,
            "plan": input.plan,
            "poverty_line": config.poverty_line.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
