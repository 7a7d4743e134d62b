use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::payment_math::derive_payment_terms;
use crate::repayment::payoff::payoff_date;
use crate::types::*;
use crate::LoanResult;

/// Loan terms as captured from the borrower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual rate as a percentage (5 = 5%).
    pub annual_rate_percent: Decimal,
    /// Ignored (forced to 20) for income-driven plans.
    pub term_years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default)]
    pub plan: RepaymentPlan,
    /// Only read by income-driven plans.
    #[serde(default)]
    pub adjusted_gross_income: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// One row of the repayment schedule. Monetary fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: u32,
    pub payment: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub accumulated_principal_paid: Money,
    pub accumulated_interest_paid: Money,
    /// Floored at zero.
    pub remaining_balance: Money,
}

/// Full repayment schedule and its totals (totals at full precision).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub plan: RepaymentPlan,
    pub frequency: PaymentFrequency,
    pub payment: Money,
    pub rate_per_period: Rate,
    /// Term actually used.
    pub term_years: u32,
    pub nominal_periods: u32,
    /// Periods run before the balance reached zero or the term ran out.
    pub elapsed_periods: u32,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
    /// Principal plus total interest.
    pub total_loan_cost: Money,
    /// Balance left when the term ran out (zero when paid off).
    pub outstanding_balance: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    pub periods: Vec<PeriodRecord>,
}

/// Build the period-by-period repayment schedule for a loan.
///
/// Runs until the balance reaches zero or the nominal period count is
/// exhausted. A payment that does not cover interest is not an error: the
/// balance grows for the whole term and a warning is attached.
pub fn build_schedule(
    terms: &LoanTerms,
    config: &EngineConfig,
) -> LoanResult<ComputationOutput<Schedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let derived = derive_payment_terms(
        terms.principal,
        terms.annual_rate_percent,
        terms.term_years,
        terms.frequency,
        terms.plan,
        terms.adjusted_gross_income,
        config,
    )?;
    let rate = derived.rate_per_period;
    let payment = derived.payment;

    if terms.plan == RepaymentPlan::IncomeDriven && terms.term_years != derived.term_years {
        warnings.push(format!(
            "Income-driven plans run over {} years; requested term of {} years ignored",
            derived.term_years, terms.term_years
        ));
    }

    let mut periods = Vec::new();
    let mut balance = terms.principal;
    let mut total_interest_paid = Decimal::ZERO;
    let mut accumulated_principal = Decimal::ZERO;
    let mut elapsed_periods = 0;

    for period in 1..=derived.period_count {
        if balance <= Decimal::ZERO {
            break;
        }

        let interest = balance * rate;
        let principal_portion = payment - interest;
        balance -= principal_portion;

        total_interest_paid += interest;
        accumulated_principal += principal_portion;

        if period == 1 && principal_portion <= Decimal::ZERO {
            tracing::warn!(
                payment = %payment,
                interest = %interest,
                "payment does not cover first period interest"
            );
            warnings.push(format!(
                "Payment of {} does not exceed first-period interest of {}; balance will not decrease",
                payment.round_dp(2),
                interest.round_dp(2)
            ));
        }

        periods.push(PeriodRecord {
            period,
            payment: payment.round_dp(2),
            principal_paid: principal_portion.round_dp(2),
            interest_paid: interest.round_dp(2),
            accumulated_principal_paid: accumulated_principal.round_dp(2),
            accumulated_interest_paid: total_interest_paid.round_dp(2),
            remaining_balance: balance.max(Decimal::ZERO).round_dp(2),
        });
        elapsed_periods = period;

        if balance <= Decimal::ZERO {
            break;
        }
    }

    if terms.principal.is_zero() {
        warnings.push("Principal is zero; schedule is empty".into());
    }

    let outstanding_balance = balance.max(Decimal::ZERO);
    if outstanding_balance.round_dp(2) > Decimal::ZERO {
        let note = match terms.plan {
            RepaymentPlan::IncomeDriven => " (may be eligible for forgiveness)",
            RepaymentPlan::Standard => "",
        };
        warnings.push(format!(
            "Balance of {} remains after {} periods{note}",
            outstanding_balance.round_dp(2),
            elapsed_periods
        ));
    }

    let payoff = match terms.start_date {
        Some(start_date) => Some(payoff_date(start_date, terms.frequency, elapsed_periods)?),
        None => None,
    };

    tracing::debug!(
        elapsed_periods,
        nominal_periods = derived.period_count,
        total_interest = %total_interest_paid,
        "schedule complete"
    );

    let output = Schedule {
        plan: terms.plan,
        frequency: terms.frequency,
        payment,
        rate_per_period: rate,
        term_years: derived.term_years,
        nominal_periods: derived.period_count,
        elapsed_periods,
        total_interest_paid,
        total_principal_paid: accumulated_principal,
        total_loan_cost: terms.principal + total_interest_paid,
        outstanding_balance,
        payoff_date: payoff,
        periods,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-payment amortization schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "term_years": derived.term_years,
            "frequency": terms.frequency,
            "plan": terms.plan,
            "adjusted_gross_income": terms.adjusted_gross_income.to_string(),
            "poverty_line": config.poverty_line.to_string(),
            "prorate_income_driven_payment": config.prorate_income_driven_payment,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_loan() -> LoanTerms {
        LoanTerms {
            principal: dec!(10000),
            annual_rate_percent: dec!(5),
            term_years: 10,
            frequency: PaymentFrequency::Monthly,
            plan: RepaymentPlan::Standard,
            adjusted_gross_income: dec!(50000),
            start_date: None,
        }
    }

    #[test]
    fn test_standard_schedule_pays_off() {
        let result = build_schedule(&standard_loan(), &EngineConfig::default()).unwrap();
        let sched = &result.result;
        assert_eq!(sched.nominal_periods, 120);
        assert_eq!(sched.elapsed_periods, 120);
        assert_eq!(sched.periods.len(), 120);
        assert_eq!(sched.payment.round_dp(2), dec!(106.07));
        assert_eq!(sched.periods.last().unwrap().remaining_balance, dec!(0.00));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_first_period_split() {
        let result = build_schedule(&standard_loan(), &EngineConfig::default()).unwrap();
        let first = &result.result.periods[0];
        assert_eq!(first.period, 1);
        // 10,000 * 0.05 / 12 = 41.666...
        assert_eq!(first.interest_paid, dec!(41.67));
        assert_eq!(first.principal_paid, dec!(64.40));
        assert_eq!(first.remaining_balance, dec!(9935.60));
    }

    #[test]
    fn test_overpaying_income_driven_terminates_early() {
        let mut terms = standard_loan();
        terms.plan = RepaymentPlan::IncomeDriven;
        let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
        let sched = &result.result;
        assert_eq!(sched.nominal_periods, 240);
        assert!(sched.elapsed_periods < 240);
        assert_eq!(sched.periods.len() as u32, sched.elapsed_periods);
        assert_eq!(sched.periods.last().unwrap().remaining_balance, Decimal::ZERO);
        assert_eq!(sched.outstanding_balance, Decimal::ZERO);
    }

    #[test]
    fn test_negative_amortization_runs_full_term() {
        let mut terms = standard_loan();
        terms.plan = RepaymentPlan::IncomeDriven;
        terms.adjusted_gross_income = dec!(15000);
        let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
        let sched = &result.result;
        assert_eq!(sched.payment, Decimal::ZERO);
        assert_eq!(sched.elapsed_periods, 240);
        assert!(sched.outstanding_balance > dec!(10000));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("does not exceed first-period interest")));
    }

    #[test]
    fn test_zero_principal_empty_schedule() {
        let mut terms = standard_loan();
        terms.principal = Decimal::ZERO;
        let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
        assert_eq!(result.result.elapsed_periods, 0);
        assert!(result.result.periods.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_payoff_date_follows_elapsed_periods() {
        let mut terms = standard_loan();
        terms.start_date = NaiveDate::from_ymd_opt(2025, 9, 1);
        let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
        assert_eq!(result.result.payoff_date, NaiveDate::from_ymd_opt(2035, 9, 1));
    }

    #[test]
    fn test_invalid_principal_error() {
        let mut terms = standard_loan();
        terms.principal = dec!(-5);
        assert!(build_schedule(&terms, &EngineConfig::default()).is_err());
    }
}
