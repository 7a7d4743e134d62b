use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::LoanError;
use crate::types::{Money, PaymentFrequency, Rate, RepaymentPlan};
use crate::LoanResult;

/// Income-driven plans always run over this many years.
pub const INCOME_DRIVEN_TERM_YEARS: u32 = 20;

/// Share of discretionary income charged per year under income-driven plans.
const DISCRETIONARY_SHARE: Decimal = dec!(0.10);

/// Income above this multiple of the poverty line is discretionary.
const POVERTY_LINE_MULTIPLIER: Decimal = dec!(1.5);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Payments per year for a frequency.
pub fn periods_per_year(frequency: PaymentFrequency) -> u32 {
    match frequency {
        PaymentFrequency::Weekly => 52,
        PaymentFrequency::BiWeekly => 26,
        PaymentFrequency::Monthly => 12,
    }
}

/// Convert an annual percentage (5 = 5%) into a per-period decimal rate.
pub fn per_period_rate(annual_rate_percent: Decimal, frequency: PaymentFrequency) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(periods_per_year(frequency))
}

/// Longest term accepted, in years. Keeps the period loop bounded at
/// `52 * MAX_TERM_YEARS` iterations.
pub const MAX_TERM_YEARS: u32 = 100;

/// Number of payments over the term.
pub fn period_count(frequency: PaymentFrequency, term_years: u32) -> LoanResult<u32> {
    if term_years == 0 {
        return Err(LoanError::InvalidTerm {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if term_years > MAX_TERM_YEARS {
        return Err(LoanError::InvalidTerm {
            field: "term_years".into(),
            reason: format!("Term of {term_years} years exceeds the maximum of {MAX_TERM_YEARS}"),
        });
    }
    Ok(periods_per_year(frequency) * term_years)
}

/// Constant payment that amortises `principal` to zero over `nper` periods.
///
/// Equivalent to `PMT(rate, nper, -principal)`, computed as
/// `principal * r / (1 - (1 + r)^-n)` so no intermediate exceeds
/// `principal * r`. Collapses to `principal / nper` when the rate is zero.
pub fn fixed_annuity_payment(rate: Rate, nper: u32, principal: Money) -> LoanResult<Money> {
    if nper == 0 {
        return Err(LoanError::InvalidTerm {
            field: "period_count".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let out_of_range = || LoanError::RateOutOfRange {
        field: "rate_per_period".into(),
        value: rate,
        reason: format!("payment on {principal} over {nper} periods is not representable"),
    };

    // (1 + r)^-n as (1 / (1 + r))^n: stays in [0, 1] and underflows to zero
    // instead of overflowing.
    let discount = (Decimal::ONE / (Decimal::ONE + rate))
        .checked_powu(u64::from(nper))
        .ok_or_else(out_of_range)?;
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(denominator))
        .ok_or_else(out_of_range)
}

/// AGI above 1.5x the poverty line, floored at zero.
pub fn discretionary_income(agi: Money, poverty_line: Money) -> Money {
    (agi - POVERTY_LINE_MULTIPLIER * poverty_line).max(Decimal::ZERO)
}

/// Monthly income-driven payment: 10% of discretionary income, spread over
/// twelve months.
pub fn income_driven_monthly_payment(agi: Money, poverty_line: Money) -> Money {
    let discretionary = discretionary_income(agi, poverty_line);
    (DISCRETIONARY_SHARE * discretionary / MONTHS_PER_YEAR).max(Decimal::ZERO)
}

/// Reject rates whose balances or interest totals would leave the Decimal
/// range inside the period loop.
///
/// While the payment covers the first period's interest the balance only
/// falls, so interest is bounded by `principal * r` per period. Otherwise the
/// balance can compound for the whole term.
fn ensure_balance_representable(
    principal: Money,
    rate: Rate,
    nper: u32,
    payment: Money,
    annual_rate_percent: Decimal,
) -> LoanResult<()> {
    let out_of_range = |reason: &str| LoanError::RateOutOfRange {
        field: "annual_rate_percent".into(),
        value: annual_rate_percent,
        reason: reason.to_string(),
    };

    let first_interest = principal
        .checked_mul(rate)
        .ok_or_else(|| out_of_range("first-period interest is not representable"))?;

    let peak_balance = if payment < first_interest {
        (Decimal::ONE + rate)
            .checked_powu(u64::from(nper))
            .and_then(|growth| growth.checked_mul(principal))
            .ok_or_else(|| {
                out_of_range("payment does not cover interest and the balance would compound past the representable range")
            })?
    } else {
        principal
    };

    peak_balance
        .checked_mul(rate)
        .and_then(|interest| interest.checked_mul(Decimal::from(nper)))
        .ok_or_else(|| out_of_range("total interest over the term is not representable"))?;
    Ok(())
}

/// Everything the period loop needs, derived once from the raw inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Term actually used (20 for income-driven plans).
    pub term_years: u32,
    pub periods_per_year: u32,
    pub period_count: u32,
    pub rate_per_period: Rate,
    pub payment: Money,
}

/// Validate the raw inputs and derive payment, rate and period count.
///
/// Shared by the scheduler and the refinance projector so both apply the same
/// plan override and validation before any iteration starts.
pub fn derive_payment_terms(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    frequency: PaymentFrequency,
    plan: RepaymentPlan,
    agi: Money,
    config: &EngineConfig,
) -> LoanResult<PaymentTerms> {
    config.validate()?;
    if principal < Decimal::ZERO {
        return Err(LoanError::InvalidPrincipal { value: principal });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::InvalidRate {
            field: "annual_rate_percent".into(),
            value: annual_rate_percent,
        });
    }
    if agi < Decimal::ZERO {
        return Err(LoanError::InvalidIncome {
            field: "adjusted_gross_income".into(),
            value: agi,
        });
    }

    let term_years = match plan {
        RepaymentPlan::IncomeDriven => INCOME_DRIVEN_TERM_YEARS,
        RepaymentPlan::Standard => term_years,
    };
    let nper = period_count(frequency, term_years)?;
    let rate = per_period_rate(annual_rate_percent, frequency);

    let payment = match plan {
        RepaymentPlan::IncomeDriven => {
            let monthly = income_driven_monthly_payment(agi, config.poverty_line);
            if config.prorate_income_driven_payment {
                monthly * MONTHS_PER_YEAR / Decimal::from(periods_per_year(frequency))
            } else {
                monthly
            }
        }
        RepaymentPlan::Standard => fixed_annuity_payment(rate, nper, principal)?,
    };

    ensure_balance_representable(principal, rate, nper, payment, annual_rate_percent)?;

    tracing::debug!(
        %plan,
        %frequency,
        term_years,
        period_count = nper,
        rate_per_period = %rate,
        payment = %payment,
        "derived payment terms"
    );

    Ok(PaymentTerms {
        term_years,
        periods_per_year: periods_per_year(frequency),
        period_count: nper,
        rate_per_period: rate,
        payment,
    })
}
