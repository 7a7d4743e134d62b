use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rupayback_core::refinance::comparison::{self, RefinanceComparisonInput};
use rupayback_core::refinance::projection::{self, RefinanceInput};
use rupayback_core::{EngineConfig, PaymentFrequency, RepaymentPlan};

use super::{resolve_input, LoanArgs};

/// Arguments for a standalone refinance projection
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal being refinanced
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// New annual interest rate in percent
    #[arg(long, default_value = "3.0")]
    pub new_rate: Decimal,

    /// New term in years (ignored for income-driven plans)
    #[arg(long, default_value_t = 10)]
    pub new_term_years: u32,

    /// Payment frequency: Monthly, Bi-weekly or Weekly
    #[arg(long, default_value = "Monthly")]
    pub frequency: PaymentFrequency,

    /// Repayment plan: Standard or Income-driven
    #[arg(long, default_value = "Standard")]
    pub plan: RepaymentPlan,

    /// Adjusted gross income (income-driven plans)
    #[arg(long, default_value = "0")]
    pub agi: Decimal,

    /// First payment date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_refinance(
    args: RefinanceArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = resolve_input(args.input.as_deref(), || {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        Ok(RefinanceInput {
            principal,
            new_annual_rate_percent: args.new_rate,
            new_term_years: args.new_term_years,
            frequency: args.frequency,
            plan: args.plan,
            adjusted_gross_income: args.agi,
            start_date: args.start_date,
        })
    })?;
    let result = projection::project_refinance(&refi_input, config)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for comparing the original loan with a refinanced one
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// New annual interest rate in percent
    #[arg(long, default_value = "3.0")]
    pub new_rate: Decimal,

    /// New term in years
    #[arg(long, default_value_t = 10)]
    pub new_term_years: u32,
}

pub fn run_compare(
    args: CompareArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: RefinanceComparisonInput = resolve_input(args.input.as_deref(), || {
        Ok(RefinanceComparisonInput {
            loan: args.loan.to_terms()?,
            new_annual_rate_percent: args.new_rate,
            new_term_years: args.new_term_years,
        })
    })?;
    let result = comparison::compare_refinance(&cmp_input, config)?;
    Ok(serde_json::to_value(result)?)
}
