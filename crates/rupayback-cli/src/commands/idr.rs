use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rupayback_core::payment_math::{discretionary_income, income_driven_monthly_payment};
use rupayback_core::EngineConfig;

/// Arguments for the income-driven payment calculation
#[derive(Args)]
pub struct IdrPaymentArgs {
    /// Adjusted gross income
    #[arg(long)]
    pub agi: Decimal,
}

pub fn run_idr_payment(
    args: IdrPaymentArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    config.validate()?;
    if args.agi < Decimal::ZERO {
        return Err(format!("--agi must not be negative (got {})", args.agi).into());
    }

    let monthly = income_driven_monthly_payment(args.agi, config.poverty_line);
    Ok(json!({
        "result": {
            "monthly_payment": monthly.round_dp(2).to_string(),
            "annual_payment": (monthly * Decimal::from(12)).round_dp(2).to_string(),
            "discretionary_income": discretionary_income(args.agi, config.poverty_line).to_string(),
            "poverty_line": config.poverty_line.to_string(),
        },
        "methodology": "10% of AGI above 1.5x the poverty line, per month",
        "warnings": [],
    }))
}
