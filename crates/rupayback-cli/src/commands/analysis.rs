use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rupayback_core::analysis::{self, LoanAnalysisInput};
use rupayback_core::EngineConfig;

use super::{resolve_input, LoanArgs};

/// Arguments for schedule analysis (debt-to-income and cost breakdown)
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Total annual income for the debt-to-income ratio
    #[arg(long)]
    pub total_income: Option<Decimal>,
}

pub fn run_analyze(
    args: AnalyzeArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: LoanAnalysisInput = resolve_input(args.input.as_deref(), || {
        let total_income = args
            .total_income
            .ok_or("--total-income is required (or provide --input)")?;
        Ok(LoanAnalysisInput {
            loan: args.loan.to_terms()?,
            total_income,
        })
    })?;
    let result = analysis::analyze_loan(&analysis_input, config)?;
    Ok(serde_json::to_value(result)?)
}
