use clap::Args;
use serde_json::Value;

use rupayback_core::repayment::schedule::{self, LoanTerms};
use rupayback_core::EngineConfig;

use super::{resolve_input, LoanArgs};

/// Arguments for the repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(
    args: ScheduleArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = resolve_input(args.input.as_deref(), || args.loan.to_terms())?;
    let result = schedule::build_schedule(&terms, config)?;
    Ok(serde_json::to_value(result)?)
}
