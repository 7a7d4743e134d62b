pub mod analysis;
pub mod idr;
pub mod refinance;
pub mod schedule;

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use rupayback_core::repayment::schedule::LoanTerms;
use rupayback_core::{PaymentFrequency, RepaymentPlan};

use crate::input;

/// Loan details shared by every command that schedules the original loan.
#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years (ignored for income-driven plans)
    #[arg(long, default_value_t = 10)]
    pub term_years: u32,

    /// Payment frequency: Monthly, Bi-weekly or Weekly
    #[arg(long, default_value = "Monthly")]
    pub frequency: PaymentFrequency,

    /// Repayment plan: Standard or Income-driven
    #[arg(long, default_value = "Standard")]
    pub plan: RepaymentPlan,

    /// Adjusted gross income (income-driven plans)
    #[arg(long, default_value = "0")]
    pub agi: Decimal,

    /// First payment date (YYYY-MM-DD), used for the payoff date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

impl LoanArgs {
    pub fn to_terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;

        Ok(LoanTerms {
            principal,
            annual_rate_percent: rate,
            term_years: self.term_years,
            frequency: self.frequency,
            plan: self.plan,
            adjusted_gross_income: self.agi,
            start_date: self.start_date,
        })
    }
}

/// Take input from `--input <file.json>`, then piped stdin, then flags.
pub fn resolve_input<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(data)
    } else {
        from_flags()
    }
}
