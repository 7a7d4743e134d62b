mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rust_decimal::Decimal;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::AnalyzeArgs;
use commands::idr::IdrPaymentArgs;
use commands::refinance::{CompareArgs, RefinanceArgs};
use commands::schedule::ScheduleArgs;

/// Student loan repayment schedules and refinance comparison
#[derive(Parser)]
#[command(
    name = "rupayback",
    version,
    about = "Student loan repayment schedules and refinance comparison",
    long_about = "Computes amortization schedules for student loans under standard and \
                  income-driven repayment plans, with weekly, bi-weekly or monthly \
                  payments, and compares the original loan against a refinanced one."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Annual poverty line for income-driven plans (overrides --config)
    #[arg(long, global = true)]
    poverty_line: Option<Decimal>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a period-by-period repayment schedule
    Schedule(ScheduleArgs),
    /// Project the balance of a refinanced loan
    Refinance(RefinanceArgs),
    /// Compare the original loan against a refinanced one
    Compare(CompareArgs),
    /// Schedule plus debt-to-income and principal/interest breakdown
    Analyze(AnalyzeArgs),
    /// Monthly income-driven payment for an AGI
    IdrPayment(IdrPaymentArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let load_config = || config::load_config(cli.config.as_deref(), cli.poverty_line);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => {
            load_config().and_then(|cfg| commands::schedule::run_schedule(args, &cfg))
        }
        Commands::Refinance(args) => {
            load_config().and_then(|cfg| commands::refinance::run_refinance(args, &cfg))
        }
        Commands::Compare(args) => {
            load_config().and_then(|cfg| commands::refinance::run_compare(args, &cfg))
        }
        Commands::Analyze(args) => {
            load_config().and_then(|cfg| commands::analysis::run_analyze(args, &cfg))
        }
        Commands::IdrPayment(args) => {
            load_config().and_then(|cfg| commands::idr::run_idr_payment(args, &cfg))
        }
        Commands::Version => {
            println!("rupayback {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
