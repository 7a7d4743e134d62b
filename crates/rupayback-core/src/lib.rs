//! Student loan amortization engine.
//!
//! Turns principal, rate, term, payment frequency, repayment plan and income
//! into a period-by-period schedule, and projects the same principal under
//! refinanced terms for comparison. All arithmetic is `rust_decimal::Decimal`.

pub mod config;
pub mod error;
pub mod payment_math;
pub mod repayment;
pub mod types;

#[cfg(feature = "refinance")]
pub mod refinance;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use config::EngineConfig;
pub use error::LoanError;
pub use types::*;

/// Standard result type for all engine operations
pub type LoanResult<T> = Result<T, LoanError>;
