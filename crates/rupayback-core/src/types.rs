use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Per-period rates expressed as decimals (0.05 = 5%). Annual inputs are
/// percentages and are named `*_percent` wherever they appear.
pub type Rate = Decimal;

/// How often a payment falls due.
///
/// The set is closed: parsing anything outside it is an
/// [`LoanError::InvalidFrequency`] rather than a silent fallback to monthly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentFrequency {
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
}

impl PaymentFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "Weekly",
            PaymentFrequency::BiWeekly => "Bi-weekly",
            PaymentFrequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentFrequency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalised.as_str() {
            "weekly" => Ok(PaymentFrequency::Weekly),
            "biweekly" => Ok(PaymentFrequency::BiWeekly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            _ => Err(LoanError::InvalidFrequency { value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for PaymentFrequency {
    type Error = LoanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentFrequency> for String {
    fn from(f: PaymentFrequency) -> Self {
        f.label().to_string()
    }
}

/// Repayment plan selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RepaymentPlan {
    /// Fixed annuity payment over the caller's term.
    #[default]
    Standard,
    /// 10% of discretionary income, term forced to 20 years.
    IncomeDriven,
}

impl RepaymentPlan {
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentPlan::Standard => "Standard",
            RepaymentPlan::IncomeDriven => "Income-driven",
        }
    }
}

impl fmt::Display for RepaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RepaymentPlan {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalised.as_str() {
            "standard" => Ok(RepaymentPlan::Standard),
            "incomedriven" | "idr" => Ok(RepaymentPlan::IncomeDriven),
            _ => Err(LoanError::InvalidPlan { value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for RepaymentPlan {
    type Error = LoanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepaymentPlan> for String {
    fn from(p: RepaymentPlan) -> Self {
        p.label().to_string()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
