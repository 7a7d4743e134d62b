//! Engine policy parameters.
//!
//! The poverty line feeds the income-driven formula directly and changes
//! yearly in practice, so it lives here rather than as a literal in the math.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::Money;
use crate::LoanResult;

/// Federal poverty line (annual, single-person household) used by default.
pub const DEFAULT_POVERTY_LINE: Money = dec!(14580);

/// Policy knobs shared by every computation in one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annual poverty line for the discretionary-income calculation.
    pub poverty_line: Money,
    /// Convert the monthly income-driven figure to the selected cadence
    /// (`monthly * 12 / periods_per_year`). Off by default, in which case the
    /// monthly amount is charged every period whatever the frequency.
    pub prorate_income_driven_payment: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poverty_line: DEFAULT_POVERTY_LINE,
            prorate_income_driven_payment: false,
        }
    }
}

impl EngineConfig {
    pub fn with_poverty_line(mut self, poverty_line: Money) -> Self {
        self.poverty_line = poverty_line;
        self
    }

    pub fn validate(&self) -> LoanResult<()> {
        if self.poverty_line < Decimal::ZERO {
            return Err(LoanError::InvalidConfig {
                field: "poverty_line".into(),
                reason: format!("must not be negative (got {})", self.poverty_line),
            });
        }
        Ok(())
    }
}
