use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid frequency: '{value}' (expected Weekly, Bi-weekly or Monthly)")]
    InvalidFrequency { value: String },

    #[error("Invalid repayment plan: '{value}' (expected Standard or Income-driven)")]
    InvalidPlan { value: String },

    #[error("Invalid term: {field} — {reason}")]
    InvalidTerm { field: String, reason: String },

    #[error("Invalid principal: {value} (must be zero or positive)")]
    InvalidPrincipal { value: Decimal },

    #[error("Invalid rate: {field} = {value} (must not be negative)")]
    InvalidRate { field: String, value: Decimal },

    #[error("Rate out of range: {field} = {value} ({reason})")]
    RateOutOfRange {
        field: String,
        value: Decimal,
        reason: String,
    },

    #[error("Invalid income: {field} = {value} (must not be negative)")]
    InvalidIncome { field: String, value: Decimal },

    #[error("Invalid configuration: {field} — {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
