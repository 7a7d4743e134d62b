use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use rupayback_core::EngineConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine configuration from an optional JSON string; defaults when absent.
fn parse_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    let config: EngineConfig = match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => EngineConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: rupayback_core::repayment::schedule::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = rupayback_core::repayment::schedule::build_schedule(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_loan(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: rupayback_core::analysis::LoanAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = rupayback_core::analysis::analyze_loan(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Refinancing
// ---------------------------------------------------------------------------

#[napi]
pub fn project_refinance(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: rupayback_core::refinance::projection::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = rupayback_core::refinance::projection::project_refinance(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_refinance(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: rupayback_core::refinance::comparison::RefinanceComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = rupayback_core::refinance::comparison::compare_refinance(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Income-driven payment
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct IdrPaymentInput {
    adjusted_gross_income: Decimal,
}

#[napi]
pub fn income_driven_payment(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: IdrPaymentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    if input.adjusted_gross_income < Decimal::ZERO {
        return Err(to_napi_error(rupayback_core::LoanError::InvalidIncome {
            field: "adjusted_gross_income".into(),
            value: input.adjusted_gross_income,
        }));
    }
    let monthly = rupayback_core::payment_math::income_driven_monthly_payment(
        input.adjusted_gross_income,
        config.poverty_line,
    );
    serde_json::to_string(&serde_json::json!({
        "monthly_payment": monthly,
        "poverty_line": config.poverty_line,
    }))
    .map_err(to_napi_error)
}
