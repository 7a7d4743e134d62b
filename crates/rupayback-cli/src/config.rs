use rust_decimal::Decimal;

use rupayback_core::EngineConfig;

use crate::input;

/// Engine configuration from `--config` (YAML or JSON), with the poverty line
/// optionally overridden on the command line.
pub fn load_config(
    path: Option<&str>,
    poverty_line: Option<Decimal>,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => input::file::read_yaml_or_json::<EngineConfig>(path)?,
        None => EngineConfig::default(),
    };
    if let Some(line) = poverty_line {
        config = config.with_poverty_line(line);
    }
    config.validate()?;

    tracing::debug!(
        poverty_line = %config.poverty_line,
        prorate = config.prorate_income_driven_payment,
        "engine configuration loaded"
    );
    Ok(config)
}
