pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Scalar fields of a result, keyed by dotted path.
pub type Summary<'a> = Vec<(String, &'a Value)>;

/// Row collections (schedule periods, balance series) keyed by dotted path.
pub type Sections<'a> = Vec<(String, &'a [Value])>;

/// Split a result object into scalar summary fields and row collections,
/// descending into nested objects such as an analysis' embedded schedule.
pub fn split_result<'a>(result: &'a Map<String, Value>) -> (Summary<'a>, Sections<'a>) {
    let mut summary = Vec::new();
    let mut sections = Vec::new();
    collect(result, "", &mut summary, &mut sections);
    (summary, sections)
}

fn collect<'a>(
    map: &'a Map<String, Value>,
    prefix: &str,
    summary: &mut Summary<'a>,
    sections: &mut Sections<'a>,
) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => collect(inner, &path, summary, sections),
            Value::Array(items) if !items.is_empty() => sections.push((path, items.as_slice())),
            _ => summary.push((path, val)),
        }
    }
}

/// Money to cents, rates to six places. Non-decimal strings pass through.
pub fn format_decimal(key: &str, s: &str) -> Option<String> {
    let d = Decimal::from_str(s).ok()?;
    let dp: u32 = if key.contains("rate") { 6 } else { 2 };
    Some(format!("{:.*}", dp as usize, d.round_dp(dp)))
}

/// Last segment of a dotted path.
pub fn leaf(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
