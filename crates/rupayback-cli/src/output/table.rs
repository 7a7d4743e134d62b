use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_decimal, leaf, split_result};

/// Format output as tables: a summary of scalar fields followed by one table
/// per row collection (schedule periods, balance series).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                let (summary, sections) = split_result(result);
                print_summary(&summary);
                for (name, rows) in sections {
                    println!("\n{}:", name);
                    print_rows(&name, rows);
                }
                print_envelope(map);
            }
            _ => print_rows("value", std::slice::from_ref(value)),
        },
        Value::Array(arr) => print_rows("value", arr),
        _ => println!("{}", value),
    }
}

fn print_summary(summary: &[(String, &Value)]) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in summary {
        builder.push_record([key.as_str(), &format_value(leaf(key), val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(name: &str, rows: &[Value]) {
    let mut builder = Builder::default();

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        builder.push_record(&headers);
        for item in rows {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(h, v))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }
    } else {
        // Plain series: index it by 1-based period
        let column = leaf(name).to_string();
        builder.push_record(["period".to_string(), column.clone()]);
        for (i, item) in rows.iter().enumerate() {
            builder.push_record([(i + 1).to_string(), format_value(&column, item)]);
        }
    }

    println!("{}", Table::from(builder));
}

fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format_decimal(key, s).unwrap_or_else(|| s.clone()),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) if arr.is_empty() => "(none)".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
