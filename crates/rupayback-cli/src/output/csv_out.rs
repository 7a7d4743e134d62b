use serde_json::Value;
use std::io;

use super::{format_decimal, leaf, split_result};

/// Collections written as CSV rows, in order of preference.
const ROW_PREFERENCE: [&str; 4] = ["periods", "balance_comparison", "debt_to_income", "balances"];

/// Write output as CSV to stdout: the schedule rows (or balance series) when
/// the result has them, otherwise field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .and_then(|r| r.as_object());

    match result {
        Some(result) => {
            let (summary, sections) = split_result(result);
            match pick_rows(&sections) {
                Some((name, rows)) => write_rows(&mut wtr, name, rows),
                None => {
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in summary {
                        let _ = wtr.write_record([key.as_str(), &format_csv_value(leaf(&key), val)]);
                    }
                }
            }
        }
        None => {
            let _ = wtr.write_record([&format_csv_value("", value)]);
        }
    }

    let _ = wtr.flush();
}

fn pick_rows<'a>(sections: &'a [(String, &'a [Value])]) -> Option<(&'a str, &'a [Value])> {
    ROW_PREFERENCE.iter().find_map(|wanted| {
        sections
            .iter()
            .find(|(path, _)| leaf(path) == *wanted)
            .map(|(path, rows)| (path.as_str(), *rows))
    })
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, name: &str, rows: &[Value]) {
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in rows {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(|v| format_csv_value(h, v)).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        let column = leaf(name);
        let _ = wtr.write_record(["period", column]);
        for (i, item) in rows.iter().enumerate() {
            let _ = wtr.write_record([(i + 1).to_string(), format_csv_value(column, item)]);
        }
    }
}

/// Decimal strings are rounded the same way the table renders them.
fn format_csv_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format_decimal(key, s).unwrap_or_else(|| s.clone()),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_schedule_periods() {
        let value = json!({
            "balance_comparison": [{"period": 1}],
            "periods": [{"period": 1, "payment": "10"}],
        });
        let (_, sections) = split_result(value.as_object().unwrap());
        let (name, rows) = pick_rows(&sections).unwrap();
        assert_eq!(name, "periods");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_balance_series_rows() {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, "balances", &[json!("10000"), json!("9950.5")]);
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(out, "period,balances\n1,10000.00\n2,9950.50\n");
    }

    #[test]
    fn test_schedule_rows_rounded_like_table() {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        let rows = [json!({
            "period": 1,
            "payment": "106.065518740",
            "interest_paid": "41.6666666666667",
            "rate_per_period": "0.00416666666667",
        })];
        write_rows(&mut wtr, "periods", &rows);
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "period,payment,interest_paid,rate_per_period\n1,106.07,41.67,0.004167\n"
        );
    }
}
