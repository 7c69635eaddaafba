use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{scalar_text, schedule_rows};

/// Scalar arrays longer than this collapse to a count in table cells.
const MAX_INLINE_ITEMS: usize = 8;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                println!("{}", field_table(map));
            }
        }
        Value::Array(arr) => println!("{}", rows_table(arr)),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_sections(None, res_map),
        _ => println!("{}", scalar_text(result)),
    }

    if let Some(rows) = schedule_rows(result) {
        if !rows.is_empty() {
            println!("\nSchedule:");
            println!("{}", rows_table(rows));
        }
    }

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

/// Scalars of an object as one Field/Value table, nested objects as titled sections.
fn print_sections(title: Option<&str>, map: &Map<String, Value>) {
    let scalars: Map<String, Value> = map
        .iter()
        .filter(|(k, v)| !is_section(v) && !is_schedule(k, v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if let Some(title) = title {
        println!("\n{}:", title);
    }
    if !scalars.is_empty() {
        println!("{}", field_table(&scalars));
    }

    for (key, val) in map {
        if let Value::Object(nested) = val {
            if is_section(val) {
                print_sections(Some(key.as_str()), nested);
            }
        }
    }
}

fn is_section(value: &Value) -> bool {
    matches!(value, Value::Object(map) if !is_tagged(map))
}

fn is_schedule(key: &str, value: &Value) -> bool {
    key == "schedule" && value.is_array()
}

/// Tagged enums such as a break-even stay inline as a single cell.
fn is_tagged(map: &Map<String, Value>) -> bool {
    map.contains_key("status")
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &cell(val)]);
    }
    builder.build()
}

fn rows_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    };

    if headers.is_empty() {
        for row in rows {
            builder.push_record([cell(row)]);
        }
        return builder.build();
    }

    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    builder.build()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(arr) if arr.len() > MAX_INLINE_ITEMS => format!("[{} values]", arr.len()),
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(map) if is_tagged(map) => map
            .get("months")
            .map(|m| format!("{} months", scalar_text(m)))
            .unwrap_or_else(|| map.get("status").map(scalar_text).unwrap_or_default()),
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_collapses_long_arrays() {
        let long = Value::Array((0..360).map(|i| json!(i)).collect());
        assert_eq!(cell(&long), "[360 values]");
        assert_eq!(cell(&json!(["a", "b"])), "a, b");
    }

    #[test]
    fn test_cell_break_even() {
        assert_eq!(
            cell(&json!({"status": "months", "months": "11.00"})),
            "11.00 months"
        );
        assert_eq!(cell(&json!({"status": "unreachable"})), "unreachable");
    }

    #[test]
    fn test_rows_table_renders_headers() {
        let rows = vec![json!({"period": 1, "payment": "1703.37"})];
        let rendered = rows_table(&rows).to_string();
        assert!(rendered.contains("period"));
        assert!(rendered.contains("1703.37"));
    }
}
