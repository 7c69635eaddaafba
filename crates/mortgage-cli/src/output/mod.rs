pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// The period-by-period rows of a schedule, wherever the result nests them.
///
/// Matches `result.schedule` for a plain schedule and `result.schedule.schedule`
/// for a session.
pub fn schedule_rows(result: &Value) -> Option<&Vec<Value>> {
    match result.get("schedule")? {
        Value::Array(rows) => Some(rows),
        nested @ Value::Object(_) => nested.get("schedule").and_then(Value::as_array),
        _ => None,
    }
}

/// Render a scalar for a table cell or CSV field.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
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
    fn test_schedule_rows_plain_and_nested() {
        let plain = json!({"schedule": [{"period": 1}], "total_interest": "10"});
        assert_eq!(schedule_rows(&plain).unwrap().len(), 1);

        let session = json!({"schedule": {"schedule": [{"period": 1}, {"period": 2}]}});
        assert_eq!(schedule_rows(&session).unwrap().len(), 2);

        assert!(schedule_rows(&json!({"dti_pct": "36.72"})).is_none());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("1703.37")), "1703.37");
        assert_eq!(scalar_text(&json!(360)), "360");
        assert_eq!(scalar_text(&Value::Null), "");
    }
}
