use serde_json::Value;

use super::scalar_text;

/// Headline field of each command's result, in priority order.
const PRIORITY_KEYS: [&str; 7] = [
    "periodic_payment",
    "dti_pct",
    "max_loan",
    "months_saved",
    "break_even",
    "interest_savings",
    "total_interest",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return headline(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, headline(val));
        }
    }

    headline(result_obj)
}

/// A break-even prints its month count, or its status when unreachable.
fn headline(value: &Value) -> String {
    match value {
        Value::Object(map) if map.contains_key("status") => map
            .get("months")
            .or_else(|| map.get("status"))
            .map(scalar_text)
            .unwrap_or_default(),
        Value::Null => "null".to_string(),
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_key() {
        let out = json!({"result": {"schedule": [], "periodic_payment": "1703.37"}});
        assert_eq!(minimal_text(&out), "1703.37");
    }

    #[test]
    fn test_break_even_variants() {
        let reachable = json!({"result": {"current_payment": "1703.37", "break_even": {"status": "months", "months": "11.00"}}});
        assert_eq!(minimal_text(&reachable), "11.00");

        let unreachable = json!({"result": {"current_payment": "1703.37", "break_even": {"status": "unreachable"}}});
        assert_eq!(minimal_text(&unreachable), "unreachable");
    }

    #[test]
    fn test_fallback_first_field() {
        let out = json!({"result": {"alpha": 1}});
        assert_eq!(minimal_text(&out), "alpha: 1");
    }
}
