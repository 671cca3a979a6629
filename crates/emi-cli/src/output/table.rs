use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cards, find_summary, Presentation};

/// Render an envelope or a result-panel state for a terminal.
pub fn print_table(value: &Value, presentation: &Presentation) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    if let Some(Value::String(status)) = map.get("status") {
        print_state(status, map, presentation);
        return;
    }

    match map.get("result") {
        Some(result) => print_envelope(result, map, presentation),
        None => println!("{}", field_table(map)),
    }
}

fn print_state(status: &str, map: &Map<String, Value>, presentation: &Presentation) {
    match status {
        "succeeded" => {
            if let Some(Value::Object(summary)) = map.get("summary") {
                cards::print_cards(summary, &presentation.currency_symbol);
            }
        }
        "failed" => {
            let reason = map
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("invalid input");
            println!("{} {}", "Calculation failed:".red().bold(), reason);
        }
        _ => cards::print_placeholder(),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>, presentation: &Presentation) {
    if let Some(summary) = find_summary(result) {
        cards::print_cards(summary, &presentation.currency_symbol);
        println!();
    }

    if let Some(Value::Object(assumptions)) = envelope.get("assumptions") {
        if !assumptions.is_empty() {
            println!("{}", field_table(assumptions));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w.yellow());
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    builder.build()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value_scalars() {
        assert_eq!(format_value(&json!("0.0083")), "0.0083");
        assert_eq!(format_value(&json!(8792)), "8792");
        assert_eq!(format_value(&json!(false)), "false");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(["a", "b"])), "a, b");
    }

    #[test]
    fn test_field_table_lists_keys() {
        let value = json!({"monthly_rate": "0.01", "zero_rate": false});
        let rendered = field_table(value.as_object().unwrap()).to_string();
        assert!(rendered.contains("monthly_rate"));
        assert!(rendered.contains("zero_rate"));
    }
}
