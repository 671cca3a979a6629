use serde_json::Value;

use super::find_summary;

/// Print just the installment, or the failure reason for a state document.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    if let Some(installment) = find_summary(value).and_then(|s| s.get("installment")) {
        return format_minimal(installment);
    }

    match value.get("status").and_then(Value::as_str) {
        Some("failed") => value.get("reason").map(format_minimal).unwrap_or_default(),
        Some(other) => other.to_string(),
        None => format_minimal(value),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
