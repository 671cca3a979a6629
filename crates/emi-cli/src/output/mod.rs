pub mod cards;
pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Presentation settings shared by the human-readable formatters.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub currency_symbol: String,
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, presentation: &Presentation) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, presentation),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Locate the repayment summary in either an envelope or a state document.
pub(crate) fn find_summary(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    let map = value.as_object()?;
    let candidate = map
        .get("result")
        .or_else(|| map.get("summary"))
        .unwrap_or(value);
    candidate
        .as_object()
        .filter(|m| m.contains_key("installment"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_summary_in_envelope() {
        let v = json!({"result": {"installment": 8792}, "warnings": []});
        assert_eq!(find_summary(&v).unwrap()["installment"], 8792);
    }

    #[test]
    fn test_find_summary_in_state() {
        let v = json!({"status": "succeeded", "summary": {"installment": 8792}});
        assert_eq!(find_summary(&v).unwrap()["installment"], 8792);
    }

    #[test]
    fn test_find_summary_absent_for_failure() {
        let v = json!({"status": "failed", "reason": "x"});
        assert!(find_summary(&v).is_none());
        assert!(find_summary(&json!(42)).is_none());
    }
}
