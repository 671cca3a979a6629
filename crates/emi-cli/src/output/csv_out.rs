use serde_json::{Map, Value};
use std::io;

/// Write output as two-column CSV (field, value) to stdout.
///
/// Envelopes emit their result fields; state documents emit the status
/// followed by the summary or failure fields.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = wtr.write_record(["field", "value"]);

    for (key, val) in flatten(value) {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
    }

    let _ = wtr.flush();
}

fn flatten(value: &Value) -> Vec<(String, Value)> {
    let Value::Object(map) = value else {
        return vec![("value".to_string(), value.clone())];
    };

    if let Some(Value::Object(result)) = map.get("result") {
        return pairs(result);
    }

    let mut rows = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => rows.extend(pairs(inner)),
            _ => rows.push((key.clone(), val.clone())),
        }
    }
    rows
}

fn pairs(map: &Map<String, Value>) -> Vec<(String, Value)> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

fn format_csv_value(value: &Value) -> String {
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
    fn test_flatten_envelope_uses_result() {
        let v = json!({"result": {"installment": 8792}, "methodology": "x"});
        let rows = flatten(&v);
        assert_eq!(rows, vec![("installment".to_string(), json!(8792))]);
    }

    #[test]
    fn test_flatten_state_inlines_summary() {
        let v = json!({"status": "succeeded", "summary": {"installment": 8792}});
        let keys: Vec<String> = flatten(&v).into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"status".to_string()));
        assert!(keys.contains(&"installment".to_string()));
    }
}
