use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a text column that may arrive as a string, a JSON list, a
/// JSON-encoded list inside a string, a scalar, or `null`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flatten(&value))
}

fn flatten(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner @ Value::Array(_)) => flatten(&inner),
            _ => text.clone(),
        },
        Value::Array(items) => items
            .iter()
            .map(flatten)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
