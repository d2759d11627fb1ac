use serde_json::Value;

use super::InventoryError;

/// Accepts either `{"data": [...]}` or a bare list of items.
pub(crate) fn unwrap_items(payload: Value) -> Result<Vec<Value>, InventoryError> {
    match payload {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(InventoryError::Structure(format!(
                "`data` holds {} instead of a list",
                describe(&other)
            ))),
            None => Err(InventoryError::Structure(
                "object response has no `data` key".to_string(),
            )),
        },
        Value::Array(items) => Ok(items),
        other => Err(InventoryError::Structure(format!(
            "expected an object with `data` or a list, got {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
