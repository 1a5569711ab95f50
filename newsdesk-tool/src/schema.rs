//! JSON schema generation for tool arguments.

use schemars::JsonSchema;
use serde_json::Value;

/// Root-level keys the Gemini function declaration format does not accept.
const UNSUPPORTED_KEYS: [&str; 3] = ["$schema", "title", "definitions"];

/// Generate the `parameters` schema for an arguments type.
///
/// Argument structs should stick to plain string, number and boolean fields;
/// nested definitions are dropped.
pub fn parameters_schema<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null);
    if let Some(object) = value.as_object_mut() {
        for key in UNSUPPORTED_KEYS {
            object.remove(key);
        }
    }
    value
}
