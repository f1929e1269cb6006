use serde_json::Value;

use super::verdict_label;

/// Print just the verdict, or the first result field when no verdict is
/// present.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(label) = result_obj.get("recommendation").and_then(verdict_label) {
        println!("{}", label);
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, super::render_field(key, val));
            return;
        }
    }

    println!("{}", result_obj);
}
