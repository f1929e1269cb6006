use serde_json::Value;
use std::io;

use super::{render_field, verdict_label};

/// Write the result record as two-column CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let rendered = if key == "recommendation" {
                    verdict_label(val).unwrap_or_default().to_string()
                } else {
                    render_field(key, val)
                };
                let _ = wtr.write_record([key.as_str(), &rendered]);
            }
        }
        other => {
            let _ = wtr.write_record([&render_field("", other)]);
        }
    }

    let _ = wtr.flush();
}
