pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Result fields that carry percentages and take a `%` suffix when rendered.
const PERCENT_FIELDS: [&str; 4] = ["dividend_yield", "roe", "current_yield", "simple_ytm"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a result field for display: ratios to two decimal places,
/// percentages suffixed with `%`, everything else as-is.
pub(crate) fn render_field(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) => {
            let v = n.as_f64().unwrap_or(f64::NAN);
            if PERCENT_FIELDS.contains(&key) {
                screener_core::display_percent(v)
            } else {
                screener_core::display_ratio(v)
            }
        }
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| render_field(key, v)).collect();
            items.join("; ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Human label for the serialized recommendation enum.
pub(crate) fn verdict_label(value: &Value) -> Option<&'static str> {
    match value.as_str()? {
        "buy" => Some("Buy"),
        "do_not_buy" => Some("Do not buy"),
        _ => None,
    }
}
