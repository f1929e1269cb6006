use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{render_field, verdict_label};

/// Render the output envelope as a ratio table followed by the warning list
/// and a coloured verdict line, mirroring the calculator's results panel.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    let Some(Value::Object(result)) = map.get("result") else {
        print_flat_object(value);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Ratio", "Value"]);
    for (key, val) in result {
        if key == "recommendation" || key == "warnings" {
            continue;
        }
        builder.push_record([key.as_str(), &render_field(key, val)]);
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(warnings)) = result.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(label) = result.get("recommendation").and_then(verdict_label) {
        let coloured = match label {
            "Buy" => label.green().bold(),
            _ => label.red().bold(),
        };
        println!("\nRecommendation: {}", coloured);
    }

    // Envelope-level computational caveats.
    if let Some(Value::Array(notes)) = map.get("warnings") {
        if !notes.is_empty() {
            println!("\nNotes:");
            for n in notes {
                if let Value::String(s) = n {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = map.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &render_field(key, val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}
