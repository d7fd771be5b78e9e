use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::scalar_text;

/// Format output as tables using the tabled crate.
///
/// Scalar fields of the result go into one Field/Value table; nested
/// objects (summary, monthly breakdown) and arrays of rows (the schedule)
/// each get a titled table of their own.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_object_sections(result);
                print_envelope_notes(map);
            }
            Some(Value::Array(rows)) => {
                print_rows(rows);
                print_envelope_notes(map);
            }
            _ => print_object_sections(map),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", scalar_text(value)),
    }
}

fn print_object_sections(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut has_scalars = false;
    let mut nested: Vec<(&String, &Value)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(_) | Value::Array(_) => nested.push((key, val)),
            _ => {
                builder.push_record([key.clone(), scalar_text(val)]);
                has_scalars = true;
            }
        }
    }

    if has_scalars {
        println!("{}", Table::from(builder));
    }

    for (key, val) in nested {
        println!("\n{}:", key);
        match val {
            Value::Object(inner) => print_object_sections(inner),
            Value::Array(arr) => print_rows(arr),
            _ => {}
        }
    }
}

fn print_rows(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            println!("(empty)");
        }
        for item in arr {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
