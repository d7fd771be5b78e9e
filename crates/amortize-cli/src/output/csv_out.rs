use serde_json::{Map, Value};
use std::io;

use super::scalar_text;

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Arrays of rows become one record per row, whether bare or as an
/// envelope's result. An envelope whose result holds a `schedule` is
/// written as that schedule; other objects are flattened
/// into `field,value` pairs with dotted keys for nested fields.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Array(arr) => write_rows(&mut wtr, arr),
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Array(rows)) => {
                    write_rows(&mut wtr, rows);
                    let _ = wtr.flush();
                    return;
                }
                Some(Value::Object(result)) => result,
                _ => map,
            };
            if let Some(Value::Array(schedule)) = result.get("schedule") {
                write_rows(&mut wtr, schedule);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                write_fields(&mut wtr, "", result);
            }
        }
        _ => {
            let _ = wtr.write_record([&scalar_text(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(wtr: &mut StdoutCsv<'_>, prefix: &str, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &name, inner),
            _ => {
                let _ = wtr.write_record([name.as_str(), &scalar_text(val)]);
            }
        }
    }
}

fn write_rows(wtr: &mut StdoutCsv<'_>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
