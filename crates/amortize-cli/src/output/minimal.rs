use serde_json::Value;

use super::scalar_text;

/// Print just the headline number of the output.
///
/// Looks for well-known result fields in priority order, descending into
/// `summary` and falling back to the first field. A bare row list prints
/// its row count.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["periodic_payment", "total", "total_payment", "file"];

    match result_obj {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", scalar_text(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar_text(val));
                return;
            }
            println!("{{}}");
        }
        Value::Array(arr) => println!("{}", arr.len()),
        _ => println!("{}", scalar_text(result_obj)),
    }
}
