use serde_json::{Map, Value};

pub fn extract_string_from_value_map(row: &Map<String, Value>, key: &str) -> String {
  match row.get(key) {
    Some(Value::String(text)) => text.to_owned(),
    Some(Value::Number(num_ref)) => num_ref.to_string(),
    _ => "".to_owned(),
  }
}

/*
* Resolve a field that raw records spell in more than one way.
* The first key with a non-empty value wins.
*/
pub fn extract_first_string(row: &Map<String, Value>, keys: &[&str]) -> String {
  for key in keys {
    let value = extract_string_from_value_map(row, key);
    if !value.is_empty() {
      return value;
    }
  }
  "".to_owned()
}

pub fn extract_opt_f64_from_value_map(row: &Map<String, Value>, key: &str) -> Option<f64> {
  match row.get(key) {
    Some(Value::String(num_str)) => num_str.parse::<f64>().ok(),
    Some(Value::Number(num_ref)) => num_ref.as_f64(),
    _ => None,
  }
}

pub fn extract_opt_u32_from_value_map(row: &Map<String, Value>, key: &str) -> Option<u32> {
  match row.get(key) {
    Some(Value::String(num_str)) => num_str.trim().parse::<u32>().ok(),
    Some(Value::Number(num_ref)) => num_ref.as_i64().filter(|n| *n >= 0).map(|n| n as u32),
    _ => None,
  }
}
