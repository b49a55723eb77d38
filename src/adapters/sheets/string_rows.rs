use serde_json::Value;

/// Converts the JSON cells of a `ValueRange` into plain strings, row by row.
pub trait IntoStringRows {
    fn into_string_rows(self) -> Vec<Vec<String>>;
}

impl IntoStringRows for Vec<Vec<Value>> {
    fn into_string_rows(self) -> Vec<Vec<String>> {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
