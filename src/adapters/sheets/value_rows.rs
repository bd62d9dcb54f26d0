use serde_json::Value;

use crate::domain::content_map::RawRow;

/// Converts the `values` matrix of a `ValueRange` into string rows.
pub trait IntoRawRows {
    fn into_raw_rows(self) -> Vec<RawRow>;
}

impl IntoRawRows for Vec<Vec<Value>> {
    fn into_raw_rows(self) -> Vec<RawRow> {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
