use serde::Serialize;
use serde_json::{Map, Value};

/// One row of a range query, cells in column order.
pub type RawRow = Vec<String>;

/// Key/value content derived from the first two columns of a sheet.
///
/// Keys keep the position of their first occurrence; a repeated key
/// overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContentMap(Map<String, Value>);

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from the rows of a range, the first of which is always a header.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut map = ContentMap::new();
        for row in rows.into_iter().skip(1) {
            let mut cells = row.into_iter();
            if let (Some(key), Some(value)) = (cells.next(), cells.next()) {
                map.insert(key, value);
            }
        }
        map
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|value| (key.as_str(), value)))
    }

    /// The document written to disk: a JSON object with 2-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
