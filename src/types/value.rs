use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single cell value.
///
/// Only [`CellValue::Text`] is wrapped when sizing; every other kind sizes
/// to one line. Arrays and objects that are not dates land in
/// [`CellValue::Other`] instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// ISO-8601 date/time, written as `{"date": "..."}` in JSON
    Date { date: String },
    /// Any other JSON value (arrays, arbitrary objects)
    Other(serde_json::Value),
}

impl CellValue {
    pub fn date(date: impl Into<String>) -> Self {
        Self::Date { date: date.into() }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Display text. Null renders empty.
    ///
    /// Arrays join their elements with `,` and objects render as
    /// `[object Object]`, the way a browser stringifies them.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(b) => Cow::Owned(b.to_string()),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Date { date } => Cow::Borrowed(date),
            Self::Other(value) => Cow::Owned(json_display(value)),
        }
    }
}

fn json_display(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(json_display).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One row of the dataset, keyed by column id.
pub type Record = BTreeMap<String, CellValue>;

/// Ordered rows. Identity (`Arc::ptr_eq`) decides whether a dataset is "new".
pub type Dataset = Arc<[Record]>;

/// Text for an optional value; missing renders empty.
pub fn value_text(value: Option<&CellValue>) -> Cow<'_, str> {
    value.map_or(Cow::Borrowed(""), CellValue::display_text)
}

/// Build a record from `(column id, value)` pairs.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<CellValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::Null.display_text(), "");
        assert_eq!(CellValue::Number(3.0).display_text(), "3");
        assert_eq!(CellValue::Number(2.5).display_text(), "2.5");
        assert_eq!(CellValue::Bool(true).display_text(), "true");
        assert_eq!(CellValue::from("abc").display_text(), "abc");
        assert_eq!(CellValue::date("2024-05-01").display_text(), "2024-05-01");
        assert_eq!(value_text(None), "");
    }

    #[test]
    fn test_untagged_deserialize() {
        let row: Record = serde_json::from_str(
            r#"{"a":"text","b":4,"c":true,"d":null,"e":{"date":"2024-01-02"}}"#,
        )
        .unwrap();
        assert_eq!(row.get("a"), Some(&CellValue::from("text")));
        assert_eq!(row.get("b"), Some(&CellValue::Number(4.0)));
        assert_eq!(row.get("c"), Some(&CellValue::Bool(true)));
        assert_eq!(row.get("d"), Some(&CellValue::Null));
        assert_eq!(row.get("e"), Some(&CellValue::date("2024-01-02")));
        assert!(!row.get("e").unwrap().is_text());
    }

    #[test]
    fn test_other_values_stringify() {
        let row: Record = serde_json::from_str(
            r#"{"tags":["p","q"],"mixed":[1,null,[2.5,true]],"obj":{"nested":1}}"#,
        )
        .unwrap();
        let tags = row.get("tags").unwrap();
        assert!(matches!(tags, CellValue::Other(_)));
        assert!(!tags.is_text());
        assert_eq!(tags.display_text(), "p,q");
        assert_eq!(row.get("mixed").unwrap().display_text(), "1,,2.5,true");
        assert_eq!(row.get("obj").unwrap().display_text(), "[object Object]");
    }
}
