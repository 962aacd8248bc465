//! Value Objects for the sheet-backed catalog

use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Positional index of a row in a sheet. The header row is index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(usize);

impl RowIndex {
    pub const HEADER: RowIndex = RowIndex(0);
    pub fn new(value: usize) -> Self { Self(value) }
    /// Index of the `n`th data row (0-based, header excluded).
    pub fn of_data(n: usize) -> Self { Self(n + 1) }
    pub fn value(&self) -> usize { self.0 }
    /// 1-based row number used in A1 notation.
    pub fn a1_row(&self) -> usize { self.0 + 1 }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Raw contents of one sheet: the header row followed by data rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Splits raw values into header and data rows. An empty sheet has no header.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        let mut iter = values.into_iter();
        match iter.next() {
            Some(header) => Self { header: header.into_iter().map(|h| h.trim().to_string()).collect(), rows: iter.collect() },
            None => Self::default(),
        }
    }

    pub fn header(&self) -> &[String] { &self.header }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Data rows keyed by header name, in sheet order.
    pub fn records(&self) -> Vec<SheetRecord> {
        self.rows.iter().map(|row| SheetRecord::from_row(&self.header, row)).collect()
    }

    /// Linear scan for the first data row whose `column` equals `value`.
    pub fn position(&self, column: &str, value: &str) -> Option<(RowIndex, SheetRecord)> {
        self.records()
            .into_iter()
            .enumerate()
            .find(|(_, r)| r.get(column) == Some(value))
            .map(|(i, r)| (RowIndex::of_data(i), r))
    }
}

/// One data row keyed by header. Short rows are padded with empty cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetRecord(Vec<(String, String)>);

impl SheetRecord {
    pub fn from_row(header: &[String], row: &[String]) -> Self {
        Self(header.iter().enumerate().map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default())).collect())
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Value of `column`; blank cells read the same as missing columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn text(&self, column: &str) -> String { self.get(column).unwrap_or_default().to_string() }
}

impl Serialize for SheetRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Splits a comma-joined cell, trimming entries and dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

fn scalar_text(value: serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected a string or number, got {other}")),
    }
}

/// Accepts a JSON string, number, bool or null as cell text.
pub fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(serde_json::Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}

pub fn lenient_text_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    lenient_text(deserializer).map(Some)
}

/// Accepts either an array of scalars or a comma-joined string.
pub fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(vec![]),
        serde_json::Value::String(s) => Ok(split_list(&s)),
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let text = scalar_text(item).map_err(serde::de::Error::custom)?;
                let text = text.trim();
                if !text.is_empty() { out.push(text.to_string()); }
            }
            Ok(out)
        }
        other => Err(serde::de::Error::custom(format!("expected a list or a comma-separated string, got {other}"))),
    }
}

pub fn lenient_list_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    lenient_list(deserializer).map(Some)
}
