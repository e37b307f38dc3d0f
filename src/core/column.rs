//! Column values and rows handed to the host

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::table::ColumnType;

/// A polymorphic column value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColumnValue {
    Null,
    Int(i64),
    Timestamp(DateTime<Utc>),
    String(String),
    Json(Value),
}

impl ColumnValue {
    /// Get the value as a string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ColumnValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ColumnValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            ColumnValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ColumnValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Whether this value may be stored in a column of the given type
    ///
    /// Null fits every column.
    pub fn fits(&self, column_type: ColumnType) -> bool {
        matches!(
            (self, column_type),
            (ColumnValue::Null, _)
                | (ColumnValue::Int(_), ColumnType::Int)
                | (ColumnValue::Timestamp(_), ColumnType::Timestamp)
                | (ColumnValue::String(_), ColumnType::String)
                | (ColumnValue::Json(_), ColumnType::Json)
        )
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::String(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::String(value.to_string())
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        ColumnValue::Int(value.into())
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Int(value)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(value: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ColumnValue::Null, Into::into)
    }
}

/// A single table row, keyed by column name in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, ColumnValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any previous one
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.values.get(column)
    }

    /// Column names in the order they were inserted
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_option_conversion() {
        let none: Option<String> = None;
        assert!(ColumnValue::from(none).is_null());
        assert_eq!(
            ColumnValue::from(Some("x".to_string())).as_str(),
            Some("x")
        );
    }

    #[test]
    fn test_fits_column_type() {
        assert!(ColumnValue::Int(3).fits(ColumnType::Int));
        assert!(!ColumnValue::Int(3).fits(ColumnType::String));
        assert!(ColumnValue::Null.fits(ColumnType::Json));
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(ColumnValue::from(ts).fits(ColumnType::Timestamp));
    }

    #[test]
    fn test_row_preserves_insertion_order() {
        let mut row = Row::new();
        row.insert("id", "inv-1");
        row.insert("number", 7);
        row.insert("state", "paid");

        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["id", "number", "state"]);
        assert_eq!(row.get("number").and_then(ColumnValue::as_int), Some(7));
    }

    #[test]
    fn test_row_serializes_as_object() {
        let mut row = Row::new();
        row.insert("id", "inv-1");
        row.insert("due_date", ColumnValue::Null);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "inv-1", "due_date": null }));
    }
}
