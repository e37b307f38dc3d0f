//! Query context passed from the host to a table's list hydrate

use std::collections::HashMap;

use crate::core::column::ColumnValue;

/// The part of a host query a table can act on
///
/// Only equality quals on key columns reach the hydrate; the host applies
/// every other predicate itself after rows are emitted.
///
/// # Example
/// ```rust,ignore
/// let query = QueryContext::new().with_qual("organization_id", "org-123");
/// assert_eq!(query.equals_qual_string("organization_id"), Some("org-123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    quals: HashMap<String, ColumnValue>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality qual `column = value`
    pub fn with_qual(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.quals.insert(column.into(), value.into());
        self
    }

    /// Build a context from raw quals
    pub fn from_quals(quals: HashMap<String, ColumnValue>) -> Self {
        Self { quals }
    }

    pub fn equals_qual(&self, column: &str) -> Option<&ColumnValue> {
        self.quals.get(column)
    }

    /// String value of an equality qual
    ///
    /// Returns `None` when the qual is absent, not a string, or empty.
    pub fn equals_qual_string(&self, column: &str) -> Option<&str> {
        self.equals_qual(column)
            .and_then(ColumnValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn has_qual(&self, column: &str) -> bool {
        self.quals.contains_key(column)
    }

    pub fn qual_columns(&self) -> impl Iterator<Item = &str> {
        self.quals.keys().map(String::as_str)
    }
}
