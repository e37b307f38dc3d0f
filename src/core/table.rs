//! Table metadata: columns, key columns and the list hydrate

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::column::Row;
use crate::core::error::Result;
use crate::core::query::QueryContext;
use crate::core::sink::RowSink;

/// Column types understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    String,
    Int,
    Timestamp,
    Json,
}

/// A single column exposed by a table
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub description: &'static str,
}

impl ColumnDefinition {
    pub const fn new(
        name: &'static str,
        column_type: ColumnType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            column_type,
            description,
        }
    }
}

/// Whether the host must supply a qual for a key column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyColumnRequirement {
    Optional,
    Required,
}

/// A column whose equality quals may be pushed down into the list call
#[derive(Debug, Clone, Serialize)]
pub struct KeyColumn {
    pub name: &'static str,
    pub require: KeyColumnRequirement,
}

impl KeyColumn {
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            require: KeyColumnRequirement::Optional,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            require: KeyColumnRequirement::Required,
        }
    }
}

/// Produces the rows of a table for one query
///
/// Implementations stream every row into the sink before returning. On error
/// the sink may have received nothing.
#[async_trait]
pub trait ListHydrate: Send + Sync {
    async fn list(&self, query: &QueryContext, sink: &mut (dyn RowSink<Row> + Send)) -> Result<()>;
}

/// How a table lists its rows
#[derive(Clone)]
pub struct ListConfig {
    pub hydrate: Arc<dyn ListHydrate>,
    pub key_columns: Vec<KeyColumn>,
}

impl std::fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListConfig")
            .field("key_columns", &self.key_columns)
            .finish_non_exhaustive()
    }
}

/// Everything the host needs to know about a table
#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: Vec<ColumnDefinition>,
    pub list: ListConfig,
}

impl TableDefinition {
    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn key_column(&self, name: &str) -> Option<&KeyColumn> {
        self.list.key_columns.iter().find(|k| k.name == name)
    }
}
