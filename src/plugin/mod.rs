//! Table registry and the host-facing list entry point

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ConnectionConfig;
use crate::core::error::Result;
use crate::core::{
    ColumnValue, KeyColumnRequirement, QueryContext, QueryError, Row, RowSink, SessionProvider,
    TableDefinition,
};
use crate::tables::{InvoiceListAdapter, table_scaleway_invoice};

pub const PLUGIN_NAME: &str = "scaleway";

/// Registry for all tables of a plugin
///
/// The host registers tables once and then calls [`Plugin::list`] per query.
#[derive(Debug, Default)]
pub struct Plugin {
    name: String,
    tables: HashMap<String, TableDefinition>,
}

impl Plugin {
    /// Create a new empty plugin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    /// The Scaleway plugin with every table wired to one connection
    pub fn scaleway(sessions: Arc<dyn SessionProvider>, connection: ConnectionConfig) -> Self {
        let adapter = InvoiceListAdapter::new(sessions, Arc::new(connection));
        let mut plugin = Self::new(PLUGIN_NAME);
        plugin.register(table_scaleway_invoice(adapter));
        plugin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a table definition
    ///
    /// A table with the same name is replaced.
    pub fn register(&mut self, table: TableDefinition) {
        tracing::debug!(plugin = %self.name, table = table.name, "registering table");
        self.tables.insert(table.name.to_string(), table);
    }

    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.get(name)
    }

    /// Names of all registered tables, sorted
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run a table's list hydrate for one query
    ///
    /// Quals on columns that are not key columns are dropped, since the host
    /// filters those itself. Required key columns must have a qual.
    pub async fn list(
        &self,
        table: &str,
        quals: HashMap<String, ColumnValue>,
        sink: &mut (dyn RowSink<Row> + Send),
    ) -> Result<()> {
        let definition = self.table(table).ok_or_else(|| QueryError::UnknownTable {
            table: table.to_string(),
        })?;

        for key in &definition.list.key_columns {
            if key.require == KeyColumnRequirement::Required && !quals.contains_key(key.name) {
                return Err(QueryError::MissingRequiredQual {
                    table: table.to_string(),
                    column: key.name.to_string(),
                }
                .into());
            }
        }

        let pushed: HashMap<String, ColumnValue> = quals
            .into_iter()
            .filter(|(column, _)| definition.key_column(column).is_some())
            .collect();

        tracing::debug!(plugin = %self.name, table, quals = pushed.len(), "listing table");
        let query = QueryContext::from_quals(pushed);
        definition.list.hydrate.list(&query, sink).await
    }
}
