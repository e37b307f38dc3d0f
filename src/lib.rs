//! # scaleway-tables
//!
//! Scaleway billing data exposed as relational tables for a query host.
//!
//! ## Features
//!
//! - **Declarative tables**: name, description, typed columns and key columns
//! - **Qual push-down**: equality quals on key columns reach the API request
//! - **Streaming rows**: records are emitted one at a time into a host sink
//! - **Explicit sessions**: connection config and client resolution are passed in, never global
//! - **Typed errors**: configuration, upstream and query failures are distinct
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scaleway_tables::prelude::*;
//!
//! scaleway_tables::telemetry::init("scaleway_invoice=debug");
//!
//! let connection = ConnectionConfig::from_env()?;
//! let plugin = Plugin::scaleway(Arc::new(ClientSessionProvider), connection);
//!
//! let mut quals = HashMap::new();
//! quals.insert("organization_id".to_string(), ColumnValue::from("org-123"));
//!
//! let mut rows: Vec<Row> = Vec::new();
//! plugin.list("scaleway_invoice", quals, &mut rows).await?;
//! ```

pub mod billing;
pub mod client;
pub mod config;
pub mod core;
pub mod plugin;
pub mod tables;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BillingApi, ColumnDefinition, ColumnType, ColumnValue, ConfigError, KeyColumn,
        KeyColumnRequirement, ListHydrate, QueryContext, QueryError, Row, RowSink, ScalewayError,
        SessionProvider, TableDefinition, UpstreamError,
    };

    // === Billing API ===
    pub use crate::billing::{Invoice, InvoiceType, ListInvoicesRequest, ListInvoicesResponse, Money};
    pub use crate::client::{ClientSessionProvider, ScalewayClient};

    // === Config ===
    pub use crate::config::ConnectionConfig;

    // === Tables ===
    pub use crate::plugin::Plugin;
    pub use crate::tables::{InvoiceListAdapter, InvoiceRecord, table_scaleway_invoice};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use std::collections::HashMap;
    pub use std::sync::Arc;
}
