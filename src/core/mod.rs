//! Core module containing the table contract shared by every Scaleway table

pub mod column;
pub mod error;
pub mod query;
pub mod session;
pub mod sink;
pub mod table;

pub use column::{ColumnValue, Row};
pub use error::{ConfigError, QueryError, ScalewayError, UpstreamError};
pub use query::QueryContext;
pub use session::{BillingApi, SessionProvider};
pub use sink::{ChannelSink, FnSink, MapSink, RowSink};
pub use table::{
    ColumnDefinition, ColumnType, KeyColumn, KeyColumnRequirement, ListConfig, ListHydrate,
    TableDefinition,
};
