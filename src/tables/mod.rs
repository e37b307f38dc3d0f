//! Tables exposed by the Scaleway plugin

pub mod invoice;

pub use invoice::{InvoiceListAdapter, InvoiceRecord, table_scaleway_invoice};
