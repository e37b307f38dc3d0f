//! Service traits for the Scaleway session and billing API

use std::sync::Arc;

use async_trait::async_trait;

use crate::billing::{ListInvoicesRequest, ListInvoicesResponse};
use crate::config::ConnectionConfig;
use crate::core::error::Result;

/// The outbound billing API used by tables
///
/// Implementations perform exactly one remote call per method invocation.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// List invoices, optionally restricted to one organization
    async fn list_invoices(&self, request: &ListInvoicesRequest) -> Result<ListInvoicesResponse>;
}

/// Resolves an authenticated client from a connection configuration
///
/// `Ok(None)` means the connection does not carry enough to authenticate.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn client(&self, config: &ConnectionConfig) -> Result<Option<Arc<dyn BillingApi>>>;
}
