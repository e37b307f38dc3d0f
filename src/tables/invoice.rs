//! The `scaleway_invoice` table

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Serialize;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::billing::{Invoice, InvoiceType, ListInvoicesRequest, Money};
use crate::config::ConnectionConfig;
use crate::core::error::Result;
use crate::core::{
    ChannelSink, ColumnDefinition, ColumnType, ColumnValue, ConfigError, KeyColumn, ListConfig,
    ListHydrate, MapSink, QueryContext, Row, RowSink, SessionProvider, TableDefinition,
};

pub const TABLE_NAME: &str = "scaleway_invoice";

const LOG_TARGET: &str = "scaleway_invoice";

/// Columns of `scaleway_invoice`, in row order
pub const COLUMNS: [ColumnDefinition; 17] = [
    ColumnDefinition::new("id", ColumnType::String, "The unique identifier of the invoice."),
    ColumnDefinition::new(
        "organization_id",
        ColumnType::String,
        "The organization ID associated with the invoice.",
    ),
    ColumnDefinition::new(
        "organization_name",
        ColumnType::String,
        "The organization name associated with the invoice.",
    ),
    ColumnDefinition::new("start_date", ColumnType::Timestamp, "The start date of the billing period."),
    ColumnDefinition::new("stop_date", ColumnType::Timestamp, "The end date of the billing period."),
    ColumnDefinition::new("billing_period", ColumnType::Timestamp, "The billing period for the invoice."),
    ColumnDefinition::new("issued_date", ColumnType::Timestamp, "The date when the invoice was issued."),
    ColumnDefinition::new("due_date", ColumnType::Timestamp, "The due date for the invoice payment."),
    ColumnDefinition::new("total_untaxed", ColumnType::Json, "The total amount before tax."),
    ColumnDefinition::new("total_taxed", ColumnType::Json, "The total amount including tax."),
    ColumnDefinition::new("total_tax", ColumnType::Json, "The total tax amount."),
    ColumnDefinition::new("total_discount", ColumnType::Json, "The total discount amount."),
    ColumnDefinition::new("total_undiscount", ColumnType::Json, "The total amount before discount."),
    ColumnDefinition::new("type", ColumnType::String, "The type of the invoice."),
    ColumnDefinition::new("state", ColumnType::String, "The current state of the invoice."),
    ColumnDefinition::new("number", ColumnType::Int, "The invoice number."),
    ColumnDefinition::new("seller_name", ColumnType::String, "The name of the seller."),
];

/// One row of `scaleway_invoice`
///
/// Every field is copied verbatim from the API's invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub organization_id: String,
    pub organization_name: String,
    pub start_date: Option<DateTime<Utc>>,
    pub stop_date: Option<DateTime<Utc>>,
    pub billing_period: Option<DateTime<Utc>>,
    pub issued_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub total_untaxed: Option<Money>,
    pub total_taxed: Option<Money>,
    pub total_tax: Option<Money>,
    pub total_discount: Option<Money>,
    pub total_undiscount: Option<Money>,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    pub state: String,
    pub number: i32,
    pub seller_name: String,
}

impl From<Invoice> for InvoiceRecord {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            organization_id: invoice.organization_id,
            organization_name: invoice.organization_name,
            start_date: invoice.start_date,
            stop_date: invoice.stop_date,
            billing_period: invoice.billing_period,
            issued_date: invoice.issued_date,
            due_date: invoice.due_date,
            total_untaxed: invoice.total_untaxed,
            total_taxed: invoice.total_taxed,
            total_tax: invoice.total_tax,
            total_discount: invoice.total_discount,
            total_undiscount: invoice.total_undiscount,
            invoice_type: invoice.invoice_type,
            state: invoice.state,
            number: invoice.number,
            seller_name: invoice.seller_name,
        }
    }
}

fn money_value(money: Option<Money>) -> ColumnValue {
    match money.map(serde_json::to_value) {
        Some(Ok(json)) => ColumnValue::Json(json),
        _ => ColumnValue::Null,
    }
}

impl InvoiceRecord {
    /// Project the record onto the table's columns
    pub fn into_row(self) -> Row {
        let mut row = Row::new();
        row.insert("id", self.id);
        row.insert("organization_id", self.organization_id);
        row.insert("organization_name", self.organization_name);
        row.insert("start_date", self.start_date);
        row.insert("stop_date", self.stop_date);
        row.insert("billing_period", self.billing_period);
        row.insert("issued_date", self.issued_date);
        row.insert("due_date", self.due_date);
        row.insert("total_untaxed", money_value(self.total_untaxed));
        row.insert("total_taxed", money_value(self.total_taxed));
        row.insert("total_tax", money_value(self.total_tax));
        row.insert("total_discount", money_value(self.total_discount));
        row.insert("total_undiscount", money_value(self.total_undiscount));
        row.insert("type", String::from(self.invoice_type));
        row.insert("state", self.state);
        row.insert("number", self.number);
        row.insert("seller_name", self.seller_name);
        row
    }
}

/// Lists invoices of a connection and streams them as [`InvoiceRecord`]s
///
/// The session provider and connection configuration are owned by the
/// adapter, so nothing is looked up from process-wide state.
#[derive(Clone)]
pub struct InvoiceListAdapter {
    sessions: Arc<dyn SessionProvider>,
    connection: Arc<ConnectionConfig>,
}

impl InvoiceListAdapter {
    pub fn new(sessions: Arc<dyn SessionProvider>, connection: Arc<ConnectionConfig>) -> Self {
        Self {
            sessions,
            connection,
        }
    }

    /// Organization filter for a query
    ///
    /// A qual wins over the connection default; with neither the filter is omitted.
    pub fn resolve_organization_id(&self, query: &QueryContext) -> Option<String> {
        query
            .equals_qual_string("organization_id")
            .or_else(|| self.connection.default_organization_id())
            .map(str::to_string)
    }

    /// Fetch invoices once and emit each of them into `sink`, in API order
    pub async fn list<S>(&self, query: &QueryContext, sink: &mut S) -> Result<()>
    where
        S: RowSink<InvoiceRecord> + Send + ?Sized,
    {
        let client = match self.sessions.client(&self.connection).await {
            Ok(Some(client)) => client,
            Ok(None) => {
                tracing::error!(target: LOG_TARGET, "scaleway client is not properly configured");
                return Err(ConfigError::ClientNotConfigured.into());
            }
            Err(e) => {
                tracing::error!(target: LOG_TARGET, connection_error = %e, "failed to resolve session");
                return Err(e);
            }
        };
        tracing::debug!(target: LOG_TARGET, "resolved billing client");

        let request = ListInvoicesRequest {
            organization_id: self.resolve_organization_id(query),
            ..Default::default()
        };

        let response = client.list_invoices(&request).await.map_err(|e| {
            tracing::error!(target: LOG_TARGET, api_error = %e, "failed to list invoices");
            e
        })?;

        // TODO: walk the remaining pages once the billing API documents its paging for invoices
        if response.is_truncated() {
            tracing::warn!(
                target: LOG_TARGET,
                returned = response.invoices.len(),
                total_count = response.total_count,
                "invoice listing is incomplete, only the first page was fetched"
            );
        }

        for invoice in response.invoices {
            let item = InvoiceRecord::from(invoice);
            tracing::debug!(target: LOG_TARGET, invoice_item = ?item, "streaming invoice");
            sink.stream_item(item);
        }

        Ok(())
    }

    /// Lazy form of [`list`](Self::list)
    ///
    /// The listing runs on a spawned task. The stream ends after the last
    /// record, or after a single `Err` item if the listing failed.
    pub fn stream(&self, query: QueryContext) -> impl Stream<Item = Result<InvoiceRecord>> + use<> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let adapter = self.clone();

        tokio::spawn(async move {
            let mut channel = ChannelSink::new(tx.clone());
            let mut sink = MapSink::new(&mut channel, |record: InvoiceRecord| -> Result<InvoiceRecord> {
                Ok(record)
            });
            if let Err(e) = adapter.list(&query, &mut sink).await {
                let _ = tx.send(Err(e));
            }
        });

        UnboundedReceiverStream::new(rx)
    }
}

#[async_trait]
impl ListHydrate for InvoiceListAdapter {
    async fn list(&self, query: &QueryContext, sink: &mut (dyn RowSink<Row> + Send)) -> Result<()> {
        let mut rows = MapSink::new(sink, InvoiceRecord::into_row);
        InvoiceListAdapter::list(self, query, &mut rows).await
    }
}

/// Definition of the `scaleway_invoice` table backed by `adapter`
pub fn table_scaleway_invoice(adapter: InvoiceListAdapter) -> TableDefinition {
    tracing::debug!(target: LOG_TARGET, "Initializing Scaleway Invoice table");
    TableDefinition {
        name: TABLE_NAME,
        description: "Invoices in your Scaleway account.",
        columns: COLUMNS.to_vec(),
        list: ListConfig {
            hydrate: Arc::new(adapter),
            key_columns: vec![KeyColumn::optional("organization_id")],
        },
    }
}
