//! Wire types of the Scaleway billing API (v2beta1)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount as returned by Scaleway
///
/// `units` is the whole part and `nanos` the fractional part in billionths,
/// both carrying the same sign. Amounts are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency_code: String,
    #[serde(default)]
    pub units: i64,
    #[serde(default)]
    pub nanos: i32,
}

/// Kind of invoice
///
/// Values the API may add later are kept verbatim in [`InvoiceType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceType {
    #[default]
    UnknownType,
    Periodic,
    Purchase,
    Other(String),
}

impl InvoiceType {
    pub fn as_str(&self) -> &str {
        match self {
            InvoiceType::UnknownType => "unknown_type",
            InvoiceType::Periodic => "periodic",
            InvoiceType::Purchase => "purchase",
            InvoiceType::Other(s) => s,
        }
    }
}

impl From<String> for InvoiceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unknown_type" => InvoiceType::UnknownType,
            "periodic" => InvoiceType::Periodic,
            "purchase" => InvoiceType::Purchase,
            _ => InvoiceType::Other(value),
        }
    }
}

impl From<InvoiceType> for String {
    fn from(value: InvoiceType) -> Self {
        match value {
            InvoiceType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invoice item of a `ListInvoices` response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
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

/// Parameters of `GET /billing/v2beta1/invoices`
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListInvoicesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Body of a `ListInvoices` response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListInvoicesResponse {
    pub invoices: Vec<Invoice>,
    pub total_count: u64,
}

impl ListInvoicesResponse {
    /// Whether the API reports more invoices than this page holds
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.invoices.len() as u64
    }
}
