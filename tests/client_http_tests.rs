//! End-to-end tests of `ScalewayClient` against a local HTTP server
//!
//! A small axum app stands in for the Scaleway API so the real request
//! building, authentication header and response decoding are exercised.

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use scaleway_tables::prelude::*;
use serde_json::{Value, json};
use std::sync::Mutex;

#[derive(Clone)]
struct FakeApi {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

#[derive(Debug, Clone)]
struct SeenRequest {
    token: Option<String>,
    query: Option<String>,
}

async fn list_invoices(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    api.seen.lock().unwrap().push(SeenRequest {
        token: headers
            .get("x-auth-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query,
    });
    (
        api.status,
        [("content-type", "application/json")],
        api.body.clone(),
    )
}

/// Start the fake API and return a connection pointing at it
async fn serve(status: StatusCode, body: Value) -> (ConnectionConfig, Arc<Mutex<Vec<SeenRequest>>>) {
    serve_raw(status, body.to_string()).await
}

async fn serve_raw(
    status: StatusCode,
    body: String,
) -> (ConnectionConfig, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/billing/v2beta1/invoices", get(list_invoices))
        .with_state(FakeApi {
            status,
            body,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let connection = ConnectionConfig {
        secret_key: Some("secret-token".to_string()),
        api_url: format!("http://{}", addr),
        ..Default::default()
    };
    (connection, seen)
}

fn invoice_body() -> Value {
    json!({
        "invoices": [
            {
                "id": "inv-0001",
                "organization_id": "org-123",
                "organization_name": "Acme",
                "start_date": "2024-05-01T00:00:00Z",
                "stop_date": "2024-05-31T23:59:59Z",
                "billing_period": "2024-05-01T00:00:00Z",
                "issued_date": "2024-06-01T00:00:00Z",
                "due_date": "2024-06-30T00:00:00Z",
                "total_untaxed": { "currency_code": "EUR", "units": 100, "nanos": 0 },
                "total_taxed": { "currency_code": "EUR", "units": 120, "nanos": 0 },
                "total_tax": { "currency_code": "EUR", "units": 20, "nanos": 0 },
                "total_discount": null,
                "total_undiscount": null,
                "type": "periodic",
                "state": "paid",
                "number": 1,
                "seller_name": "Scaleway SAS"
            },
            {
                "id": "inv-0002",
                "organization_id": "org-123",
                "organization_name": "Acme",
                "type": "purchase",
                "state": "issued",
                "number": 2,
                "seller_name": "Scaleway SAS"
            }
        ],
        "total_count": 2
    })
}

#[tokio::test]
async fn test_list_invoices_sends_token_and_organization() {
    let (connection, seen) = serve(StatusCode::OK, invoice_body()).await;
    let client = ScalewayClient::new(&connection).unwrap();

    let request = ListInvoicesRequest {
        organization_id: Some("org-123".to_string()),
        ..Default::default()
    };
    let response = client.list_invoices(&request).await.unwrap();

    assert_eq!(response.total_count, 2);
    assert_eq!(response.invoices.len(), 2);
    assert_eq!(response.invoices[0].invoice_type, InvoiceType::Periodic);
    assert_eq!(response.invoices[1].start_date, None);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].token.as_deref(), Some("secret-token"));
    assert_eq!(seen[0].query.as_deref(), Some("organization_id=org-123"));
}

#[tokio::test]
async fn test_list_invoices_without_filter_sends_no_query() {
    let (connection, seen) = serve(StatusCode::OK, json!({ "invoices": [], "total_count": 0 })).await;
    let client = ScalewayClient::new(&connection).unwrap();

    let response = client
        .list_invoices(&ListInvoicesRequest::default())
        .await
        .unwrap();

    assert!(response.invoices.is_empty());
    let query = seen.lock().unwrap()[0].query.clone();
    assert!(query.is_none_or(|q| q.is_empty()));
}

#[tokio::test]
async fn test_error_status_uses_api_message() {
    let (connection, _) = serve(
        StatusCode::FORBIDDEN,
        json!({ "type": "permissions_denied", "message": "insufficient permissions" }),
    )
    .await;
    let client = ScalewayClient::new(&connection).unwrap();

    let err = client
        .list_invoices(&ListInvoicesRequest::default())
        .await
        .unwrap_err();

    match err {
        ScalewayError::Upstream(UpstreamError::Status { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "insufficient permissions");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_error_status_with_plain_body() {
    let (connection, _) = serve_raw(StatusCode::BAD_GATEWAY, "upstream down".to_string()).await;
    let client = ScalewayClient::new(&connection).unwrap();

    let err = client
        .list_invoices(&ListInvoicesRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScalewayError::Upstream(UpstreamError::Status { status: 502, ref message }) if message == "upstream down"
    ));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let (connection, _) = serve_raw(StatusCode::OK, "not json".to_string()).await;
    let client = ScalewayClient::new(&connection).unwrap();

    let err = client
        .list_invoices(&ListInvoicesRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "UPSTREAM_DECODE_ERROR");
}

#[tokio::test]
async fn test_plugin_lists_rows_over_http() {
    let (mut connection, seen) = serve(StatusCode::OK, invoice_body()).await;
    connection.organization_id = Some("org-default".to_string());
    let plugin = Plugin::scaleway(Arc::new(ClientSessionProvider), connection);

    let mut rows: Vec<Row> = Vec::new();
    plugin
        .list("scaleway_invoice", HashMap::new(), &mut rows)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("id").and_then(ColumnValue::as_str), Some("inv-0001"));
    assert_eq!(rows[0].get("type").and_then(ColumnValue::as_str), Some("periodic"));
    assert_eq!(
        rows[0].get("total_taxed").and_then(ColumnValue::as_json),
        Some(&json!({ "currency_code": "EUR", "units": 120, "nanos": 0 }))
    );
    assert!(rows[1].get("total_taxed").unwrap().is_null());

    let query = seen.lock().unwrap()[0].query.clone();
    assert_eq!(query.as_deref(), Some("organization_id=org-default"));
}
