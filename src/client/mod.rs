//! HTTP client for the Scaleway API

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::billing::{ListInvoicesRequest, ListInvoicesResponse};
use crate::config::ConnectionConfig;
use crate::core::error::Result;
use crate::core::{BillingApi, ConfigError, SessionProvider, UpstreamError};

const AUTH_HEADER: &str = "x-auth-token";
const LIST_INVOICES_PATH: &str = "/billing/v2beta1/invoices";

/// Error body returned by the Scaleway API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Authenticated reqwest client for the Scaleway API
#[derive(Clone)]
pub struct ScalewayClient {
    http: reqwest::Client,
    api_url: String,
}

impl ScalewayClient {
    /// Build a client from a connection configuration
    ///
    /// Fails when no secret key is configured.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let secret_key = config.secret_key().ok_or_else(|| ConfigError::MissingField {
            field: "secret_key".to_string(),
            context: "scaleway connection".to_string(),
        })?;

        let mut token = HeaderValue::from_str(secret_key).map_err(|_| ConfigError::InvalidValue {
            field: "secret_key".to_string(),
            value: "<redacted>".to_string(),
            message: "contains characters not allowed in a header".to_string(),
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn error_from_response(response: reqwest::Response) -> UpstreamError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        UpstreamError::Status { status, message }
    }
}

#[async_trait]
impl BillingApi for ScalewayClient {
    async fn list_invoices(&self, request: &ListInvoicesRequest) -> Result<ListInvoicesResponse> {
        let url = format!("{}{}", self.api_url, LIST_INVOICES_PATH);
        tracing::debug!(url = %url, organization_id = ?request.organization_id, "listing invoices");

        let response = self
            .http
            .get(&url)
            .query(request)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await.into());
        }

        let body = response.bytes().await.map_err(UpstreamError::Transport)?;
        let parsed: ListInvoicesResponse =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(parsed)
    }
}

/// Session provider building a [`ScalewayClient`] per connection
///
/// Returns `Ok(None)` when the connection has no secret key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientSessionProvider;

#[async_trait]
impl SessionProvider for ClientSessionProvider {
    async fn client(&self, config: &ConnectionConfig) -> Result<Option<Arc<dyn BillingApi>>> {
        if config.secret_key().is_none() {
            return Ok(None);
        }
        let client = ScalewayClient::new(config)?;
        Ok(Some(Arc::new(client)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_secret_key() {
        let err = ScalewayClient::new(&ConnectionConfig::default()).err().unwrap();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = ConnectionConfig {
            secret_key: Some("secret".to_string()),
            api_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = ScalewayClient::new(&config).unwrap();
        assert_eq!(client.api_url(), "http://localhost:8080");
    }

    #[test]
    fn test_provider_without_secret_returns_none() {
        let provider = ClientSessionProvider;
        let client = tokio_test::block_on(provider.client(&ConnectionConfig::default())).unwrap();
        assert!(client.is_none());
    }

    #[tokio::test]
    async fn test_provider_with_secret_returns_client() {
        let provider = ClientSessionProvider;
        let config = ConnectionConfig {
            secret_key: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(provider.client(&config).await.unwrap().is_some());
    }
}
