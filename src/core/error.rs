//! Typed error handling for Scaleway tables
//!
//! Every failure a table can surface to the host is one of three categories:
//!
//! - [`ConfigError`]: the connection or session cannot produce a usable client
//! - [`UpstreamError`]: the Scaleway API call failed
//! - [`QueryError`]: the host asked for something the plugin cannot serve
//!
//! Errors are propagated unchanged; the adapter never retries or downgrades them.
//!
//! # Example
//!
//! ```rust,ignore
//! match plugin.list("scaleway_invoice", quals, &mut rows).await {
//!     Ok(()) => {}
//!     Err(ScalewayError::Upstream(UpstreamError::Status { status, .. })) if status == 403 => {
//!         eprintln!("credentials lack billing permissions");
//!     }
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T, E = ScalewayError> = std::result::Result<T, E>;

/// The main error type returned by tables and the plugin registry
#[derive(Debug, Error)]
pub enum ScalewayError {
    /// Session or connection configuration problems
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failures of the remote Scaleway API
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Invalid table requests coming from the host
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ScalewayError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ScalewayError::Config(_) => "CONFIG_ERROR",
            ScalewayError::Upstream(e) => e.error_code(),
            ScalewayError::Query(e) => e.error_code(),
        }
    }

    /// Whether the error came from the remote API rather than local setup
    pub fn is_upstream(&self) -> bool {
        matches!(self, ScalewayError::Upstream(_))
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to connection configuration and session resolution
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The session provider returned no client
    #[error("scaleway client is not properly configured")]
    ClientNotConfigured,

    /// A required connection field is missing
    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// A connection field holds an unusable value
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Upstream Errors
// =============================================================================

/// Errors returned while calling the Scaleway API
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, TLS, timeout...)
    #[error("Scaleway API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Scaleway API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode Scaleway API response: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn error_code(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "UPSTREAM_TRANSPORT_ERROR",
            UpstreamError::Status { status: 401, .. } | UpstreamError::Status { status: 403, .. } => {
                "UPSTREAM_UNAUTHORIZED"
            }
            UpstreamError::Status { status: 404, .. } => "UPSTREAM_NOT_FOUND",
            UpstreamError::Status { .. } => "UPSTREAM_ERROR",
            UpstreamError::Decode(_) => "UPSTREAM_DECODE_ERROR",
        }
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors caused by the shape of a host query
#[derive(Debug, Error)]
pub enum QueryError {
    /// No table with this name is registered
    #[error("Table '{table}' is not registered")]
    UnknownTable { table: String },

    /// A key column declared as required has no qual
    #[error("Table '{table}' requires an equality qual on '{column}'")]
    MissingRequiredQual { table: String, column: String },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownTable { .. } => "UNKNOWN_TABLE",
            QueryError::MissingRequiredQual { .. } => "MISSING_REQUIRED_QUAL",
        }
    }
}
