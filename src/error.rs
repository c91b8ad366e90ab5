//! Error types for HoldingsIQ operations.

use thiserror::Error;

/// Errors that can occur while talking to RMAPI or the credentials endpoint.
#[derive(Debug, Error)]
pub enum HoldingsError {
    /// Configuration is missing or incomplete.
    #[error("HoldingsIQ configuration required: {0}")]
    ConfigMissing(String),

    /// The `X-Okapi-Url` header is absent or not a URL.
    #[error("Okapi url header does not contain valid url: {0}")]
    InvalidOkapiUrl(String),

    /// Request parameters were rejected before anything was sent.
    #[error("{0}")]
    RequestValidation(String),

    /// RMAPI answered 404.
    #[error("{message}")]
    NotFound {
        message: String,
        status_code: u16,
        status_message: String,
        body: String,
        query: String,
    },

    /// RMAPI answered 401 or 403.
    #[error("{message}")]
    Unauthorized {
        message: String,
        status_code: u16,
        status_message: String,
        body: String,
        query: String,
    },

    /// RMAPI answered with any other unexpected status.
    #[error("{message}")]
    ServiceResponse {
        message: String,
        status_code: u16,
        status_message: String,
        body: String,
        query: String,
    },

    /// A successful response body could not be decoded.
    #[error("{message}: {source}")]
    ResultsProcessing {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The credentials endpoint did not return usable credentials.
    #[error("Failed to retrieve KB credentials (status {status}): {body}")]
    ConfigurationService { status: u16, body: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl HoldingsError {
    /// Status code reported by RMAPI or the credentials endpoint, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { status_code, .. }
            | Self::Unauthorized { status_code, .. }
            | Self::ServiceResponse { status_code, .. } => Some(*status_code),
            Self::ConfigurationService { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Vendor response body carried by the error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::NotFound { body, .. }
            | Self::Unauthorized { body, .. }
            | Self::ServiceResponse { body, .. }
            | Self::ConfigurationService { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True for errors produced from an RMAPI status code.
    pub fn is_service_response(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Unauthorized { .. } | Self::ServiceResponse { .. }
        )
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::RequestValidation(message.into())
    }
}

/// Result type alias for HoldingsIQ operations.
pub type Result<T> = core::result::Result<T, HoldingsError>;
