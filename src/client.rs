//! RMAPI HTTP client.
//!
//! Builds account-scoped URLs, attaches the API key, checks the status code
//! each verb expects, maps vendor failures onto [`HoldingsError`] and decodes
//! JSON bodies. Entity-level operations are implemented via traits on the
//! model types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::Configuration;
use crate::error::{HoldingsError, Result};
use crate::listener::{InteractionContext, ResponseBodyListener};

const DEFAULT_API_URL: &str = "https://sandbox.ebsco.io";
const USER_AGENT: &str = concat!("holdingsiq/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "X-Api-Key";
const INVALID_RMAPI_RESPONSE: &str = "Invalid RMAPI response";
const JSON_RESPONSE_ERROR: &str = "Error processing RMAPI Response";

pub(crate) const VENDORS_PATH: &str = "vendors";
pub(crate) const PACKAGES_PATH: &str = "packages";
pub(crate) const TITLES_PATH: &str = "titles";

/// RMAPI client bound to one customer account.
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the registered body listeners.
///
/// # Example
///
/// ```no_run
/// use holdingsiq::HoldingsClient;
///
/// # fn example() -> holdingsiq::Result<()> {
/// // From RMAPI_CUSTOMER_ID / RMAPI_API_KEY / RMAPI_URL
/// let client = HoldingsClient::from_env()?;
///
/// // Or configure manually
/// let client = HoldingsClient::new("apidvcorp", "api-key", "https://sandbox.ebsco.io")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HoldingsClient {
    http: Client,
    base_url: Arc<Url>,
    account_root: Arc<str>,
    customer_id: String,
    api_key: String,
    listeners: Arc<Vec<Arc<dyn ResponseBodyListener>>>,
}

impl std::fmt::Debug for HoldingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldingsClient")
            .field("base_url", &self.base_url.as_str())
            .field("customer_id", &self.customer_id)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl HoldingsClient {
    /// Create a client from environment variables.
    ///
    /// Uses `RMAPI_CUSTOMER_ID` and `RMAPI_API_KEY`, and optionally
    /// `RMAPI_URL` (defaults to `https://sandbox.ebsco.io`).
    ///
    /// # Errors
    ///
    /// Returns an error if the customer id or API key is not set.
    pub fn from_env() -> Result<Self> {
        let customer_id = env::var("RMAPI_CUSTOMER_ID").map_err(|_| {
            HoldingsError::ConfigMissing("RMAPI_CUSTOMER_ID environment variable not set".to_string())
        })?;
        let api_key = env::var("RMAPI_API_KEY").map_err(|_| {
            HoldingsError::ConfigMissing("RMAPI_API_KEY environment variable not set".to_string())
        })?;
        let base_url = env::var("RMAPI_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&customer_id, &api_key, &base_url)
    }

    /// Create a client from resolved tenant credentials.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::ConfigMissing`] if the customer id, API key
    /// or URL is absent.
    pub fn from_configuration(config: &Configuration) -> Result<Self> {
        fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| HoldingsError::ConfigMissing(format!("{name} is empty")))
        }

        Self::new(
            require(&config.customer_id, "Customer ID")?,
            require(&config.api_key, "API key")?,
            require(&config.url, "Url")?,
        )
    }

    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `customer_id` - RMAPI customer (account) id
    /// * `api_key` - RMAPI API key, sent as `X-Api-Key`
    /// * `base_url` - RMAPI base URL (e.g., `https://sandbox.ebsco.io`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(customer_id: &str, api_key: &str, base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)?;
        let account_root = format!("{trimmed}/rm/rmaccounts/{customer_id}");

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(HoldingsError::Http)?;

        tracing::info!(base_url = %base_url, "Web client instance created to serve requests to HoldingsIQ");

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            account_root: account_root.into(),
            customer_id: customer_id.to_string(),
            api_key: api_key.to_string(),
            listeners: Arc::new(Vec::new()),
        })
    }

    /// Register a listener for successful response bodies.
    #[must_use]
    pub fn with_body_listener<L>(mut self, listener: L) -> Self
    where
        L: ResponseBodyListener + 'static,
    {
        Arc::make_mut(&mut self.listeners).push(Arc::new(listener));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Absolute URL for a path (optionally with query) under the account root.
    pub fn construct_url(&self, path: &str) -> String {
        let full = format!("{}/{}", self.account_root, path);
        tracing::debug!(path = %full, "constructURL");
        full
    }

    /// GET expecting 200 and a JSON body.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let query = self.construct_url(path);
        let body = self
            .execute(Method::GET, &query, None, &[StatusCode::OK])
            .await?;
        decode_body(&body, &query)
    }

    /// PUT a JSON body expecting 204.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let query = self.construct_url(path);
        let payload = serde_json::to_vec(body)?;
        self.execute(Method::PUT, &query, Some(payload), &[StatusCode::NO_CONTENT])
            .await?;
        Ok(())
    }

    /// POST a JSON body expecting 200 or 202 and a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = self.construct_url(path);
        let payload = serde_json::to_vec(body)?;
        let body = self
            .execute(
                Method::POST,
                &query,
                Some(payload),
                &[StatusCode::OK, StatusCode::ACCEPTED],
            )
            .await?;
        decode_body(&body, &query)
    }

    /// POST without a body expecting 202 or 409.
    ///
    /// A 409 means the operation is already running on the vendor side and
    /// yields `None`, as does an empty 202 body.
    #[tracing::instrument(skip(self))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let query = self.construct_url(path);
        let (status, body) = self
            .execute_with_status(
                Method::POST,
                &query,
                None,
                &[StatusCode::ACCEPTED, StatusCode::CONFLICT],
            )
            .await?;

        if status == StatusCode::CONFLICT || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode_body(&body, &query).map(Some)
    }

    async fn execute(
        &self,
        method: Method,
        query: &str,
        payload: Option<Vec<u8>>,
        expected: &[StatusCode],
    ) -> Result<Vec<u8>> {
        self.execute_with_status(method, query, payload, expected)
            .await
            .map(|(_, body)| body)
    }

    async fn execute_with_status(
        &self,
        method: Method,
        query: &str,
        payload: Option<Vec<u8>>,
        expected: &[StatusCode],
    ) -> Result<(StatusCode, Vec<u8>)> {
        tracing::debug!(%method, "RMAPI Service absolute URL is: {}", query);

        let mut request = self
            .http
            .request(method.clone(), query)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(API_KEY_HEADER, self.api_key.as_str());

        if let Some(payload) = payload {
            tracing::debug!("RMAPI Service body is: {}", String::from_utf8_lossy(&payload));
            request = request.body(payload);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(query = %query, "Request failed: {e}");
            HoldingsError::Http(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(query = %query, "Failed to read response body: {e}");
            HoldingsError::Http(e)
        })?
        .to_vec();

        if !expected.contains(&status) {
            return Err(Self::failure(status, &body, query));
        }

        let context = InteractionContext {
            method,
            uri: query.to_string(),
            status: status.as_u16(),
        };
        for listener in self.listeners.iter() {
            listener.body_received(&body, &context);
        }

        Ok((status, body))
    }

    /// Map an unexpected status onto the error taxonomy.
    fn failure(status: StatusCode, body: &[u8], query: &str) -> HoldingsError {
        let body = String::from_utf8_lossy(body).into_owned();
        let status_code = status.as_u16();
        let status_message = status.canonical_reason().unwrap_or_default().to_string();

        tracing::error!(
            status_code,
            status_message = %status_message,
            query = %query,
            body = %body,
            "{INVALID_RMAPI_RESPONSE}"
        );

        let body = map_vendor_to_provider(&body);
        let query = query.to_string();

        match status {
            StatusCode::NOT_FOUND => HoldingsError::NotFound {
                message: format!("Requested resource {query} not found"),
                status_code,
                status_message,
                body,
                query,
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HoldingsError::Unauthorized {
                message: format!("Unauthorized Access to {query}"),
                status_code,
                status_message,
                body,
                query,
            },
            _ => HoldingsError::ServiceResponse {
                message: format!(
                    "{INVALID_RMAPI_RESPONSE} Code = {status_code} Message = {status_message} Body = {body}"
                ),
                status_code,
                status_message,
                body,
                query,
            },
        }
    }
}

/// RMAPI says "vendor" where FOLIO says "provider".
fn map_vendor_to_provider(body: &str) -> String {
    body.replace("vendor", "provider").replace("Vendor", "Provider")
}

fn decode_body<T: DeserializeOwned>(body: &[u8], query: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| {
        tracing::error!(
            query = %query,
            response = %String::from_utf8_lossy(body),
            target = std::any::type_name::<T>(),
            "{JSON_RESPONSE_ERROR}: {source}"
        );
        HoldingsError::ResultsProcessing {
            message: JSON_RESPONSE_ERROR.to_string(),
            source,
        }
    })
}
