//! Resolving and verifying credentials through the Okapi gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{Configuration, ConfigurationError};
use crate::client::HoldingsClient;
use crate::error::{HoldingsError, Result};
use crate::models::verify_credentials;
use crate::okapi::{OkapiData, TENANT_HEADER, TOKEN_HEADER, USER_ID_HEADER};

const JSON_API_TYPE: &str = "application/vnd.api+json";
const USER_CREDS_PATH: &str = "/eholdings/user-kb-credential";
const INVALID_CREDENTIALS: &str = "KB API Credentials are invalid";

/// Source of per-user RMAPI credentials.
#[async_trait]
pub trait ConfigurationService: Send + Sync {
    /// Resolve the RMAPI configuration for the requesting user.
    async fn retrieve_configuration(&self, okapi: &OkapiData) -> Result<Configuration>;

    /// Check a configuration against RMAPI.
    ///
    /// An empty list means the credentials work. Rejections are returned as
    /// values; `Err` is reserved for failures unrelated to the credentials.
    async fn verify_credentials(
        &self,
        config: &Configuration,
        okapi: &OkapiData,
    ) -> Result<Vec<ConfigurationError>>;
}

/// Reads credentials from `GET /eholdings/user-kb-credential`.
#[derive(Debug, Clone)]
pub struct KbCredentialsService {
    http: Client,
}

/// JSON:API document returned by the credentials endpoint.
#[derive(Debug, Default, Deserialize)]
struct KbCredentials {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    attributes: KbCredentialAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KbCredentialAttributes {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    customer_id: Option<String>,
}

impl From<KbCredentials> for Configuration {
    fn from(creds: KbCredentials) -> Self {
        Configuration {
            customer_id: creds.attributes.customer_id,
            api_key: creds.attributes.api_key,
            url: creds.attributes.url,
            config_valid: None,
        }
    }
}

impl KbCredentialsService {
    /// # Errors
    ///
    /// Returns [`HoldingsError::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(HoldingsError::Http)?;
        Ok(Self::with_client(http))
    }

    /// Use an existing HTTP client (shares its connection pool).
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    async fn fetch_credentials(&self, okapi: &OkapiData) -> Result<KbCredentials> {
        let url = format!(
            "{}://{}:{}{}",
            okapi.okapi_scheme(),
            okapi.okapi_host(),
            okapi.okapi_port(),
            USER_CREDS_PATH
        );

        let mut request = self.http.get(&url).header(ACCEPT, JSON_API_TYPE);
        for (name, value) in [
            (TENANT_HEADER, okapi.tenant()),
            (TOKEN_HEADER, okapi.api_token()),
            (USER_ID_HEADER, okapi.user_id()),
        ] {
            if let Some(value) = value {
                request = request.header(name, value);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(HoldingsError::ConfigurationService {
                status: status.as_u16(),
                body,
            });
        }
        if !content_type.starts_with(JSON_API_TYPE) {
            return Err(HoldingsError::ConfigurationService {
                status: status.as_u16(),
                body: format!("Expected content type {JSON_API_TYPE} but got '{content_type}'"),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ConfigurationService for KbCredentialsService {
    #[tracing::instrument(skip(self))]
    async fn retrieve_configuration(&self, okapi: &OkapiData) -> Result<Configuration> {
        match self.fetch_credentials(okapi).await {
            Ok(creds) => {
                tracing::info!(
                    id = creds.id.as_deref().unwrap_or_default(),
                    name = creds.attributes.name.as_deref().unwrap_or_default(),
                    "User credentials retrieved"
                );
                Ok(creds.into())
            }
            Err(e) => {
                tracing::info!("Failed to retrieve user credentials: {e}");
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip_all)]
    async fn verify_credentials(
        &self,
        config: &Configuration,
        _okapi: &OkapiData,
    ) -> Result<Vec<ConfigurationError>> {
        let errors = config.validate_parameters();
        if !errors.is_empty() {
            return Ok(errors);
        }

        let client = HoldingsClient::from_configuration(config)?;
        match verify_credentials(&client).await {
            Ok(()) => Ok(Vec::new()),
            Err(e) if is_invalid_configuration(&e) => {
                tracing::warn!("RMAPI rejected credentials: {e}");
                Ok(vec![ConfigurationError::new(INVALID_CREDENTIALS)])
            }
            Err(e) => Err(e),
        }
    }
}

/// Unknown host, or RMAPI saying the account/key is wrong.
fn is_invalid_configuration(err: &HoldingsError) -> bool {
    match err {
        HoldingsError::Http(e) => e.is_connect(),
        HoldingsError::NotFound { .. } | HoldingsError::Unauthorized { .. } => true,
        HoldingsError::ServiceResponse { status_code, .. } => {
            matches!(status_code, 401 | 403 | 404)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_to_configuration() {
        let creds: KbCredentials = serde_json::from_value(serde_json::json!({
            "id": "8d5b862b-9fb3-411d-afa7-406151739d26",
            "attributes": {
                "name": "University of Massachusetts",
                "apiKey": "APIKEY",
                "customerId": "CUSTID",
                "url": "URL"
            }
        }))
        .unwrap();

        let config = Configuration::from(creds);
        assert_eq!(config.customer_id.as_deref(), Some("CUSTID"));
        assert_eq!(config.api_key.as_deref(), Some("APIKEY"));
        assert_eq!(config.url.as_deref(), Some("URL"));
        assert_eq!(config.config_valid, None);
    }

    #[test]
    fn test_missing_attributes_give_empty_configuration() {
        let creds: KbCredentials = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(Configuration::from(creds), Configuration::default());
    }

    #[test]
    fn test_invalid_configuration_statuses() {
        let err = |status_code| HoldingsError::ServiceResponse {
            message: String::new(),
            status_code,
            status_message: String::new(),
            body: String::new(),
            query: String::new(),
        };
        assert!(is_invalid_configuration(&err(401)));
        assert!(is_invalid_configuration(&err(404)));
        assert!(!is_invalid_configuration(&err(500)));
        assert!(!is_invalid_configuration(&HoldingsError::validation("x")));
    }

    #[test]
    fn test_not_found_and_unauthorized_are_invalid_configuration() {
        let not_found = HoldingsError::NotFound {
            message: String::new(),
            status_code: 404,
            status_message: String::new(),
            body: String::new(),
            query: String::new(),
        };
        let unauthorized = HoldingsError::Unauthorized {
            message: String::new(),
            status_code: 403,
            status_message: String::new(),
            body: String::new(),
            query: String::new(),
        };
        assert!(is_invalid_configuration(&not_found));
        assert!(is_invalid_configuration(&unauthorized));
    }
}
