//! Per-tenant RMAPI credentials and how they are resolved.
//!
//! Credentials come from the `eholdings/user-kb-credential` endpoint behind
//! the Okapi gateway ([`KbCredentialsService`]) and are normally wrapped in a
//! [`CachedConfigurationService`] so that each user resolves and verifies
//! them once per cache lifetime.

mod cached;
mod service;

pub use cached::CachedConfigurationService;
pub use service::{ConfigurationService, KbCredentialsService};

use serde::{Deserialize, Serialize};
use url::Url;

/// RMAPI connection details for one tenant/user.
///
/// Every field is optional because the credentials endpoint may return a
/// partially filled record.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Set once the credentials have been verified against RMAPI.
    #[serde(default)]
    pub config_valid: Option<bool>,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("customer_id", &self.customer_id)
            .field("url", &self.url)
            .field("config_valid", &self.config_valid)
            .finish_non_exhaustive()
    }
}

impl Configuration {
    pub fn new(
        customer_id: impl Into<String>,
        api_key: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            api_key: Some(api_key.into()),
            url: Some(url.into()),
            config_valid: None,
        }
    }

    /// Copy of this configuration marked as verified.
    #[must_use]
    pub fn validated(&self) -> Self {
        Self {
            config_valid: Some(true),
            ..self.clone()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.config_valid == Some(true)
    }

    /// Check that all parameters are present and the URL is usable.
    ///
    /// Returns one [`ConfigurationError`] per failed check; an empty list
    /// means the configuration can be sent to RMAPI.
    pub fn validate_parameters(&self) -> Vec<ConfigurationError> {
        let mut errors = Vec::new();

        if is_empty(&self.url) {
            errors.push(ConfigurationError::new("Url is empty"));
        }
        if is_empty(&self.api_key) {
            errors.push(ConfigurationError::new("API key is empty"));
        }
        if is_empty(&self.customer_id) {
            errors.push(ConfigurationError::new("Customer ID is empty"));
        }
        if !self.url.as_deref().is_some_and(is_valid_url) {
            errors.push(ConfigurationError::new("Url is invalid"));
        }

        errors
    }
}

fn is_empty(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

// Local hosts such as `localhost` are accepted.
fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// A single reason why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationError {
    pub message: String,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
