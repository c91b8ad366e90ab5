//! Okapi gateway request context.

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use url::Url;

use crate::error::{HoldingsError, Result};

/// `X-Okapi-Token` header name.
pub const TOKEN_HEADER: &str = "x-okapi-token";
/// `X-Okapi-Tenant` header name.
pub const TENANT_HEADER: &str = "x-okapi-tenant";
/// `X-Okapi-User-Id` header name.
pub const USER_ID_HEADER: &str = "x-okapi-user-id";
/// `X-Okapi-Url` header name.
pub const URL_HEADER: &str = "x-okapi-url";

/// Tenant, token, user and gateway location taken from incoming headers.
///
/// Header names are matched case-insensitively.
#[derive(Clone, PartialEq, Eq)]
pub struct OkapiData {
    headers: HashMap<String, String>,
    api_token: Option<String>,
    tenant: Option<String>,
    user_id: Option<String>,
    okapi_url: Url,
    okapi_host: String,
    okapi_port: u16,
}

impl std::fmt::Debug for OkapiData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkapiData")
            .field("tenant", &self.tenant)
            .field("user_id", &self.user_id)
            .field("okapi_url", &self.okapi_url.as_str())
            .finish_non_exhaustive()
    }
}

impl OkapiData {
    /// Build from `(name, value)` header pairs.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::InvalidOkapiUrl`] when the `X-Okapi-Url`
    /// header is missing or cannot be parsed as an absolute URL.
    pub fn new<I, K, V>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();

        let raw_url = headers
            .get(URL_HEADER)
            .ok_or_else(|| HoldingsError::InvalidOkapiUrl("<missing>".to_string()))?;
        let okapi_url = Url::parse(raw_url)
            .map_err(|_| HoldingsError::InvalidOkapiUrl(raw_url.clone()))?;
        let okapi_host = okapi_url
            .host_str()
            .ok_or_else(|| HoldingsError::InvalidOkapiUrl(raw_url.clone()))?
            .to_string();
        let okapi_port = okapi_url
            .port_or_known_default()
            .ok_or_else(|| HoldingsError::InvalidOkapiUrl(raw_url.clone()))?;

        Ok(Self {
            api_token: headers.get(TOKEN_HEADER).cloned(),
            tenant: headers.get(TENANT_HEADER).cloned(),
            user_id: headers.get(USER_ID_HEADER).cloned(),
            headers,
            okapi_url,
            okapi_host,
            okapi_port,
        })
    }

    /// Build from an HTTP header map. Values that are not valid UTF-8 are skipped.
    pub fn from_header_map(headers: &HeaderMap) -> Result<Self> {
        Self::new(headers.iter().filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        }))
    }

    /// Look up any header passed at construction.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The gateway URL exactly as given in `X-Okapi-Url`.
    pub fn okapi_url(&self) -> &str {
        self.headers
            .get(URL_HEADER)
            .map(String::as_str)
            .unwrap_or_else(|| self.okapi_url.as_str())
    }

    pub fn okapi_scheme(&self) -> &str {
        self.okapi_url.scheme()
    }

    pub fn okapi_host(&self) -> &str {
        &self.okapi_host
    }

    /// Explicit port, or the scheme's default port.
    pub fn okapi_port(&self) -> u16 {
        self.okapi_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(url: &str) -> Vec<(&'static str, String)> {
        vec![
            ("X-Okapi-Token", "test-token".to_string()),
            ("X-Okapi-Tenant", "test-tenant".to_string()),
            ("X-Okapi-User-Id", "test-user-id".to_string()),
            ("X-Okapi-Url", url.to_string()),
        ]
    }

    #[test]
    fn test_okapi_data_initialization() {
        let okapi = OkapiData::new(headers("http://localhost:9130")).unwrap();

        assert_eq!(okapi.api_token(), Some("test-token"));
        assert_eq!(okapi.tenant(), Some("test-tenant"));
        assert_eq!(okapi.user_id(), Some("test-user-id"));
        assert_eq!(okapi.okapi_url(), "http://localhost:9130");
        assert_eq!(okapi.okapi_host(), "localhost");
        assert_eq!(okapi.okapi_port(), 9130);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = OkapiData::new([("x-okapi-url", "invalid-url")]).unwrap_err();
        assert!(matches!(err, HoldingsError::InvalidOkapiUrl(_)));
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let err = OkapiData::new([("x-okapi-tenant", "diku")]).unwrap_err();
        assert!(matches!(err, HoldingsError::InvalidOkapiUrl(_)));
    }

    #[test]
    fn test_default_ports() {
        let okapi = OkapiData::new([("x-okapi-url", "http://localhost")]).unwrap();
        assert_eq!(okapi.okapi_host(), "localhost");
        assert_eq!(okapi.okapi_port(), 80);

        let okapi = OkapiData::new([("x-okapi-url", "https://folio.example.org")]).unwrap();
        assert_eq!(okapi.okapi_port(), 443);
    }

    #[test]
    fn test_lowercase_header_names() {
        let okapi = OkapiData::new([
            ("x-okapi-token", "test-token"),
            ("x-okapi-tenant", "test-tenant"),
            ("x-okapi-user-id", "test-user-id"),
            ("x-okapi-url", "http://localhost:9130"),
        ])
        .unwrap();

        assert_eq!(okapi.api_token(), Some("test-token"));
        assert_eq!(okapi.tenant(), Some("test-tenant"));
        assert_eq!(okapi.header("X-OKAPI-TENANT"), Some("test-tenant"));
    }

    #[test]
    fn test_from_header_map() {
        let mut map = HeaderMap::new();
        map.insert("X-Okapi-Url", "http://okapi:9130".parse().unwrap());
        map.insert("X-Okapi-Tenant", "diku".parse().unwrap());

        let okapi = OkapiData::from_header_map(&map).unwrap();
        assert_eq!(okapi.tenant(), Some("diku"));
        assert_eq!(okapi.user_id(), None);
        assert_eq!(okapi.okapi_host(), "okapi");
    }

    #[test]
    fn test_debug_hides_token() {
        let okapi = OkapiData::new(headers("http://localhost:9130")).unwrap();
        let debug = format!("{:?}", okapi);
        assert!(debug.contains("test-tenant"));
        assert!(!debug.contains("test-token"));
    }
}
