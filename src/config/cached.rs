use std::sync::Arc;

use async_trait::async_trait;

use super::service::ConfigurationService;
use super::{Configuration, ConfigurationError};
use crate::cache::TtlCache;
use crate::error::Result;
use crate::okapi::OkapiData;

/// Caches another [`ConfigurationService`] per user id.
///
/// Retrieval is single-flight per user. Verified configurations are stored
/// back into the cache marked valid, so later verifications skip RMAPI.
pub struct CachedConfigurationService<S> {
    inner: S,
    cache: Arc<TtlCache<String, Configuration>>,
}

impl<S> CachedConfigurationService<S> {
    pub fn new(inner: S, cache: Arc<TtlCache<String, Configuration>>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<TtlCache<String, Configuration>> {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CachedConfigurationService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedConfigurationService")
            .field("inner", &self.inner)
            .field("ttl", &self.cache.ttl())
            .finish()
    }
}

fn user_key(okapi: &OkapiData) -> Option<String> {
    okapi
        .user_id()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S: ConfigurationService> ConfigurationService for CachedConfigurationService<S> {
    async fn retrieve_configuration(&self, okapi: &OkapiData) -> Result<Configuration> {
        let Some(user_id) = user_key(okapi) else {
            tracing::debug!("No user id on request, skipping configuration cache");
            return self.inner.retrieve_configuration(okapi).await;
        };

        self.cache
            .get_value_or_load(user_id, || self.inner.retrieve_configuration(okapi))
            .await
    }

    async fn verify_credentials(
        &self,
        config: &Configuration,
        okapi: &OkapiData,
    ) -> Result<Vec<ConfigurationError>> {
        if config.is_valid() {
            return Ok(Vec::new());
        }

        let errors = self.inner.verify_credentials(config, okapi).await?;
        if !errors.is_empty() {
            return Ok(errors);
        }

        match user_key(okapi) {
            Some(user_id) => {
                self.cache.put_value(user_id, config.validated()).await;
                Ok(Vec::new())
            }
            None => Ok(vec![ConfigurationError::new("User id is empty")]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HoldingsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingService {
        retrieves: AtomicUsize,
        verifies: AtomicUsize,
        reject: bool,
    }

    #[async_trait]
    impl ConfigurationService for CountingService {
        async fn retrieve_configuration(&self, _okapi: &OkapiData) -> Result<Configuration> {
            self.retrieves.fetch_add(1, Ordering::SeqCst);
            Ok(Configuration::new("CUST", "KEY", "https://sandbox.ebsco.io"))
        }

        async fn verify_credentials(
            &self,
            _config: &Configuration,
            _okapi: &OkapiData,
        ) -> Result<Vec<ConfigurationError>> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Ok(vec![ConfigurationError::new("KB API Credentials are invalid")])
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn okapi(user_id: Option<&str>) -> OkapiData {
        let mut headers = vec![
            ("X-Okapi-Url", "http://localhost:9130"),
            ("X-Okapi-Tenant", "diku"),
        ];
        if let Some(id) = user_id {
            headers.push(("X-Okapi-User-Id", id));
        }
        OkapiData::new(headers).unwrap()
    }

    fn service(reject: bool) -> CachedConfigurationService<CountingService> {
        CachedConfigurationService::new(
            CountingService {
                reject,
                ..Default::default()
            },
            Arc::new(TtlCache::default()),
        )
    }

    #[tokio::test]
    async fn test_retrieve_is_cached_per_user() {
        let service = service(false);
        let okapi = okapi(Some("user-1"));

        service.retrieve_configuration(&okapi).await.unwrap();
        service.retrieve_configuration(&okapi).await.unwrap();

        assert_eq!(service.inner().retrieves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retrieve_without_user_bypasses_cache() {
        let service = service(false);
        let okapi = okapi(None);

        service.retrieve_configuration(&okapi).await.unwrap();
        service.retrieve_configuration(&okapi).await.unwrap();

        assert_eq!(service.inner().retrieves.load(Ordering::SeqCst), 2);
        assert!(service.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_valid_configuration_skips_delegate() {
        let service = service(true);
        let config = Configuration::new("CUST", "KEY", "https://sandbox.ebsco.io").validated();

        let errors = service
            .verify_credentials(&config, &okapi(Some("user-1")))
            .await
            .unwrap();

        assert!(errors.is_empty());
        assert_eq!(service.inner().verifies.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_verify_stores_validated_config() {
        let service = service(false);
        let config = Configuration::new("CUST", "KEY", "https://sandbox.ebsco.io");

        let errors = service
            .verify_credentials(&config, &okapi(Some("user-1")))
            .await
            .unwrap();
        assert!(errors.is_empty());

        let cached = service.cache().get_value(&"user-1".to_string()).await.unwrap();
        assert!(cached.is_valid());
        assert_eq!(cached.customer_id.as_deref(), Some("CUST"));
    }

    #[tokio::test]
    async fn test_rejected_verify_is_not_cached() {
        let service = service(true);
        let config = Configuration::new("CUST", "KEY", "https://sandbox.ebsco.io");

        let errors = service
            .verify_credentials(&config, &okapi(Some("user-1")))
            .await
            .unwrap();

        assert_eq!(errors[0].message, "KB API Credentials are invalid");
        assert!(service.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_verify_without_user_id() {
        let service = service(false);
        let config = Configuration::new("CUST", "KEY", "https://sandbox.ebsco.io");

        let errors = service.verify_credentials(&config, &okapi(None)).await.unwrap();

        assert_eq!(errors, vec![ConfigurationError::new("User id is empty")]);
        assert!(service.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_retrieve_is_retried() {
        struct Failing(AtomicUsize);

        #[async_trait]
        impl ConfigurationService for Failing {
            async fn retrieve_configuration(&self, _: &OkapiData) -> Result<Configuration> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Err(HoldingsError::ConfigurationService {
                    status: 500,
                    body: "down".into(),
                })
            }

            async fn verify_credentials(
                &self,
                _: &Configuration,
                _: &OkapiData,
            ) -> Result<Vec<ConfigurationError>> {
                Ok(Vec::new())
            }
        }

        let service = CachedConfigurationService::new(
            Failing(AtomicUsize::new(0)),
            Arc::new(TtlCache::default()),
        );
        let okapi = okapi(Some("user-1"));

        assert!(service.retrieve_configuration(&okapi).await.is_err());
        assert!(service.retrieve_configuration(&okapi).await.is_err());
        assert_eq!(service.inner().0.load(Ordering::SeqCst), 2);
    }
}
