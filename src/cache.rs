//! In-memory TTL cache with single-flight loading.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;

/// Default time-to-live for cached entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Stamped<V> {
    value: V,
    stored_at: Instant,
}

impl<V> Stamped<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

type Slot<V> = Arc<OnceCell<Stamped<V>>>;

/// Key/value map whose entries disappear `ttl` after they were stored.
///
/// [`get_value_or_load`](Self::get_value_or_load) runs at most one loader per
/// key at a time; concurrent callers wait for and share its result.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current value for `key`, if stored and not expired.
    pub async fn get_value(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let stamped = entries.get(key).and_then(|slot| slot.get())?;
        if stamped.is_expired(self.ttl) {
            entries.remove(key);
            return None;
        }
        Some(stamped.value.clone())
    }

    /// Store `value`, replacing any existing entry and resetting its age.
    pub async fn put_value(&self, key: K, value: V) {
        let slot = Arc::new(OnceCell::new_with(Some(Stamped::new(value))));
        self.entries.lock().await.insert(key, slot);
    }

    /// Cached value for `key`, or the result of `loader`.
    ///
    /// Only one loader runs per key; other callers for the same key wait on
    /// it. A failed load stores nothing, so the next caller loads again.
    pub async fn get_value_or_load<F, Fut, E>(&self, key: K, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = {
            let mut entries = self.entries.lock().await;
            let live = entries
                .get(&key)
                .filter(|slot| !slot.get().is_some_and(|s| s.is_expired(self.ttl)))
                .cloned();
            match live {
                Some(slot) => slot,
                None => {
                    let slot: Slot<V> = Arc::new(OnceCell::new());
                    entries.insert(key, slot.clone());
                    slot
                }
            }
        };

        let stamped = slot
            .get_or_try_init(move || async move { loader().await.map(Stamped::new) })
            .await?;
        Ok(stamped.value.clone())
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.lock().await.remove(key);
    }

    /// Number of live (loaded and unexpired) entries.
    pub async fn len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|slot| slot.get().is_some_and(|s| !s.is_expired(self.ttl)))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put_value("user".to_string(), 1).await;
        assert_eq!(cache.get_value(&"user".to_string()).await, Some(1));
        assert_eq!(cache.get_value(&"other".to_string()).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put_value("user", 1).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get_value(&"user").await, Some(1));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get_value(&"user").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_runs_once_for_concurrent_callers() {
        let cache = TtlCache::<&str, u32>::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let load = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, ()>(7)
        };

        let (a, b, c) = tokio::join!(
            cache.get_value_or_load("user", load),
            cache.get_value_or_load("user", load),
            cache.get_value_or_load("user", load),
        );

        assert_eq!((a, b, c), (Ok(7), Ok(7), Ok(7)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = TtlCache::<&str, u32>::new(Duration::from_secs(60));

        let first = cache
            .get_value_or_load("user", || async { Err::<u32, _>("boom") })
            .await;
        assert_eq!(first, Err("boom"));
        assert_eq!(cache.get_value(&"user").await, None);

        let second = cache
            .get_value_or_load("user", || async { Ok::<_, &str>(3) })
            .await;
        assert_eq!(second, Ok(3));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_reloaded() {
        let cache = TtlCache::<&str, u32>::new(Duration::from_secs(10));
        cache.put_value("user", 1).await;

        tokio::time::advance(Duration::from_secs(11)).await;
        let value = cache
            .get_value_or_load("user", || async { Ok::<_, ()>(2) })
            .await;
        assert_eq!(value, Ok(2));
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = TtlCache::<&str, u32>::default();
        cache.put_value("user", 1).await;
        cache.invalidate(&"user").await;
        assert_eq!(cache.get_value(&"user").await, None);
    }
}
