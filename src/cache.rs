use chrono::{Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::FvResult,
    store::{SharedStore, namespaced},
};

pub static DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    expiry: i64,
}

/// Expiring JSON entries on top of a [`crate::store::KvStore`].
///
/// Entries are only checked when read; nothing is evicted in the background.
#[derive(Clone)]
pub struct Cache {
    store: SharedStore,
    clock: fn() -> i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn cache_key(key: &str) -> String {
    namespaced(&format!("cache_{key}"))
}

impl Cache {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            clock: now_millis,
        }
    }

    pub fn with_clock(store: SharedStore, clock: fn() -> i64) -> Self {
        Self { store, clock }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> FvResult<Option<T>> {
        let full_key = cache_key(key);
        let Some(raw) = self.store.get(&full_key).await? else {
            debug!("[Cache Miss] {key}");
            return Ok(None);
        };

        match serde_json::from_str::<CacheEntry<T>>(&raw) {
            Ok(entry) => {
                if (self.clock)() > entry.expiry {
                    debug!("[Cache Expired] {key}");
                    self.store.delete(&full_key).await?;
                    Ok(None)
                } else {
                    debug!("[Cache Hit] {key}");
                    Ok(Some(entry.data))
                }
            }
            Err(err) => {
                warn!("[Cache Corrupt] {key}: {err}");
                self.store.delete(&full_key).await?;
                Ok(None)
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) -> FvResult<()> {
        let entry = CacheEntry {
            data,
            expiry: (self.clock)().saturating_add(ttl.num_milliseconds()),
        };
        let raw = serde_json::to_string(&entry)?;

        self.store.set(&cache_key(key), &raw).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    };

    use super::*;
    use crate::store::MemoryStore;

    static FAKE_NOW: AtomicI64 = AtomicI64::new(1_700_000_000_000);

    fn fake_now() -> i64 {
        FAKE_NOW.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_get_before_and_after_ttl() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::with_clock(store.clone(), fake_now);

        cache
            .set("k", &vec![1, 2, 3], Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(
            cache.get::<Vec<i32>>("k").await.unwrap(),
            Some(vec![1, 2, 3])
        );

        FAKE_NOW.fetch_add(Duration::hours(25).num_milliseconds(), Ordering::SeqCst);
        assert_eq!(cache.get::<Vec<i32>>("k").await.unwrap(), None);
        assert_eq!(store.get("eps_cache_k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_negative_ttl_is_already_expired() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        cache
            .set("k", &"v".to_string(), Duration::milliseconds(-1))
            .await
            .unwrap();
        assert_eq!(cache.get::<String>("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        cache
            .set("k", &1, Duration::hours(2_562_047_788_015))
            .await
            .unwrap();
        assert_eq!(cache.get::<i32>("k").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        cache.set("k", &1, Duration::hours(1)).await.unwrap();
        cache.set("k", &2, Duration::hours(1)).await.unwrap();
        assert_eq!(cache.get::<i32>("k").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.set("eps_cache_k", "{not json").await.unwrap();

        let cache = Cache::new(store.clone());
        assert_eq!(cache.get::<i32>("k").await.unwrap(), None);
        assert_eq!(store.get("eps_cache_k").await.unwrap(), None);
    }
}
