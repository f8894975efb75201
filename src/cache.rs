//! Process-lifetime caches holding one keyed value at a time.
//!
//! A cache is either empty or holds a single `(key, payload)` entry. The entry
//! is only ever replaced wholesale, so readers observe either the old or the
//! new complete payload. Refreshes are serialized per cache: concurrent callers
//! asking for the same stale key wait on one fetch instead of issuing their own.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

#[derive(Debug)]
struct CacheEntry<K, T> {
    key: K,
    payload: Arc<T>,
}

#[derive(Debug)]
pub struct KeyedCache<K, T> {
    name: &'static str,
    slot: RwLock<Option<CacheEntry<K, T>>>,
    refresh: Mutex<()>,
}

impl<K, T> KeyedCache<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Cached payload if it was stored under `key`.
    pub async fn get(&self, key: &K) -> Option<Arc<T>> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|entry| &entry.key == key)
            .map(|entry| Arc::clone(&entry.payload))
    }

    /// Key of the current entry, if any.
    pub async fn key(&self) -> Option<K> {
        self.slot.read().await.as_ref().map(|entry| entry.key.clone())
    }

    /// Replace the whole entry.
    pub async fn replace(&self, key: K, payload: T) -> Arc<T> {
        let payload = Arc::new(payload);
        *self.slot.write().await = Some(CacheEntry {
            key,
            payload: Arc::clone(&payload),
        });
        payload
    }

    /// Return the payload cached under `key`, or run `fetch` and store what it
    /// yields. When `fetch` yields `None` the existing entry is left untouched.
    pub async fn refresh_if_stale<F, Fut>(&self, key: K, fetch: F) -> Option<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        if let Some(hit) = self.get(&key).await {
            debug!(cache = self.name, key = ?key, "cache hit");
            return Some(hit);
        }

        let _refreshing = self.refresh.lock().await;
        if let Some(hit) = self.get(&key).await {
            debug!(cache = self.name, key = ?key, "cache filled while waiting");
            return Some(hit);
        }

        debug!(cache = self.name, key = ?key, "cache miss");
        let payload = fetch().await?;
        info!(cache = self.name, key = ?key, "cache refreshed");
        Some(self.replace(key, payload).await)
    }
}
