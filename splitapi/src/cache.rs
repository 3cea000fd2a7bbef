//! In-memory query result cache.
//!
//! Results are keyed by `{endpoint name}({argument as JSON})` and dropped
//! once they are older than the client's `keep_unused_data_for` duration.
//! The lock is never held across an `.await`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::QueryError;

/// Builds the cache key for an endpoint invocation.
///
/// ```
/// assert_eq!(splitapi::cache_key("getUsers", &()).unwrap(), "getUsers(null)");
/// ```
///
/// ## Errors
///
/// Returns [`QueryError::Serialization`] if `arg` cannot be serialized.
pub fn cache_key<A: Serialize + ?Sized>(endpoint: &str, arg: &A) -> Result<String, QueryError> {
    let arg = serde_json::to_string(arg)?;
    Ok(format!("{endpoint}({arg})"))
}

struct CacheEntry {
    endpoint: String,
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

/// Shared query result cache.
pub(crate) struct QueryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // Entries are plain values; a panic elsewhere cannot leave one half written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a fresh cached value for `key`, evicting it if expired.
    pub(crate) fn get<R>(&self, key: &str) -> Option<R>
    where
        R: Clone + 'static,
    {
        let mut entries = self.entries();
        let entry = entries.get(key)?;

        let age = entry.stored_at.elapsed();
        if age >= self.ttl {
            tracing::debug!(key, ?age, ttl = ?self.ttl, "Cache expired");
            entries.remove(key);
            return None;
        }

        let value = entry.value.downcast_ref::<R>().cloned();
        if value.is_some() {
            tracing::debug!(key, ?age, "Cache hit");
        }
        value
    }

    /// Stores `value` under `key`, dropping every expired entry first.
    pub(crate) fn insert<R>(&self, key: String, endpoint: &str, value: R)
    where
        R: Send + Sync + 'static,
    {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        let expired = before - entries.len();
        if expired > 0 {
            tracing::debug!(expired, "Cache evicted expired entries");
        }

        tracing::debug!(key = %key, "Cache store");
        entries.insert(
            key,
            CacheEntry {
                endpoint: endpoint.to_string(),
                value: Arc::new(value),
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every entry for `endpoint`. Returns how many were dropped.
    pub(crate) fn invalidate(&self, endpoint: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.endpoint != endpoint);
        let removed = before - entries.len();
        tracing::debug!(endpoint, removed, "Cache invalidated");
        removed
    }

    pub(crate) fn clear(&self) {
        self.entries().clear();
        tracing::debug!("Cache cleared");
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_includes_argument_json() {
        #[derive(Serialize)]
        struct Arg {
            page: u32,
        }

        assert_eq!(
            cache_key("listUsers", &Arg { page: 2 }).unwrap(),
            r#"listUsers({"page":2})"#
        );
    }

    #[test]
    fn test_hit_returns_clone() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("getUsers(null)".to_string(), "getUsers", vec![1, 2, 3]);

        assert_eq!(cache.get::<Vec<i32>>("getUsers(null)"), Some(vec![1, 2, 3]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_wrong_type_is_a_miss() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("k".to_string(), "e", 1_u8);
        assert_eq!(cache.get::<String>("k"), None);
    }

    #[test]
    fn test_zero_ttl_always_expires() {
        let cache = QueryCache::new(Duration::ZERO);
        cache.insert("k".to_string(), "e", 1_u8);
        assert_eq!(cache.get::<u8>("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_insert_evicts_expired_entries() {
        let cache = QueryCache::new(Duration::ZERO);
        for page in 0..1000 {
            cache.insert(format!("listUsers({page})"), "listUsers", page);
        }
        // Only the entry just stored survives; the rest expired before it.
        assert_eq!(cache.len(), 1);

        let cache = QueryCache::new(Duration::from_secs(60));
        for page in 0..100 {
            cache.insert(format!("listUsers({page})"), "listUsers", page);
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.get::<i32>("listUsers(0)"), Some(0));
    }

    #[test]
    fn test_invalidate_only_touches_one_endpoint() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("a(1)".to_string(), "a", 1_u8);
        cache.insert("a(2)".to_string(), "a", 2_u8);
        cache.insert("b(1)".to_string(), "b", 3_u8);

        assert_eq!(cache.invalidate("a"), 2);
        assert_eq!(cache.get::<u8>("b(1)"), Some(3));

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
