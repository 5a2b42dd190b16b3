use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<DateTime<Utc>>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Keyed value store where every entry has an independent optional TTL.
///
/// Expired entries are evicted on read. Writers always win: `set` replaces
/// any existing entry and its deadline.
#[derive(Debug, Default)]
pub struct ExpiringCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key`, returning the value only while it is unexpired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            debug!(key, "cache entry expired");
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`. With `ttl = None` the entry never expires
    /// on its own and lives until overwritten or removed.
    pub fn set(&self, key: &str, value: V, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Utc::now() + ttl);
        self.lock().insert(key.to_string(), CacheEntry { value, expires_at });
    }

    /// Drop `key`, returning the value it held (expired or not).
    pub fn remove(&self, key: &str) -> Option<V> {
        self.lock().remove(key).map(|entry| entry.value)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_without_ttl_never_expires() {
        let cache = ExpiringCache::new();
        cache.set("csrf", "token".to_string(), None);
        assert_eq!(cache.get("csrf"), Some("token".to_string()));
    }

    #[test]
    fn test_get_before_expiry() {
        let cache = ExpiringCache::new();
        cache.set("user", 1, Some(Duration::hours(1)));
        assert_eq!(cache.get("user"), Some(1));
    }

    #[test]
    fn test_get_after_expiry() {
        let cache = ExpiringCache::new();
        cache.set("user", 1, Some(Duration::milliseconds(10)));
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(cache.get("user"), None);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = ExpiringCache::new();
        cache.set("status_line", "x".to_string(), Some(Duration::zero()));
        assert_eq!(cache.get("status_line"), None);
    }

    #[test]
    fn test_keys_expire_independently() {
        let cache = ExpiringCache::new();
        cache.set("short", 1, Some(Duration::milliseconds(10)));
        cache.set("long", 2, Some(Duration::hours(1)));
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[test]
    fn test_remove_evicts() {
        let cache = ExpiringCache::new();
        cache.set("status_line", "x".to_string(), Some(Duration::hours(1)));
        assert_eq!(cache.remove("status_line"), Some("x".to_string()));
        assert_eq!(cache.get("status_line"), None);
        assert_eq!(cache.remove("status_line"), None);
    }

    #[test]
    fn test_set_overwrites_value_and_ttl() {
        let cache = ExpiringCache::new();
        cache.set("key", 1, Some(Duration::zero()));
        cache.set("key", 2, Some(Duration::hours(1)));
        assert_eq!(cache.get("key"), Some(2));
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = ExpiringCache::new();
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }
}
