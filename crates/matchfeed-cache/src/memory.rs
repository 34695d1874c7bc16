//! In-memory cache implementation.

use async_trait::async_trait;
use lru::LruCache;
use matchfeed_core::{
    CacheKey, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, MatchCache, RawProviderResult, Result,
};
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: RawProviderResult,
    cached_at: Instant,
}

impl CacheEntry {
    fn new(data: RawProviderResult) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// Bounded, time-expiring in-memory cache.
///
/// Entries live in an [`LruCache`] behind a single mutex. Lookups only `peek`,
/// so eviction order is insertion order: once the cache is full, storing a new
/// key evicts the entry that was inserted longest ago. Overwriting a key makes
/// it the newest entry. Expired entries are removed when looked up or by
/// [`invalidate_stale`](MatchCache::invalidate_stale).
#[derive(Debug)]
pub struct InMemoryCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl InMemoryCache {
    /// Create a cache with the default capacity (50) and TTL (300 seconds).
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }

    /// Create a cache with a custom capacity and TTL.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_settings(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Returns the maximum number of entries.
    pub async fn capacity(&self) -> usize {
        self.entries.lock().await.cap().get()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchCache for InMemoryCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &CacheKey) -> Result<Option<RawProviderResult>> {
        let mut entries = self.entries.lock().await;
        match entries.peek(key) {
            Some(entry) if entry.is_stale(self.ttl) => {
                debug!(age = ?entry.cached_at.elapsed(), "Cache entry expired");
                entries.pop(key);
                Ok(None)
            }
            Some(entry) => {
                debug!("Cache hit");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, value), fields(key = %key, source = %value.source))]
    async fn put(&self, key: CacheKey, value: RawProviderResult) -> Result<()> {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(key.clone(), CacheEntry::new(value)) {
            if evicted != key {
                debug!(evicted = %evicted, "Evicted oldest cache entry");
            }
        }
        debug!(size = entries.len(), "Cached provider result");
        Ok(())
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self) -> Result<usize> {
        let mut entries = self.entries.lock().await;
        let stale: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_stale(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }

        if !stale.is_empty() {
            debug!("Invalidated {} stale cache entries", stale.len());
        }

        Ok(stale.len())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
