//! Cache trait for storing fetched match documents.
//!
//! This module defines the [`MatchCache`] trait that short-lived response caches
//! implement. Entries are keyed by [`CacheKey`] and expire on a fixed TTL.

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    error::Result,
    types::{CacheKey, RawProviderResult},
};

/// Time a cached document is trusted before it is considered stale.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of documents held by a default cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Trait for caching fetched match documents.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait MatchCache: Send + Sync {
    /// Retrieves a cached document.
    ///
    /// Returns `Ok(Some(result))` if a fresh entry exists, `Ok(None)` if the key
    /// is absent or its entry has expired.
    async fn get(&self, key: &CacheKey) -> Result<Option<RawProviderResult>>;

    /// Stores a document, overwriting any existing entry for the key.
    async fn put(&self, key: CacheKey, value: RawProviderResult) -> Result<()>;

    /// Returns the number of entries currently held, stale ones included.
    async fn len(&self) -> usize;

    /// Returns true if the cache holds no entries.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes every expired entry.
    ///
    /// Returns the number of entries removed.
    async fn invalidate_stale(&self) -> Result<usize>;

    /// Returns the TTL applied to entries.
    fn ttl(&self) -> Duration;
}
