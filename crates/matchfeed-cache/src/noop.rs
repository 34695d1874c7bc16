//! No-op cache implementation.

use async_trait::async_trait;
use matchfeed_core::{CacheKey, MatchCache, RawProviderResult, Result};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` always returns `Ok(())`, so every
/// request walks the provider chain. Useful for disabling caching.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MatchCache for NoopCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<RawProviderResult>> {
        trace!("NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _key: CacheKey, _value: RawProviderResult) -> Result<()> {
        trace!("NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn len(&self) -> usize {
        0
    }

    async fn invalidate_stale(&self) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }
}
