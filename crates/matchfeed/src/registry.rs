//! Provider registry that tries match-data providers in priority order.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use matchfeed_core::{
    CanonicalMatch, MatchCache, MatchError, MatchMode, MatchProvider, MatchRequest,
    ProviderSource, RawProviderResult, Result, normalize,
};

use crate::config::ProviderCredentials;

/// Registry for managing match-data providers with automatic fallback.
///
/// Providers are tried in registration order until one returns a document.
/// Successful documents are stored in the optional cache under
/// `{league}_{mode}` and served from there until the cache's TTL expires.
/// Failed lookups are never cached.
///
/// # Example
///
/// ```rust,ignore
/// use matchfeed::{InMemoryCache, MatchMode, MatchProviderRegistry, ProviderCredentials};
/// use std::sync::Arc;
///
/// let registry = MatchProviderRegistry::from_credentials(&ProviderCredentials::from_env())
///     .set_cache(Arc::new(InMemoryCache::new()));
///
/// let matches = registry.fetch_normalized("PL", MatchMode::Upcoming).await?;
/// for m in matches {
///     println!("{} vs {}", m.home_team, m.away_team);
/// }
/// ```
#[derive(Default)]
pub struct MatchProviderRegistry {
    providers: Vec<Arc<dyn MatchProvider>>,
    cache: Option<Arc<dyn MatchCache>>,
}

impl std::fmt::Debug for MatchProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchProviderRegistry")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

impl MatchProviderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new registry with a cache.
    #[must_use]
    pub fn with_cache(cache: Arc<dyn MatchCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Default::default()
        }
    }

    /// Set the cache for this registry.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn MatchCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build a registry with every provider that has a credential, in the
    /// default priority order.
    #[must_use]
    pub fn from_credentials(credentials: &ProviderCredentials) -> Self {
        Self::from_credentials_with_priority(credentials, &ProviderSource::DEFAULT_PRIORITY)
    }

    /// Build a registry with the providers listed in `priority`, in that order.
    ///
    /// Providers without a credential, or whose crate feature is disabled,
    /// are skipped with a warning.
    #[must_use]
    pub fn from_credentials_with_priority(
        credentials: &ProviderCredentials,
        priority: &[ProviderSource],
    ) -> Self {
        let mut registry = Self::new();
        for &source in priority {
            let Some(key) = credentials.get(source) else {
                warn!(provider = source.tag(), "No credential configured, skipping provider");
                continue;
            };
            registry = registry.with_source(source, key);
        }
        registry
    }

    #[allow(unused_variables)]
    fn with_source(self, source: ProviderSource, key: &str) -> Self {
        match source {
            #[cfg(feature = "football-data")]
            ProviderSource::FootballData => self.with_football_data(key),
            #[cfg(feature = "api-football")]
            ProviderSource::ApiFootball => self.with_api_football(key),
            #[cfg(feature = "sportmonks")]
            ProviderSource::Sportmonks => self.with_sportmonks(key),
            #[allow(unreachable_patterns)]
            _ => {
                warn!(provider = source.tag(), "Provider feature disabled, skipping provider");
                self
            }
        }
    }

    /// Register a provider after those already registered.
    pub fn register(&mut self, provider: Arc<dyn MatchProvider>) {
        debug!(provider = provider.name(), "Registering match provider");
        self.providers.push(provider);
    }

    /// Register a provider and return the registry.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn MatchProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Registered provider sources in priority order.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderSource> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    /// Fetch the raw document for `league` and `mode`.
    ///
    /// See [`fetch_request`](Self::fetch_request).
    pub async fn fetch(&self, league: &str, mode: MatchMode) -> Result<RawProviderResult> {
        self.fetch_request(&MatchRequest::new(league, mode)).await
    }

    /// Fetch the raw document for a request, trying providers in order until
    /// one succeeds.
    ///
    /// A fresh cached document is returned without contacting any provider.
    /// Otherwise the first successful provider result is cached and returned.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ProviderNotConfigured`] if no provider is
    /// registered and [`MatchError::AllProvidersExhausted`] if every provider
    /// failed.
    pub async fn fetch_request(&self, request: &MatchRequest) -> Result<RawProviderResult> {
        if self.providers.is_empty() {
            return Err(MatchError::ProviderNotConfigured(
                "No match providers registered".to_string(),
            ));
        }

        let key = request.cache_key();

        if let Some(cache) = &self.cache {
            match cache.get(&key).await {
                Ok(Some(cached)) => {
                    debug!(
                        key = %key,
                        provider = cached.source.tag(),
                        "Cache hit for match data"
                    );
                    return Ok(cached);
                }
                Ok(None) => {}
                Err(e) => warn!(key = %key, error = %e, "Cache lookup failed"),
            }
        }

        for provider in &self.providers {
            debug!(
                provider = provider.name(),
                league = %request.league,
                mode = %request.mode,
                "Trying provider"
            );

            match provider.fetch_matches(request).await {
                Ok(result) => {
                    info!(
                        provider = provider.name(),
                        league = %request.league,
                        mode = %request.mode,
                        "Fetched match data"
                    );
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.put(key.clone(), result.clone()).await {
                            warn!(key = %key, error = %e, "Failed to cache match data");
                        }
                    }
                    return Ok(result);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Provider failed, trying next"
                    );
                }
            }
        }

        error!(
            league = %request.league,
            mode = %request.mode,
            "All providers failed"
        );
        Err(MatchError::AllProvidersExhausted {
            league: request.league.clone(),
            mode: request.mode,
        })
    }

    /// Fetch and normalize matches for `league` and `mode`.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`fetch`](Self::fetch) fails.
    pub async fn fetch_normalized(
        &self,
        league: &str,
        mode: MatchMode,
    ) -> Result<Vec<CanonicalMatch>> {
        let raw = self.fetch(league, mode).await?;
        Ok(normalize(&raw))
    }

    // Builder methods for the bundled providers

    /// Add the football-data.org provider.
    #[cfg(feature = "football-data")]
    #[must_use]
    pub fn with_football_data(self, api_key: &str) -> Self {
        self.with_provider(Arc::new(
            matchfeed_football_data::FootballDataProvider::new(api_key),
        ))
    }

    /// Add the API-Football provider.
    #[cfg(feature = "api-football")]
    #[must_use]
    pub fn with_api_football(self, api_key: &str) -> Self {
        self.with_provider(Arc::new(
            matchfeed_api_football::ApiFootballProvider::new(api_key),
        ))
    }

    /// Add the SportMonks provider.
    #[cfg(feature = "sportmonks")]
    #[must_use]
    pub fn with_sportmonks(self, api_token: &str) -> Self {
        self.with_provider(Arc::new(matchfeed_sportmonks::SportmonksProvider::new(
            api_token,
        )))
    }
}
