//! Error types for match-data operations.
//!
//! This module defines [`MatchError`] which covers every failure that can occur
//! while fetching match data from a provider, falling back across providers, or
//! interacting with the response cache.

use thiserror::Error;

use crate::mode::{MatchMode, ProviderSource};

/// Errors that can occur during match-data operations.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A single provider could not produce a usable document.
    ///
    /// Covers transport failures, timeouts, non-2xx responses and bodies that
    /// are not a JSON object. The registry recovers from this by moving on to
    /// the next provider; it is never returned from a registry fetch.
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable {
        /// The provider that failed.
        provider: ProviderSource,
        /// Human-readable failure reason.
        reason: String,
    },

    /// Every registered provider failed for the request.
    #[error("All providers failed to fetch {mode} matches for {league}")]
    AllProvidersExhausted {
        /// League identifier of the failed request.
        league: String,
        /// Mode of the failed request.
        mode: MatchMode,
    },

    /// No provider is registered, or the requested provider is not configured.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl MatchError {
    /// Builds a [`MatchError::ProviderUnavailable`] for `provider`.
    #[must_use]
    pub fn unavailable(provider: ProviderSource, reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider,
            reason: reason.into(),
        }
    }

    /// Returns true if this error is a recoverable single-provider failure.
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. })
    }
}

/// Result type alias using [`MatchError`].
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = MatchError::unavailable(ProviderSource::ApiFootball, "HTTP 500");
        assert_eq!(err.to_string(), "api-football unavailable: HTTP 500");
        assert!(err.is_provider_failure());
    }

    #[test]
    fn test_exhausted_display() {
        let err = MatchError::AllProvidersExhausted {
            league: "PL".to_string(),
            mode: MatchMode::Live,
        };
        assert_eq!(
            err.to_string(),
            "All providers failed to fetch live matches for PL"
        );
        assert!(!err.is_provider_failure());
    }
}
