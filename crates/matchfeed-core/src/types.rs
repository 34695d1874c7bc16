//! Core data types for football match data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`MatchRequest`] - League and mode of a single retrieval
//! - [`CacheKey`] - Cache identity of a request
//! - [`RawProviderResult`] - A provider's JSON document tagged with its source
//! - [`CanonicalMatch`] - Provider-independent match record
//! - [`Score`] - Home/away goals of a [`CanonicalMatch`]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::mode::{MatchMode, ProviderSource};

/// A single match-data retrieval request.
///
/// The league identifier is opaque: it is passed to each provider verbatim,
/// without translation between provider-specific conventions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Provider-native league identifier (e.g. `"PL"`, `"39"`).
    pub league: String,
    /// Temporal class of matches requested.
    pub mode: MatchMode,
}

impl MatchRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(league: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            league: league.into(),
            mode,
        }
    }

    /// Returns the cache identity of this request.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.league.clone(), self.mode)
    }
}

impl fmt::Display for MatchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.league, self.mode)
    }
}

/// Cache identity of a [`MatchRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// League identifier.
    pub league: String,
    /// Query mode.
    pub mode: MatchMode,
}

impl CacheKey {
    /// Creates a new cache key.
    #[must_use]
    pub fn new(league: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            league: league.into(),
            mode,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.league, self.mode)
    }
}

impl From<&MatchRequest> for CacheKey {
    fn from(request: &MatchRequest) -> Self {
        request.cache_key()
    }
}

/// A provider's raw JSON document, tagged with the provider that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawProviderResult {
    /// Provider that produced the payload.
    pub source: ProviderSource,
    /// The provider's response body, untouched.
    pub payload: Value,
}

impl RawProviderResult {
    /// Key under which [`into_document`](Self::into_document) stores the source tag.
    pub const SOURCE_KEY: &'static str = "source";

    /// Creates a new tagged result.
    #[must_use]
    pub const fn new(source: ProviderSource, payload: Value) -> Self {
        Self { source, payload }
    }

    /// Converts into a single JSON document with the source tag inlined.
    ///
    /// A non-object payload is wrapped as `{"source": ..., "payload": ...}`.
    #[must_use]
    pub fn into_document(self) -> Value {
        let mut map = match self.payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("payload".to_string(), other);
                map
            }
        };
        map.insert(
            Self::SOURCE_KEY.to_string(),
            Value::String(self.source.tag().to_string()),
        );
        Value::Object(map)
    }

    /// Reads a document produced by [`into_document`](Self::into_document).
    ///
    /// Returns `None` if the document has no recognized source tag.
    #[must_use]
    pub fn from_document(mut document: Value) -> Option<Self> {
        let map = document.as_object_mut()?;
        let source = map
            .get(Self::SOURCE_KEY)
            .and_then(Value::as_str)
            .and_then(ProviderSource::from_tag)?;
        map.remove(Self::SOURCE_KEY);
        Some(Self::new(source, document))
    }
}

/// Home and away goals; either side may be unknown (e.g. before kick-off).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Goals scored by the home team.
    pub home: Option<u32>,
    /// Goals scored by the away team.
    pub away: Option<u32>,
}

impl Score {
    /// Creates a new score.
    #[must_use]
    pub const fn new(home: Option<u32>, away: Option<u32>) -> Self {
        Self { home, away }
    }
}

/// Provider-independent match record.
///
/// Team names are always populated; every other field degrades to `None`
/// when the provider omits it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMatch {
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home team crest/logo URL.
    pub home_logo: Option<String>,
    /// Away team crest/logo URL.
    pub away_logo: Option<String>,
    /// Round or matchday label.
    pub matchday: Option<String>,
    /// Human-readable kick-off time, or the raw timestamp if it did not parse.
    pub date: Option<String>,
    /// Provider-native status string.
    pub status: Option<String>,
    /// Full-time (or current) score.
    pub score: Score,
}

impl CanonicalMatch {
    /// Team name used when a provider record lacks one.
    pub const UNKNOWN_TEAM: &'static str = "TBD";

    /// Creates a record with the two team names and nothing else.
    #[must_use]
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_logo: None,
            away_logo: None,
            matchday: None,
            date: None,
            status: None,
            score: Score::default(),
        }
    }
}
