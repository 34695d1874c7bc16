//! Query mode and provider source definitions.
//!
//! This module defines [`MatchMode`] for the temporal class of match data being
//! requested and [`ProviderSource`] for the upstream that produced a document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// Temporal class of match data requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Scheduled matches that have not kicked off.
    Upcoming,
    /// Matches currently in play.
    Live,
    /// Finished matches.
    Results,
}

impl MatchMode {
    /// All modes, in display order.
    pub const ALL: [Self; 3] = [Self::Upcoming, Self::Live, Self::Results];

    /// Returns the lowercase name of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "live" => Ok(Self::Live),
            "results" | "finished" => Ok(Self::Results),
            other => Err(MatchError::InvalidParameter(format!(
                "unknown match mode '{other}', expected upcoming, live or results"
            ))),
        }
    }
}

/// Upstream football-data API that produced a document.
///
/// The set is closed: normalization dispatches on this enum, so adding a
/// provider means adding a variant and its normalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderSource {
    /// football-data.org v4.
    #[serde(rename = "football-data.org")]
    FootballData,
    /// API-Football v3 (api-sports.io).
    #[serde(rename = "api-football")]
    ApiFootball,
    /// SportMonks football v3.
    #[serde(rename = "sportmonks")]
    Sportmonks,
}

impl ProviderSource {
    /// Fallback order used when no explicit priority is given.
    pub const DEFAULT_PRIORITY: [Self; 3] =
        [Self::FootballData, Self::ApiFootball, Self::Sportmonks];

    /// Returns the wire tag for this source.
    ///
    /// This is the value stored under the `"source"` key of a raw document.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::FootballData => "football-data.org",
            Self::ApiFootball => "api-football",
            Self::Sportmonks => "sportmonks",
        }
    }

    /// Looks up a source by its wire tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::DEFAULT_PRIORITY
            .into_iter()
            .find(|source| source.tag() == tag)
    }
}

impl fmt::Display for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
