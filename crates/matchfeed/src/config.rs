//! Provider credentials loaded from the environment.

use std::fmt;

use matchfeed_core::ProviderSource;
use tracing::debug;

/// Environment variables holding the football-data.org token, in lookup order.
const FOOTBALL_DATA_KEY_VARS: &[&str] = &["FOOTBALL_DATA_KEY"];

/// Environment variables holding the API-Football key, in lookup order.
const API_FOOTBALL_KEY_VARS: &[&str] = &["API_FOOTBALL_KEY", "API_SPORTS_KEY"];

/// Environment variables holding the SportMonks token, in lookup order.
const SPORTMONKS_KEY_VARS: &[&str] = &["SPORTMONKS_KEY", "SPORTS_MONK_KEY", "SPORTSMONK_KEY"];

/// Opaque per-provider credentials.
///
/// Values are passed to providers as-is and never validated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    /// football-data.org API token.
    pub football_data: Option<String>,
    /// API-Football API key.
    pub api_football: Option<String>,
    /// SportMonks API token.
    pub sportmonks: Option<String>,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ProviderCredentials")
            .field("football_data", &redact(&self.football_data))
            .field("api_football", &redact(&self.api_football))
            .field("sportmonks", &redact(&self.sportmonks))
            .finish()
    }
}

impl ProviderCredentials {
    /// Read credentials from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load a `.env` file (if present) into the environment, then read credentials.
    #[must_use]
    pub fn from_dotenv() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) => debug!(error = %e, "No .env file loaded"),
        }
        Self::from_env()
    }

    /// Read credentials through `lookup`, which maps a variable name to its value.
    ///
    /// The first non-empty value among a provider's variables wins.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|&name| lookup(name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        Self {
            football_data: first(FOOTBALL_DATA_KEY_VARS),
            api_football: first(API_FOOTBALL_KEY_VARS),
            sportmonks: first(SPORTMONKS_KEY_VARS),
        }
    }

    /// Returns the credential for `source`, if configured.
    #[must_use]
    pub fn get(&self, source: ProviderSource) -> Option<&str> {
        match source {
            ProviderSource::FootballData => self.football_data.as_deref(),
            ProviderSource::ApiFootball => self.api_football.as_deref(),
            ProviderSource::Sportmonks => self.sportmonks.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_primary_names() {
        let creds = ProviderCredentials::from_lookup(lookup(&[
            ("FOOTBALL_DATA_KEY", "fd"),
            ("API_FOOTBALL_KEY", "af"),
            ("SPORTMONKS_KEY", "sm"),
        ]));

        assert_eq!(creds.get(ProviderSource::FootballData), Some("fd"));
        assert_eq!(creds.get(ProviderSource::ApiFootball), Some("af"));
        assert_eq!(creds.get(ProviderSource::Sportmonks), Some("sm"));
    }

    #[test]
    fn test_from_lookup_aliases_and_empty_values() {
        let creds = ProviderCredentials::from_lookup(lookup(&[
            ("FOOTBALL_DATA_KEY", "  "),
            ("API_FOOTBALL_KEY", ""),
            ("API_SPORTS_KEY", "sports"),
            ("SPORTS_MONK_KEY", "monk"),
        ]));

        assert_eq!(creds.football_data, None);
        assert_eq!(creds.api_football.as_deref(), Some("sports"));
        assert_eq!(creds.sportmonks.as_deref(), Some("monk"));
    }

    #[test]
    fn test_debug_redacts_values() {
        let creds = ProviderCredentials {
            football_data: Some("very-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("None"));
    }
}
