#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/matchfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! football-data.org match-data provider.
//!
//! This crate implements [`MatchProvider`] for the
//! [football-data.org](https://www.football-data.org/) v4 API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use matchfeed_football_data::FootballDataProvider;
//! use matchfeed_core::{MatchMode, MatchProvider, MatchRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = FootballDataProvider::new("your_api_key");
//!
//!     let request = MatchRequest::new("PL", MatchMode::Upcoming);
//!     let raw = provider.fetch_matches(&request).await?;
//!     println!("{}", raw.payload["matches"]);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use matchfeed_core::{
    MatchError, MatchMode, MatchProvider, MatchRequest, ProviderSource, REQUEST_TIMEOUT,
    RawProviderResult, Result, parse_document,
};
use reqwest::{Client, Url};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Base URL for the football-data.org v4 API.
const FOOTBALL_DATA_BASE_URL: &str = "https://api.football-data.org/v4";

/// Header carrying the API token.
const AUTH_HEADER: &str = "X-Auth-Token";

/// football-data.org data provider.
///
/// Serves scheduled, live and finished matches of one competition from
/// `/competitions/{league}/matches`.
#[derive(Clone)]
pub struct FootballDataProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for FootballDataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FootballDataProvider")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FootballDataProvider {
    /// Create a new provider with the given API token.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    /// Create a new provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: FOOTBALL_DATA_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different API root (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Maps a mode onto football-data.org's status vocabulary.
    const fn status_filter(mode: MatchMode) -> &'static str {
        match mode {
            MatchMode::Upcoming => "SCHEDULED",
            MatchMode::Live => "LIVE",
            MatchMode::Results => "FINISHED",
        }
    }

    /// Build the endpoint URL and query parameters for a request.
    ///
    /// The league is percent-encoded as a single path segment.
    fn endpoint(
        &self,
        request: &MatchRequest,
    ) -> Result<(Url, [(&'static str, &'static str); 1])> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Self::unavailable(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Self::unavailable("base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(["competitions", request.league.as_str(), "matches"]);
        Ok((url, [("status", Self::status_filter(request.mode))]))
    }

    fn unavailable(reason: impl Into<String>) -> MatchError {
        MatchError::unavailable(ProviderSource::FootballData, reason)
    }

    /// Make a GET request and parse the JSON document.
    async fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<Value> {
        debug!(url = %url, ?query, "football-data.org request");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(AUTH_HEADER, &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Self::unavailable(format!("timed out after {REQUEST_TIMEOUT:?}"))
                } else {
                    Self::unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        parse_document(ProviderSource::FootballData, status.as_u16(), &text)
    }
}

#[async_trait]
impl MatchProvider for FootballDataProvider {
    fn source(&self) -> ProviderSource {
        ProviderSource::FootballData
    }

    async fn fetch_matches(&self, request: &MatchRequest) -> Result<RawProviderResult> {
        let result = match self.endpoint(request) {
            Ok((url, query)) => self.get(url, &query).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(document) => Ok(RawProviderResult::new(self.source(), document)),
            Err(e) => {
                warn!(
                    provider = self.name(),
                    league = %request.league,
                    error = %e,
                    "Request failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn provider_for(server: &MockServer) -> FootballDataProvider {
        FootballDataProvider::new("test-token").with_base_url(server.uri())
    }

    #[test]
    fn test_endpoint_per_mode() {
        let provider = FootballDataProvider::new("key");
        let endpoint = |mode| provider.endpoint(&MatchRequest::new("PL", mode)).unwrap();

        let (url, query) = endpoint(MatchMode::Upcoming);
        assert_eq!(
            url.as_str(),
            "https://api.football-data.org/v4/competitions/PL/matches"
        );
        assert_eq!(query, [("status", "SCHEDULED")]);

        assert_eq!(endpoint(MatchMode::Live).1, [("status", "LIVE")]);
        assert_eq!(endpoint(MatchMode::Results).1, [("status", "FINISHED")]);
    }

    #[test]
    fn test_endpoint_escapes_league() {
        let provider = FootballDataProvider::new("key");
        let (url, _) = provider
            .endpoint(&MatchRequest::new("PL/../../areas?x=1#", MatchMode::Live))
            .unwrap();

        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[..2], ["v4", "competitions"]);
        assert_eq!(segments[3], "matches");
        assert!(!segments[2].contains('/'));
        assert!(!segments[2].contains('?'));
    }

    #[tokio::test]
    async fn test_fetch_league_stays_in_competition_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/competitions/A%2FB%3Fx/matches"))
            .and(query_param("status", "LIVE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .fetch_matches(&MatchRequest::new("A/B?x", MatchMode::Live))
            .await
            .unwrap();

        assert_eq!(result.source, ProviderSource::FootballData);
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = FootballDataProvider::new("super-secret");
        let debug = format!("{provider:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_fetch_success_is_tagged() {
        let server = MockServer::start().await;
        let body = json!({ "matches": [{ "homeTeam": { "name": "Arsenal FC" } }] });

        Mock::given(method("GET"))
            .and(path("/competitions/PL/matches"))
            .and(query_param("status", "FINISHED"))
            .and(header("X-Auth-Token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .fetch_matches(&MatchRequest::new("PL", MatchMode::Results))
            .await
            .unwrap();

        assert_eq!(result.source, ProviderSource::FootballData);
        assert_eq!(result.payload, body);
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/competitions/PL/matches"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .fetch_matches(&MatchRequest::new("PL", MatchMode::Live))
            .await
            .unwrap_err();

        assert!(err.is_provider_failure());
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .fetch_matches(&MatchRequest::new("PL", MatchMode::Upcoming))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MatchError::ProviderUnavailable {
                provider: ProviderSource::FootballData,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_object_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .fetch_matches(&MatchRequest::new("PL", MatchMode::Upcoming))
            .await;

        assert!(result.is_err());
    }
}
