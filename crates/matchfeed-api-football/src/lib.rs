#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/matchfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! API-Football match-data provider.
//!
//! This crate implements [`MatchProvider`] for the
//! [API-Football](https://www.api-football.com/) v3 `/fixtures` endpoint.
//!
//! # Usage
//!
//! ```rust,ignore
//! use matchfeed_api_football::ApiFootballProvider;
//! use matchfeed_core::{MatchMode, MatchProvider, MatchRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = ApiFootballProvider::new("your_api_key");
//!
//!     let request = MatchRequest::new("39", MatchMode::Results);
//!     let raw = provider.fetch_matches(&request).await?;
//!     println!("{}", raw.payload["response"]);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use matchfeed_core::{
    MatchError, MatchMode, MatchProvider, MatchRequest, ProviderSource, REQUEST_TIMEOUT,
    RawProviderResult, Result, parse_document,
};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Base URL for the API-Football v3 API.
const API_FOOTBALL_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Header carrying the API key.
const AUTH_HEADER: &str = "x-apisports-key";

/// Number of fixtures requested for upcoming and finished queries.
const FIXTURE_WINDOW: &str = "10";

/// API-Football data provider.
#[derive(Clone)]
pub struct ApiFootballProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for ApiFootballProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFootballProvider")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiFootballProvider {
    /// Create a new provider with the given API key.
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
            base_url: API_FOOTBALL_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different API root (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the `/fixtures` query parameters for a request.
    ///
    /// Live fixtures are not filtered by league.
    fn fixture_query(request: &MatchRequest) -> Vec<(&'static str, String)> {
        match request.mode {
            MatchMode::Upcoming => vec![
                ("league", request.league.clone()),
                ("next", FIXTURE_WINDOW.to_string()),
            ],
            MatchMode::Live => vec![("live", "all".to_string())],
            MatchMode::Results => vec![
                ("league", request.league.clone()),
                ("last", FIXTURE_WINDOW.to_string()),
            ],
        }
    }

    fn unavailable(reason: impl Into<String>) -> MatchError {
        MatchError::unavailable(ProviderSource::ApiFootball, reason)
    }

    /// Make a GET request against `/fixtures` and parse the JSON document.
    async fn get_fixtures(&self, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/fixtures", self.base_url);
        debug!(url, ?query, "API-Football request");

        let response = self
            .client
            .get(&url)
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

        let document = parse_document(ProviderSource::ApiFootball, status.as_u16(), &text)?;

        // API-Football reports bad keys and exhausted quotas with HTTP 200.
        if let Some(errors) = reported_errors(&document) {
            return Err(Self::unavailable(format!("API errors: {errors}")));
        }

        Ok(document)
    }
}

/// Returns the `errors` member if it reports at least one error.
fn reported_errors(document: &Value) -> Option<&Value> {
    let errors = document.get("errors")?;
    let reported = match errors {
        Value::Object(map) => !map.is_empty(),
        Value::Array(list) => !list.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => false,
    };
    reported.then_some(errors)
}

#[async_trait]
impl MatchProvider for ApiFootballProvider {
    fn source(&self) -> ProviderSource {
        ProviderSource::ApiFootball
    }

    async fn fetch_matches(&self, request: &MatchRequest) -> Result<RawProviderResult> {
        let query = Self::fixture_query(request);
        self.get_fixtures(&query)
            .await
            .map(|document| RawProviderResult::new(self.source(), document))
            .inspect_err(|e| {
                warn!(
                    provider = self.name(),
                    league = %request.league,
                    error = %e,
                    "Request failed"
                );
            })
    }
}
