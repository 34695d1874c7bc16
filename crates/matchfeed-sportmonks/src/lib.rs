#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/matchfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SportMonks match-data provider.
//!
//! This crate provides a SportMonks data provider that implements the
//! [`MatchProvider`] trait from `matchfeed-core`.
//!
//! # Features
//!
//! - Upcoming and finished fixtures through the `fixtures/between` date-range endpoint
//! - Live matches through `livescores/now`
//! - Participants included in every response
//!
//! # Example
//!
//! ```no_run
//! use matchfeed_sportmonks::SportmonksProvider;
//! use matchfeed_core::{MatchMode, MatchProvider, MatchRequest};
//!
//! # async fn example() -> matchfeed_core::Result<()> {
//! let provider = SportmonksProvider::new("your_api_token");
//! let request = MatchRequest::new("8", MatchMode::Upcoming);
//!
//! let raw = provider.fetch_matches(&request).await?;
//! println!("Fetched {} fixtures", raw.payload["data"].as_array().map_or(0, Vec::len));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use matchfeed_core::{
    MatchError, MatchMode, MatchProvider, MatchRequest, ProviderSource, REQUEST_TIMEOUT,
    RawProviderResult, Result, parse_document,
};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// SportMonks football v3 API base URL.
const SPORTMONKS_BASE_URL: &str = "https://api.sportmonks.com/v3/football";

/// Related entities requested with every fixture.
const INCLUDES: &str = "participants";

/// Width of the date range used for upcoming and finished fixtures.
const WINDOW_DAYS: Days = Days::new(7);

/// SportMonks data provider.
///
/// Implements [`MatchProvider`].
#[derive(Clone)]
pub struct SportmonksProvider {
    client: Client,
    api_token: String,
    base_url: String,
}

impl fmt::Debug for SportmonksProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SportmonksProvider")
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SportmonksProvider {
    /// Create a new SportMonks provider with the given API token.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_token)
    }

    /// Create a new SportMonks provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_token: impl Into<String>) -> Self {
        Self {
            client,
            api_token: api_token.into(),
            base_url: SPORTMONKS_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different API root (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the endpoint URL and league filter for a request made on `today`.
    fn endpoint(&self, request: &MatchRequest, today: NaiveDate) -> (String, Option<String>) {
        let between = |from: NaiveDate, to: NaiveDate| {
            format!("{}/fixtures/between/{from}/{to}", self.base_url)
        };

        match request.mode {
            MatchMode::Upcoming => {
                let until = today.checked_add_days(WINDOW_DAYS).unwrap_or(NaiveDate::MAX);
                (between(today, until), Some(request.league.clone()))
            }
            MatchMode::Live => (format!("{}/livescores/now", self.base_url), None),
            MatchMode::Results => {
                let since = today.checked_sub_days(WINDOW_DAYS).unwrap_or(NaiveDate::MIN);
                (between(since, today), Some(request.league.clone()))
            }
        }
    }

    fn unavailable(reason: impl Into<String>) -> MatchError {
        MatchError::unavailable(ProviderSource::Sportmonks, reason)
    }

    /// Make a GET request and parse the JSON document.
    async fn get(&self, url: &str, league: Option<&str>) -> Result<Value> {
        debug!(url, league, "SportMonks request");

        let mut query = vec![
            ("api_token", self.api_token.as_str()),
            ("include", INCLUDES),
        ];
        if let Some(league) = league {
            query.push(("leagues", league));
        }

        let response = self
            .client
            .get(url)
            .query(&query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, which carries the token.
                let e = e.without_url();
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
            .map_err(|e| Self::unavailable(e.without_url().to_string()))?;

        parse_document(ProviderSource::Sportmonks, status.as_u16(), &text)
    }
}

#[async_trait]
impl MatchProvider for SportmonksProvider {
    fn source(&self) -> ProviderSource {
        ProviderSource::Sportmonks
    }

    async fn fetch_matches(&self, request: &MatchRequest) -> Result<RawProviderResult> {
        let (url, league) = self.endpoint(request, Utc::now().date_naive());
        match self.get(&url, league.as_deref()).await {
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
