//! Provider trait for fetching match data.
//!
//! A [`MatchProvider`] wraps one upstream football-data API. It turns a
//! [`MatchRequest`] into exactly one outbound HTTP call and hands back the
//! provider's document tagged with its [`ProviderSource`].

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;

use crate::{
    error::{MatchError, Result},
    mode::ProviderSource,
    types::{MatchRequest, RawProviderResult},
};

/// Timeout applied to every outbound provider request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of response-body characters quoted in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// A single upstream source of match data.
///
/// Implementations issue one GET request per call and never retry; retrying
/// and falling back across providers belongs to the caller. Any failure
/// (transport, timeout, non-2xx status, malformed body) is reported as
/// [`MatchError::ProviderUnavailable`](crate::MatchError::ProviderUnavailable).
#[async_trait]
pub trait MatchProvider: Send + Sync + Debug {
    /// Returns the source tag attached to every result of this provider.
    fn source(&self) -> ProviderSource;

    /// Returns the display name of this provider.
    fn name(&self) -> &str {
        self.source().tag()
    }

    /// Fetches the raw match document for `request`.
    async fn fetch_matches(&self, request: &MatchRequest) -> Result<RawProviderResult>;
}

/// Turns an HTTP response into a provider document.
///
/// Fails with [`MatchError::ProviderUnavailable`] on a non-2xx `status`, a
/// body that is not JSON, or JSON that is not an object.
pub fn parse_document(source: ProviderSource, status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        return Err(MatchError::unavailable(
            source,
            format!("HTTP {status}: {excerpt}"),
        ));
    }

    let document: Value = serde_json::from_str(body)
        .map_err(|e| MatchError::unavailable(source, format!("malformed JSON: {e}")))?;

    if !document.is_object() {
        return Err(MatchError::unavailable(
            source,
            "response body is not a JSON object",
        ));
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_accepts_object() {
        let document =
            parse_document(ProviderSource::FootballData, 200, r#"{"matches": []}"#).unwrap();
        assert!(document["matches"].is_array());
    }

    #[test]
    fn test_parse_document_rejects_bad_responses() {
        let source = ProviderSource::Sportmonks;

        let err = parse_document(source, 429, &"x".repeat(500)).unwrap_err();
        assert!(err.is_provider_failure());
        let message = err.to_string();
        assert!(message.contains("HTTP 429"));
        assert!(message.len() < 300);

        assert!(parse_document(source, 200, "<html>").is_err());
        assert!(parse_document(source, 204, "[1, 2]").is_err());
    }
}
