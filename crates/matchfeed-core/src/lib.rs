#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/matchfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for football match-data providers.
//!
//! This crate provides the foundational abstractions shared by every provider
//! and cache implementation:
//!
//! - [`MatchProvider`](provider::MatchProvider) - One upstream match-data API
//! - [`MatchCache`](cache::MatchCache) - Caching abstraction
//! - [`normalize`](normalize::normalize) - Provider document to [`CanonicalMatch`] mapping

/// Cache trait and defaults for storing fetched documents.
pub mod cache;
/// Error types for match-data operations.
pub mod error;
/// Query mode and provider source definitions.
pub mod mode;
/// Normalization of provider documents.
pub mod normalize;
/// Provider trait for fetching match data.
pub mod provider;
/// Core data types (MatchRequest, RawProviderResult, CanonicalMatch, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, MatchCache};
pub use error::{MatchError, Result};
pub use mode::{MatchMode, ProviderSource};
pub use normalize::{format_kickoff, normalize, normalize_document};
pub use provider::{MatchProvider, REQUEST_TIMEOUT, parse_document};
pub use types::{CacheKey, CanonicalMatch, MatchRequest, RawProviderResult, Score};
