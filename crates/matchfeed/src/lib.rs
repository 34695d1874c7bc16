#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/matchfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified football match-data interface.
//!
//! This crate re-exports the core types and the bundled provider
//! implementations, and provides a [`MatchProviderRegistry`] that tries
//! several providers in priority order behind a short-lived cache.
//!
//! # Features
//!
//! - `football-data` - football-data.org provider
//! - `api-football` - API-Football provider
//! - `sportmonks` - SportMonks provider
//!
//! # Example
//!
//! ```rust,ignore
//! use matchfeed::{InMemoryCache, MatchMode, MatchProviderRegistry, ProviderCredentials};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> matchfeed::Result<()> {
//!     let registry = MatchProviderRegistry::from_credentials(&ProviderCredentials::from_dotenv())
//!         .set_cache(Arc::new(InMemoryCache::new()));
//!
//!     let matches = registry.fetch_normalized("PL", MatchMode::Results).await?;
//!     println!("{:?}", matches);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use matchfeed_core::*;

// Cache implementations
pub use matchfeed_cache::{InMemoryCache, NoopCache};

// Providers
#[cfg(feature = "api-football")]
pub use matchfeed_api_football::ApiFootballProvider;
#[cfg(feature = "football-data")]
pub use matchfeed_football_data::FootballDataProvider;
#[cfg(feature = "sportmonks")]
pub use matchfeed_sportmonks::SportmonksProvider;

mod config;
pub use config::ProviderCredentials;

mod registry;
pub use registry::MatchProviderRegistry;
