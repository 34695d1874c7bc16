#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/matchfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Response cache implementations for matchfeed providers.
//!
//! This crate provides implementations of the [`MatchCache`] trait from `matchfeed-core`:
//!
//! - [`InMemoryCache`] - Bounded, TTL-expiring in-memory cache (the default)
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use matchfeed_core::MatchCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
