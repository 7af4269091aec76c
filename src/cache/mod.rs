//! Caching subsystem.
//!
//! [`InsightCache`] stores generated insights keyed on a deterministic
//! digest of the request's identifying fields. The engine consults it
//! before running the provider chain; a hit bypasses context retrieval,
//! profiling and every provider. Opt out via
//! [`StargazerBuilder::disable_cache()`](crate::StargazerBuilder::disable_cache).

pub mod insight;

pub use insight::{CacheConfig, CacheEntry, CacheKey, InsightCache};
