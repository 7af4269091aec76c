//! Insight cache keyed on the subject's identifying fields.
//!
//! [`InsightCache`] deduplicates identical generation requests: the same
//! (name, birth date, sign, language) tuple is answered from memory
//! instead of re-running the provider chain.
//!
//! # Keys
//!
//! [`CacheKey`] is a hex SHA-256 digest over a length-prefixed
//! concatenation of the four fields. Length prefixes keep field boundaries
//! unambiguous (`("a:b", "c")` and `("a", "b:c")` hash differently), and the
//! digest is stable across processes.
//!
//! # Bounds
//!
//! By default the cache is unbounded and entries never expire: it lives as
//! long as the process. [`CacheConfig::max_entries`] and
//! [`CacheConfig::ttl`] opt into moka's LRU eviction and time-to-live.

use std::fmt;
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::telemetry;
use crate::types::{Language, ZodiacSign};

/// Configuration for the insight cache.
///
/// ```rust
/// # use stargazer::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(10_000)
///     .ttl(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: unbounded.
    pub max_entries: Option<u64>,
    /// Time-to-live for cached entries. Default: no expiry.
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Create an unbounded, non-expiring config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the cache to `n` entries (LRU eviction).
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = Some(n);
        self
    }

    /// Expire entries `ttl` after insertion.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Deterministic cache key (lowercase hex SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a request's identifying fields.
    pub fn derive(name: &str, birth_date: &str, zodiac_sign: ZodiacSign, language: Language) -> Self {
        Self(digest_fields(&[
            "insight",
            name,
            birth_date,
            zodiac_sign.as_str(),
            language.code(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex SHA-256 over length-prefixed fields.
pub(crate) fn digest_fields(fields: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// A cached generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Generated (and, where applicable, translated) text.
    pub text: String,
    /// Provider that produced the text.
    pub provider: String,
}

impl CacheEntry {
    pub fn new(text: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provider: provider.into(),
        }
    }
}

/// Thread-safe in-memory insight cache.
///
/// Moka shards its map internally, so concurrent `put`s for the same key
/// are serialized per key (last write wins) and unrelated keys never
/// contend on a global lock.
pub struct InsightCache {
    entries: Cache<CacheKey, CacheEntry>,
}

impl InsightCache {
    /// Create a cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = config.max_entries {
            builder = builder.max_capacity(max);
        }
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            entries: builder.build(),
        }
    }

    /// Derive the key for a request's identifying fields.
    pub fn key(
        &self,
        name: &str,
        birth_date: &str,
        zodiac_sign: ZodiacSign,
        language: Language,
    ) -> CacheKey {
        CacheKey::derive(name, birth_date, zodiac_sign, language)
    }

    /// Look up an entry. Returns `None` on a miss.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        match self.entries.get(key) {
            Some(entry) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(entry)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Insert (or overwrite) an entry.
    pub fn put(&self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    /// Number of entries currently in the cache.
    ///
    /// Moka updates its counters lazily; call after pending maintenance
    /// when an exact figure matters.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for InsightCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
