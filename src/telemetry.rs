//! Telemetry metric name constants.
//!
//! Centralised metric names for stargazer operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `stargazer_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: generation provider name (e.g. "gemini", "template")
//! - `backend`: translation backend name (e.g. "nllb", "placeholder")
//! - `status`: attempt outcome: "ok", "error" or "timeout"
//! - `source`: where an insight came from: "cache" or "chain"

/// Total insights returned by the engine.
///
/// Labels: `provider`, `source` ("cache" | "chain").
pub const INSIGHTS_TOTAL: &str = "stargazer_insights_total";

/// Total provider attempts made by the fallback chain.
///
/// Labels: `provider`, `status` ("ok" | "error" | "timeout").
pub const PROVIDER_ATTEMPTS_TOTAL: &str = "stargazer_provider_attempts_total";

/// Duration of a single provider attempt in seconds.
///
/// Labels: `provider`.
pub const PROVIDER_DURATION_SECONDS: &str = "stargazer_provider_duration_seconds";

/// Total insight cache hits.
pub const CACHE_HITS_TOTAL: &str = "stargazer_cache_hits_total";

/// Total insight cache misses.
pub const CACHE_MISSES_TOTAL: &str = "stargazer_cache_misses_total";

/// Total translation attempts.
///
/// Labels: `backend`, `status` ("ok" | "error" | "timeout").
pub const TRANSLATIONS_TOTAL: &str = "stargazer_translations_total";

/// Total profile updates recorded.
pub const PROFILE_UPDATES_TOTAL: &str = "stargazer_profile_updates_total";
